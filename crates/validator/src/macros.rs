//! Macros for declaring checks with minimal boilerplate.
//!
//! [`validator!`] generates the struct, its [`Validate`](crate::foundation::Validate)
//! implementation and a factory function. Every generated check fails with
//! a [`ValidationError`](crate::foundation::ValidationError) carrying the
//! declared `code`, the default message template and the declared params.
//!
//! ```rust,ignore
//! // Unit check
//! validator! {
//!     pub NotEmpty for str;
//!     code = "not_empty", message = "'{field}' must not be empty.";
//!     rule(input) { !input.is_empty() }
//!     fn not_empty();
//! }
//!
//! // Check with fields
//! validator! {
//!     #[derive(Copy, PartialEq, Eq, Hash)]
//!     pub MaxLength { max: usize, mode: LengthMode } for str;
//!     code = "max_length", message = "'{field}' must be {max} characters or fewer.";
//!     rule(self, input) { self.mode.measure(input) <= self.max }
//!     params(self, input) { "max" => self.max, "actual" => self.mode.measure(input) }
//!     new(max: usize) { Self { max, mode: LengthMode::Chars } }
//!     fn max_length(max: usize);
//! }
//! ```

/// Declares a check: struct, `Validate` impl, constructor and factory fn.
///
/// `#[derive(Debug, Clone)]` is always applied; unit checks also derive
/// `Copy`, `PartialEq`, `Eq`, `Hash` and `Default`.
#[macro_export]
macro_rules! validator {
    // ── Unit check (no fields) + factory fn ──────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        code = $code:literal, message = $msg:literal;
        rule($inp:ident) $rule:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            /// Stable code reported when this check fails.
            pub const CODE: &'static str = $code;
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            fn validate(
                &self,
                $inp: &Self::Input,
            ) -> ::std::result::Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    Err($crate::foundation::ValidationError::new($code, $msg))
                }
            }

            fn name(&self) -> &str {
                stringify!($name)
            }
        }

        #[must_use]
        $vis const fn $factory() -> $name {
            $name
        }
    };

    // ── Check with fields + custom new + factory fn ──────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        code = $code:literal, message = $msg:literal;
        rule($self_:ident, $inp:ident) $rule:block
        params($pself:ident, $pinp:ident) { $($pk:literal => $pv:expr),* $(,)? }
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            /// Stable code reported when this check fails.
            pub const CODE: &'static str = $code;

            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(
                &$self_,
                $inp: &Self::Input,
            ) -> ::std::result::Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    return Ok(());
                }
                let $pinp = $inp;
                let error = $crate::foundation::ValidationError::new($code, $msg);
                $(
                    let error = error.with_param($pk, ::std::string::ToString::to_string(&$pv));
                )*
                Err(error)
            }

            fn name(&self) -> &str {
                stringify!($name)
            }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::foundation::Validate;

    crate::validator! {
        /// Test-only check.
        pub Positive for i32;
        code = "positive", message = "'{field}' must be positive.";
        rule(input) { *input > 0 }
        fn positive();
    }

    crate::validator! {
        /// Test-only check with a field.
        pub AtLeast { min: i32 } for i32;
        code = "at_least", message = "'{field}' must be at least {min}.";
        rule(self, input) { *input >= self.min }
        params(self, input) { "min" => self.min, "value" => input }
        new(min: i32) { Self { min } }
        fn at_least(min: i32);
    }

    #[test]
    fn unit_check() {
        assert!(positive().validate(&1).is_ok());
        let err = positive().validate(&0).unwrap_err();
        assert_eq!(err.code, Positive::CODE);
        assert!(err.params.is_empty());
        assert_eq!(positive().name(), "Positive");
    }

    #[test]
    fn check_with_params() {
        assert!(at_least(3).validate(&3).is_ok());
        let err = at_least(3).validate(&1).unwrap_err();
        assert_eq!(err.code, "at_least");
        assert_eq!(err.param("min"), Some("3"));
        assert_eq!(err.param("value"), Some("1"));
    }
}
