//! Field references and presence
//!
//! A rule chain is bound to one field of its root type through a
//! [`FieldRef`]: the field's name plus an accessor. The field's type decides
//! whether a value can be absent via [`FieldValue`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Projects a field to its value, or `None` when the field is absent.
///
/// `Option<U>` is absent when `None`. Every other implementor is always
/// present, so a `NotNull` check on it always passes.
///
/// Implement this for domain types that should be usable as chain fields:
///
/// ```
/// use cascade_validator::foundation::FieldValue;
///
/// struct Email(String);
///
/// impl FieldValue for Email {
///     type Value = String;
///
///     fn present(&self) -> Option<&String> {
///         Some(&self.0)
///     }
/// }
/// ```
pub trait FieldValue {
    /// The type value checks are applied to.
    type Value: ?Sized;

    /// Returns the value, or `None` if the field is absent.
    fn present(&self) -> Option<&Self::Value>;
}

impl<U> FieldValue for Option<U> {
    type Value = U;

    #[inline]
    fn present(&self) -> Option<&U> {
        self.as_ref()
    }
}

impl<U> FieldValue for Vec<U> {
    type Value = [U];

    #[inline]
    fn present(&self) -> Option<&[U]> {
        Some(self.as_slice())
    }
}

impl FieldValue for str {
    type Value = str;

    #[inline]
    fn present(&self) -> Option<&str> {
        Some(self)
    }
}

impl FieldValue for Cow<'_, str> {
    type Value = str;

    #[inline]
    fn present(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

macro_rules! always_present {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                type Value = $ty;

                #[inline]
                fn present(&self) -> Option<&$ty> {
                    Some(self)
                }
            }
        )+
    };
}

always_present!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

#[cfg(feature = "chrono")]
always_present!(
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::NaiveTime,
    chrono::DateTime<chrono::Utc>,
);

// ============================================================================
// FIELD REFERENCE
// ============================================================================

type Accessor<T, F> = Arc<dyn Fn(&T) -> &F + Send + Sync>;

/// Identifies one field of a root type `T`: its name and how to read it.
///
/// The name keys the field's failures; the optional display name replaces
/// `{field}` in message templates.
pub struct FieldRef<T, F: ?Sized> {
    name: Cow<'static, str>,
    display_name: Option<Cow<'static, str>>,
    accessor: Accessor<T, F>,
}

impl<T, F: ?Sized> FieldRef<T, F> {
    /// Creates a field reference.
    pub fn new<A>(name: impl Into<Cow<'static, str>>, accessor: A) -> Self
    where
        A: Fn(&T) -> &F + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            display_name: None,
            accessor: Arc::new(accessor),
        }
    }

    /// Sets the name rendered into messages.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_display_name(mut self, display_name: impl Into<Cow<'static, str>>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// The field name failures are keyed by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name rendered into messages; falls back to [`name`](Self::name).
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Reads the field from a root object.
    #[inline]
    pub fn get<'a>(&self, root: &'a T) -> &'a F {
        (self.accessor)(root)
    }
}

impl<T, F: ?Sized> Clone for FieldRef<T, F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<T, F: ?Sized> fmt::Debug for FieldRef<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRef")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dto {
        name: Option<String>,
        age: i32,
    }

    #[test]
    fn test_option_presence() {
        assert_eq!(Some(5).present(), Some(&5));
        assert_eq!(None::<i32>.present(), None);
    }

    #[test]
    fn test_plain_types_always_present() {
        assert_eq!(42i32.present(), Some(&42));
        assert_eq!(String::from("x").present().map(String::as_str), Some("x"));
        assert_eq!(vec![1, 2].present(), Some(&[1, 2][..]));
    }

    #[test]
    fn test_field_ref_reads_field() {
        let dto = Dto {
            name: Some("alice".into()),
            age: 30,
        };
        let name = FieldRef::new("Name", |d: &Dto| &d.name);
        let age = FieldRef::new("Age", |d: &Dto| &d.age);

        assert_eq!(name.get(&dto).as_deref(), Some("alice"));
        assert_eq!(*age.get(&dto), 30);
    }

    #[test]
    fn test_display_name_fallback() {
        let field = FieldRef::new("StartDate", |d: &Dto| &d.age);
        assert_eq!(field.display_name(), "StartDate");

        let field = field.with_display_name("Start date");
        assert_eq!(field.name(), "StartDate");
        assert_eq!(field.display_name(), "Start date");
    }
}
