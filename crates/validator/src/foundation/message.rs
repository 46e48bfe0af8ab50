//! Message templates
//!
//! A template is a literal string with `{name}` placeholders. `{field}` is
//! the field's display name; every other placeholder is looked up in the
//! failing check's params. Placeholders with no value are kept verbatim and
//! `{{` / `}}` escape literal braces.

use std::borrow::Cow;

/// Renders a message template.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use cascade_validator::foundation::render_message;
///
/// let params = [(Cow::Borrowed("max"), Cow::Borrowed("100"))];
/// assert_eq!(
///     render_message("'{field}' allows {max} chars", "Foo", &params),
///     "'Foo' allows 100 chars",
/// );
/// ```
pub fn render_message(
    template: &str,
    field: &str,
    params: &[(Cow<'static, str>, Cow<'static, str>)],
) -> String {
    if !template.contains(['{', '}']) {
        return template.to_owned();
    }

    let mut out = String::with_capacity(template.len() + field.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix('}') {
            out.push('}');
            rest = after.strip_prefix('}').unwrap_or(after);
        } else {
            let body = &tail[1..];
            match body.find(['{', '}']) {
                // A nested `{` starts the next placeholder; this one is literal.
                Some(end) if body[end..].starts_with('{') => {
                    out.push('{');
                    out.push_str(&body[..end]);
                    rest = &body[end..];
                }
                Some(end) => {
                    match lookup(&body[..end], field, params) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&tail[..end + 2]),
                    }
                    rest = &body[end + 1..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        }
    }

    out.push_str(rest);
    out
}

fn lookup<'a>(
    key: &str,
    field: &'a str,
    params: &'a [(Cow<'static, str>, Cow<'static, str>)],
) -> Option<&'a str> {
    if key == "field" {
        return Some(field);
    }
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| &**v)
}
