//! Name and type name validity rules.
//!
//! A name is an identifier such as `foo`, `foo-bar` or `foo_1`. A type name
//! is a name optionally prefixed with a module path such as `example.org/foo/`.

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_simple_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_name_start(c) => chars.all(is_name_char),
        _ => false,
    }
}

/// Check whether `s` is a valid name.
///
/// With `allow_dot`, `s` may be several names joined by `.`.
pub fn is_valid_name(s: &str, allow_dot: bool) -> bool {
    if allow_dot {
        s.split('.').all(is_simple_name)
    } else {
        is_simple_name(s)
    }
}

/// Check whether `s` is a valid type name.
///
/// The module path (everything up to the last `/`) may contain dots no
/// matter what `allow_dot` says, so domain-style paths are accepted.
pub fn is_valid_typename(s: &str, allow_dot: bool) -> bool {
    match s.rfind('/') {
        Some(i) => {
            let (path, name) = (&s[..i], &s[i + 1..]);
            path.split('/').all(is_path_segment) && is_valid_name(name, allow_dot)
        }
        None => is_valid_name(s, allow_dot),
    }
}

fn is_path_segment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_name_char(c) || c == '.')
}

/// Validate the text following a leading `.`, e.g. `foo.bar:baz` from
/// `.foo.bar:baz`.
pub fn is_valid_compound_name(s: &str) -> bool {
    let mut parts = s.split(':');
    let head = parts.next().unwrap_or_default();
    is_valid_name(head, true) && parts.all(|part| is_valid_typename(part, true))
}

/// Validate the text following a leading `:`, e.g. `foo:bar.baz` from
/// `:foo:bar.baz`.
pub fn is_valid_compound_typename(s: &str) -> bool {
    s.split(':').all(|part| is_valid_typename(part, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert!(is_valid_name("foo", false));
        assert!(is_valid_name("foo-bar_1", false));
        assert!(is_valid_name("_x", false));
        assert!(!is_valid_name("", false));
        assert!(!is_valid_name("1foo", false));
        assert!(!is_valid_name("foo.bar", false));
        assert!(is_valid_name("foo.bar", true));
        assert!(!is_valid_name("foo..bar", true));
        assert!(!is_valid_name("foo.", true));
    }

    #[test]
    fn test_typenames() {
        assert!(is_valid_typename("int", false));
        assert!(is_valid_typename("example.org/types/point", false));
        assert!(!is_valid_typename("example.org/types/point.x", false));
        assert!(is_valid_typename("example.org/types/point.x", true));
        assert!(!is_valid_typename("/point", false));
        assert!(!is_valid_typename("a//point", false));
        assert!(!is_valid_typename("a/", false));
    }

    #[test]
    fn test_compound() {
        assert!(is_valid_compound_name("foo.bar:baz"));
        assert!(is_valid_compound_name("foo:example.org/t"));
        assert!(!is_valid_compound_name("foo:"));
        assert!(!is_valid_compound_name(""));
        assert!(is_valid_compound_typename("int:float"));
        assert!(is_valid_compound_typename("a.com/t.x"));
        assert!(!is_valid_compound_typename("int::float"));
    }
}
