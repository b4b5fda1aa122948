use crate::types::{Path, Segment};
use crate::ModelPathError;

/// Check if a path points to the root value.
pub fn is_root(path: &[Segment]) -> bool {
    path.is_empty()
}

/// Returns `true` if `path` starts with `prefix`, comparing whole segments.
///
/// `user` is a prefix of `user.name` and of `user`, but not of `username`.
pub fn starts_with(path: &[Segment], prefix: &[Segment]) -> bool {
    if path.len() < prefix.len() {
        return false;
    }
    path.iter()
        .zip(prefix)
        .all(|(a, b)| a.addresses_same(b))
}

/// Returns the remainder of `path` below `prefix`, if `prefix` is a prefix.
pub fn strip_prefix<'a>(path: &'a [Segment], prefix: &[Segment]) -> Option<&'a [Segment]> {
    if starts_with(path, prefix) {
        Some(&path[prefix.len()..])
    } else {
        None
    }
}

/// Check if `parent` path strictly contains the `child` path.
pub fn is_child(parent: &[Segment], child: &[Segment]) -> bool {
    parent.len() < child.len() && starts_with(child, parent)
}

/// Check if two paths address the same location.
pub fn is_path_equal(p1: &[Segment], p2: &[Segment]) -> bool {
    p1.len() == p2.len() && starts_with(p1, p2)
}

/// Get the parent path of a given path.
pub fn parent(path: &[Segment]) -> Result<Path, ModelPathError> {
    if path.is_empty() {
        return Err(ModelPathError::NoParent);
    }
    Ok(path[..path.len() - 1].to_vec())
}

/// Join model path fragments with `.`, skipping empty fragments.
pub fn join_model_path<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Check if a string represents a valid non-negative integer index.
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_model_path as p;

    #[test]
    fn test_starts_with() {
        assert!(starts_with(&p("user.name"), &p("user")));
        assert!(starts_with(&p("user"), &p("user")));
        assert!(starts_with(&p("user"), &p("")));
        assert!(!starts_with(&p("username"), &p("user")));
        assert!(!starts_with(&p("user"), &p("user.name")));
        assert!(starts_with(&p("list[1].a"), &p("list.1")));
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix(&p("user.name"), &p("user")), Some(&p("name")[..]));
        assert_eq!(strip_prefix(&p("user"), &p("user")), Some(&[] as &[Segment]));
        assert_eq!(strip_prefix(&p("other"), &p("user")), None);
    }

    #[test]
    fn test_is_child() {
        assert!(is_child(&p("a"), &p("a.b")));
        assert!(!is_child(&p("a.b"), &p("a")));
        assert!(!is_child(&p("a"), &p("a")));
        assert!(!is_child(&p("a"), &p("b.c")));
    }

    #[test]
    fn test_is_path_equal() {
        assert!(is_path_equal(&p("a[0]"), &p("a.0")));
        assert!(!is_path_equal(&p("a.b"), &p("a.c")));
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent(&p("a.b")).unwrap(), p("a"));
        assert_eq!(parent(&p("a")).unwrap(), p(""));
        assert_eq!(parent(&p("")), Err(ModelPathError::NoParent));
    }

    #[test]
    fn test_join_model_path() {
        assert_eq!(join_model_path(&["groups", "1", "name"]), "groups.1.name");
        assert_eq!(join_model_path(&["groups", "", "name"]), "groups.name");
        assert_eq!(join_model_path(&["", "1", ""]), "1");
        assert_eq!(join_model_path::<&str>(&[]), "");
    }

    #[test]
    fn test_is_valid_index() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("123"));
        assert!(!is_valid_index("-1"));
        assert!(!is_valid_index("1.5"));
        assert!(!is_valid_index("abc"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("01"));
    }
}
