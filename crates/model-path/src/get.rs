use crate::parse::parse_model_path;
use crate::tree::Tree;
use crate::types::Segment;

/// Get a value from a tree by path.
///
/// Returns `None` if the path doesn't exist or holds a wildcard.
pub fn get<'a>(tree: &'a Tree, path: &[Segment]) -> Option<&'a Tree> {
    let mut current = tree;
    for segment in path {
        current = match current {
            _ if segment.is_wildcard() => return None,
            Tree::Seq(items) => items.get(segment.as_index()?)?,
            Tree::Map(map) => map.get(&*segment.as_key()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a value by path, falling back to `default` when it is absent.
pub fn get_or<'a>(tree: &'a Tree, path: &[Segment], default: &'a Tree) -> &'a Tree {
    get(tree, path).unwrap_or(default)
}

/// Get a value by model path string.
pub fn get_by_model<'a>(tree: &'a Tree, model: &str) -> Option<&'a Tree> {
    get(tree, &parse_model_path(model))
}
