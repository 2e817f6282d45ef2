//! Predicates deciding which fields of an intent are dropped.
//!
//! The walker visits every ancestor of a field before the field itself, so the
//! allow-list must keep ancestors traversable (overlap semantics), while the
//! ignore-list only needs to hit the root of the ignored subtree (exact
//! semantics).

use capi_contract::Path;

/// Returns a predicate which is true when the tested path overlaps one of the
/// `allowed_paths`.
///
/// If `metadata.labels` is allowed, both `metadata` and `metadata.labels.foo`
/// are allowed as well, while `metadata.name` is not.
pub fn is_path_allowed(allowed_paths: &[Path]) -> impl Fn(&Path) -> bool + '_ {
    move |path: &Path| allowed_paths.iter().any(|allowed| path.overlaps(allowed))
}

/// Returns the negation of [`is_path_allowed`], used to filter everything
/// outside the allow-list.
pub fn is_path_not_allowed(allowed_paths: &[Path]) -> impl Fn(&Path) -> bool + '_ {
    let is_allowed = is_path_allowed(allowed_paths);
    move |path: &Path| !is_allowed(path)
}

/// Returns a predicate which is true when the tested path is exactly one of
/// the `ignore_paths`.
pub fn is_path_ignored(ignore_paths: &[Path]) -> impl Fn(&Path) -> bool + '_ {
    move |path: &Path| ignore_paths.contains(path)
}
