//! The recursive walker which prunes a document tree down to an intent.
//!
//! In server-side apply an intent is a partial object which only contains the
//! fields and values the applier has an opinion on. Every field sent with an
//! apply request is claimed by the applier, and every field previously sent but
//! now missing is released. The walker therefore removes everything the
//! controller should not claim and compacts maps that become empty.

use capi_contract::{Path, Segment};
use serde_json::{Map, Value};

/// Filters a document tree in place.
///
/// Only map entries are matched against the filter predicate. Arrays are
/// traversed only to drop empty structs and nils inside the `spec` subtree,
/// their elements are never removed.
///
/// Maps emptied by the filter are dropped as well, with the exception of the
/// top-level `spec`, which is kept as an empty map like the root itself.
#[derive(Clone, Copy, Default)]
pub struct IntentFilter<'a> {
    should_filter: Option<&'a dyn Fn(&Path) -> bool>,
    drop_empty_struct_and_nil: bool,
}

impl<'a> IntentFilter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every map entry for which `should_filter` returns true, together
    /// with its whole subtree.
    pub fn with_should_filter(mut self, should_filter: &'a dyn Fn(&Path) -> bool) -> Self {
        self.should_filter = Some(should_filter);
        self
    }

    /// Drops empty maps and nulls nested below the top-level `spec` field.
    pub fn with_drop_empty_struct_and_nil(mut self, drop_empty_struct_and_nil: bool) -> Self {
        self.drop_empty_struct_and_nil = drop_empty_struct_and_nil;
        self
    }

    /// Filters `value`, which is located at `path` inside the document.
    ///
    /// Returns true if at least one field was removed from the subtree.
    pub fn filter(&self, path: &Path, value: &mut Value) -> bool {
        match value {
            Value::Object(fields) => self.filter_fields(path, fields),
            Value::Array(items) if self.drop_empty_struct_and_nil && is_spec_path(path) => {
                self.filter_items(path, items)
            }
            _ => false,
        }
    }

    fn filter_fields(&self, path: &Path, fields: &mut Map<String, Value>) -> bool {
        let mut got_deletions = false;

        fields.retain(|field, value| {
            let field_path = path.append(field);

            if self
                .should_filter
                .is_some_and(|should_filter| should_filter(&field_path))
            {
                tracing::trace!(path = %field_path, "dropping field from intent");
                got_deletions = true;
                return false;
            }

            // The top-level spec survives as an empty map, nulls are dropped
            // at every level of the spec subtree.
            let is_top_level_spec = path.is_empty() && is_spec_path(&field_path);

            if self.drop_empty_struct_and_nil
                && is_spec_path(&field_path)
                && (value.is_null() || (!is_top_level_spec && is_empty_struct(value)))
            {
                tracing::trace!(path = %field_path, "dropping empty struct or nil from intent");
                got_deletions = true;
                return false;
            }

            if self.filter(&field_path, value) {
                got_deletions = true;

                if !is_top_level_spec && is_empty_struct(value) {
                    tracing::trace!(path = %field_path, "compacting emptied map");
                    return false;
                }
            }

            true
        });

        got_deletions
    }

    fn filter_items(&self, path: &Path, items: &mut [Value]) -> bool {
        // Predicates are not supported within arrays.
        let nested = Self {
            should_filter: None,
            ..*self
        };

        let mut got_deletions = false;
        for (index, item) in items.iter_mut().enumerate() {
            got_deletions |= nested.filter(&path.append(Segment::Index(index)), item);
        }

        got_deletions
    }
}

/// Returns true for paths inside the top-level `spec` field. This is a plain
/// prefix match on the first field name, the same way the rendered path
/// would be matched.
fn is_spec_path(path: &Path) -> bool {
    path.first()
        .and_then(Segment::as_name)
        .is_some_and(|name| name.starts_with("spec"))
}

fn is_empty_struct(value: &Value) -> bool {
    value.as_object().is_some_and(Map::is_empty)
}
