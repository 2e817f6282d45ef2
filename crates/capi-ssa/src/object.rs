use capi_contract::Path;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::{ResultExt, Snafu, ensure};

use crate::{
    intent::IntentFilter,
    predicate::{is_path_ignored, is_path_not_allowed},
};

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize typed object"))]
    SerializeObject { source: serde_json::Error },

    #[snafu(display("typed object must serialize to a map, got {value}"))]
    NotAnObject { value: Value },
}

/// Describes which parts of an object a controller has an opinion on.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterObjectInput {
    /// Everything except these paths is dropped. An allowed path keeps its
    /// ancestors and its whole subtree. No allow-list filtering happens when
    /// this is empty.
    pub allowed_paths: Vec<Path>,

    /// These paths are dropped with their whole subtree, for example fields
    /// owned by other controllers like `spec.controlPlaneEndpoint`. Paths
    /// pointing into arrays are not supported.
    pub ignore_paths: Vec<Path>,

    /// Drops empty structs and nils nested below `spec`.
    ///
    /// Typed objects converted into a document tree carry all their zero-value
    /// fields, which would otherwise be claimed by the apply request.
    pub drop_empty_struct_and_nil: bool,
}

impl FilterObjectInput {
    pub fn with_allowed_paths(mut self, allowed_paths: impl IntoIterator<Item = Path>) -> Self {
        self.allowed_paths.extend(allowed_paths);
        self
    }

    pub fn with_ignore_paths(mut self, ignore_paths: impl IntoIterator<Item = Path>) -> Self {
        self.ignore_paths.extend(ignore_paths);
        self
    }

    pub fn with_drop_empty_struct_and_nil(mut self, drop_empty_struct_and_nil: bool) -> Self {
        self.drop_empty_struct_and_nil = drop_empty_struct_and_nil;
        self
    }
}

/// Filters out everything from `object` the controller has no opinion on.
///
/// The object is filtered in place: first against the allowed paths, then
/// against the ignore paths, so a path present in both lists ends up
/// dropped. Empty structs and nils are dropped during those passes, or in a
/// dedicated pass if neither list is set.
///
/// Anything other than a map is left untouched.
pub fn filter_object(object: &mut Value, input: &FilterObjectInput) {
    if !object.is_object() {
        tracing::debug!("skipping intent filter, document root is not a map");
        return;
    }

    let root = Path::root();

    if !input.allowed_paths.is_empty() {
        tracing::debug!(
            allowed_paths = input.allowed_paths.len(),
            drop_empty_struct_and_nil = input.drop_empty_struct_and_nil,
            "filtering paths which are not allowed"
        );

        let should_filter = is_path_not_allowed(&input.allowed_paths);
        IntentFilter::new()
            .with_should_filter(&should_filter)
            .with_drop_empty_struct_and_nil(input.drop_empty_struct_and_nil)
            .filter(&root, object);
    }

    if !input.ignore_paths.is_empty() {
        tracing::debug!(
            ignore_paths = input.ignore_paths.len(),
            drop_empty_struct_and_nil = input.drop_empty_struct_and_nil,
            "filtering ignored paths"
        );

        let should_filter = is_path_ignored(&input.ignore_paths);
        IntentFilter::new()
            .with_should_filter(&should_filter)
            .with_drop_empty_struct_and_nil(input.drop_empty_struct_and_nil)
            .filter(&root, object);
    }

    if input.drop_empty_struct_and_nil
        && input.allowed_paths.is_empty()
        && input.ignore_paths.is_empty()
    {
        tracing::debug!("dropping empty structs and nils");

        IntentFilter::new()
            .with_drop_empty_struct_and_nil(true)
            .filter(&root, object);
    }
}

/// Converts a typed object into a document tree and filters it with
/// [`filter_object`].
pub fn filter_typed<T>(object: &T, input: &FilterObjectInput) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    let mut value = serde_json::to_value(object).context(SerializeObjectSnafu)?;
    ensure!(value.is_object(), NotAnObjectSnafu { value });

    filter_object(&mut value, input);
    Ok(value)
}
