//! Field paths shared by the Cluster API controllers when they build
//! server-side apply intents.

use crate::Path;

pub fn api_version() -> Path {
    Path::from_iter(["apiVersion"])
}

pub fn kind() -> Path {
    Path::from_iter(["kind"])
}

pub fn metadata_name() -> Path {
    Path::from_iter(["metadata", "name"])
}

pub fn metadata_namespace() -> Path {
    Path::from_iter(["metadata", "namespace"])
}

pub fn metadata_labels() -> Path {
    Path::from_iter(["metadata", "labels"])
}

pub fn metadata_annotations() -> Path {
    Path::from_iter(["metadata", "annotations"])
}

pub fn metadata_owner_references() -> Path {
    Path::from_iter(["metadata", "ownerReferences"])
}

pub fn spec() -> Path {
    Path::from_iter(["spec"])
}

/// The endpoint an infrastructure provider reports on the InfrastructureCluster.
/// It is owned by the provider and must never be part of a topology intent.
pub fn control_plane_endpoint() -> Path {
    Path::from_iter(["spec", "controlPlaneEndpoint"])
}

/// Returns the default allow-list for intents produced by the topology
/// controller.
///
/// `apiVersion`, `kind`, name and namespace are required for every apply
/// request. On top of that the controller only claims labels, annotations,
/// owner references and the spec.
pub fn intent_allowed_paths() -> Vec<Path> {
    vec![
        api_version(),
        kind(),
        metadata_name(),
        metadata_namespace(),
        metadata_labels(),
        metadata_annotations(),
        metadata_owner_references(),
        spec(),
    ]
}
