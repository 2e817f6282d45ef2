//! This library provides the structured field addresses Cluster API
//! controllers use to describe which parts of an object they have an opinion
//! on. A [`Path`] is an ordered sequence of [`Segment`]s, each either a map key
//! or an array index. The format of the string representation can be
//! described by `<NAME>(.<NAME>|[<INDEX>])*`.
//!
//! ## Usage
//!
//! Paths are usually composed programmatically, starting from the document
//! root and appending segments one at a time.
//!
//! ```
//! use capi_contract::{Path, Segment};
//!
//! let path = Path::root()
//!     .append("spec")
//!     .append("template")
//!     .append("containers")
//!     .append(Segment::Index(0))
//!     .append("image");
//!
//! assert_eq!(path.to_string(), "spec.template.containers[0].image");
//! ```
//!
//! They can also be parsed from [`str`] using Rust's standard
//! [`FromStr`](std::str::FromStr) trait, which is mostly useful for
//! configuration and tests.
//!
//! ```
//! use capi_contract::Path;
//!
//! let labels: Path = "metadata.labels".parse().expect("valid path");
//! let metadata: Path = "metadata".parse().expect("valid path");
//!
//! assert!(metadata.is_parent_of(&labels));
//! assert!(labels.overlaps(&metadata));
//! ```

mod path;
pub mod well_known;

pub use path::*;
