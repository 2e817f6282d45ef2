//! This library prepares objects for server-side apply by reducing them to an
//! intent: a partial object which only contains the fields a controller has
//! an opinion on.
//!
//! Server-side apply interprets every field sent with an apply request as
//! owned by the applier, and every previously applied field which is now
//! missing as released. Sending a full object would therefore claim fields set
//! by other controllers, status subtrees or defaults the controller does not
//! care about.
//!
//! ## Usage
//!
//! ```
//! use capi_contract::well_known;
//! use capi_ssa::{FilterObjectInput, filter_object};
//! use serde_json::json;
//!
//! let mut object = json!({
//!     "metadata": {"name": "my-cluster", "uid": "0d4c0a2b"},
//!     "spec": {"controlPlaneEndpoint": {"host": "10.0.0.1", "port": 6443}, "paused": false},
//!     "status": {"ready": true},
//! });
//!
//! let input = FilterObjectInput::default()
//!     .with_allowed_paths([well_known::metadata_name(), well_known::spec()])
//!     .with_ignore_paths([well_known::control_plane_endpoint()]);
//!
//! filter_object(&mut object, &input);
//!
//! assert_eq!(
//!     object,
//!     json!({"metadata": {"name": "my-cluster"}, "spec": {"paused": false}})
//! );
//! ```

mod intent;
mod object;
mod predicate;

pub use capi_contract::{Path, Segment};
pub use intent::*;
pub use object::*;
pub use predicate::*;
