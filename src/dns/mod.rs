//! DNS resolution.
//!
//! Query validation (`normalize`), forward resolution of hostnames and the
//! reverse lookup used for the `Hostname:` field.

mod resolution;


pub use resolution::{display_hostname, normalize, HostResolver};
