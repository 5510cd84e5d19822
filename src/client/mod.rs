//! Client identity
//!
//! Resolves who a request comes from and tracks each client's live upload.

pub mod address;
pub mod registry;

pub use address::resolve_client_address;
pub use registry::IdentityRegistrar;
