//! File storage
//!
//! Handle-keyed blob store on local disk with path validation.

pub mod results;
pub mod store;
pub mod validation;

pub use results::SweepResult;
pub use store::FileStore;
pub use validation::resolve_handle_path;
