//! Request handler module
//!
//! Request dispatch and static resource lookup.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
pub use static_files::{Resource, StaticFileResponder};
