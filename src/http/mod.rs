//! HTTP protocol layer module
//!
//! Response construction shared by the request handlers.

pub mod response;

// Re-export commonly used types
pub use response::{build_not_found_response, build_resource_response};
