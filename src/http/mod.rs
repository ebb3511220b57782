//! HTTP protocol layer module
//!
//! Response builders and content-type detection shared by the handlers.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_500_response, build_empty_response,
    build_file_response, build_json_response, cors, no_cache, HttpResponse, JSON_CONTENT_TYPE,
    NO_CACHE,
};
