pub mod backend;
pub mod http;

pub use backend::{BackendError, ChatBackend};
pub use http::HttpBackend;
