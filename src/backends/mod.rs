//! Backend implementations: the canned mock and the live HTTP service.

pub mod http;
pub mod mock;

pub use http::HttpBackend;
pub use mock::MockBackend;
