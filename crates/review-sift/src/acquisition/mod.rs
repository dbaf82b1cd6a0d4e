//! Page acquisition over plain HTTP.

pub mod http_client;

pub use http_client::{HttpClient, HttpResponse};
