pub mod client;
pub mod transport;

pub use client::{decode_processing, ApiClient, ApiResponse, RequestOptions, DEFAULT_TIMEOUT};
pub use transport::{Body, FormPart, HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
