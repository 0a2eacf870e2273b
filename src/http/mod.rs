//! HTTP client construction and the request transport used by workers.
mod client;
mod transport;


pub use client::{build_client, build_headers};
pub use transport::{MAX_BODY_BYTES, ReqwestTransport, Transport, TransportResponse};
