mod google;
mod transport;

use bytes::Bytes;
use futures::future::BoxFuture;

pub use google::GoogleTtsClient;
pub use transport::ReqwestTransport;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(thiserror::Error, Debug)]
pub enum TtsError {
    #[error("{0}")]
    Language(String),

    #[error("{status} {reason}")]
    Auth { status: u16, reason: String },

    #[error("{status} {reason}")]
    BadRequest { status: u16, reason: String },

    #[error("{0}")]
    General(String),
}

/// A single JSON POST handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: Bytes,
}

/// Performs one request and returns whatever status came back. Only
/// connection-level failures are errors here; status interpretation belongs
/// to the caller.
pub trait HttpTransport: Send + Sync {
    fn post(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TtsError>>;
}
