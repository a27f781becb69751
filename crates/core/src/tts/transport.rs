use crate::tts::{HttpRequest, HttpResponse, HttpTransport, TtsError};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// HTTPS transport backed by `reqwest`, using its default timeouts.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn post(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TtsError>> {
        async move {
            let response = self
                .client
                .post(&request.url)
                .header(CONTENT_TYPE, request.content_type)
                .body(request.body)
                .send()
                .await
                .map_err(|e| TtsError::General(format!("request failed: {}", e.without_url())))?;

            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|e| {
                    TtsError::General(format!(
                        "failed to read response body: {}",
                        e.without_url()
                    ))
                })?;

            Ok(HttpResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
                body,
            })
        }
        .boxed()
    }
}
