use crate::config::{ApiKey, DEFAULT_HOST, SYNTHESIZE_PATH};
use crate::tts::{
    HttpRequest, HttpTransport, ReqwestTransport, TtsError, JSON_CONTENT_TYPE,
};
use crate::voice::{resolve, SynthesisRequest};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use url::Url;

const LOG_TARGET: &str = "tts::google";

/// Client for the Google Cloud `text:synthesize` endpoint.
///
/// Each call resolves the voice selection locally, then makes exactly one
/// POST through the transport. Nothing is retried or cached.
#[derive(Clone, Debug)]
pub struct GoogleTtsClient<T = ReqwestTransport> {
    transport: T,
    api_key: ApiKey,
    base_url: String,
    debug: bool,
}

impl GoogleTtsClient<ReqwestTransport> {
    /// `debug` only controls how much the client logs.
    pub fn new(api_key: ApiKey, debug: bool) -> Self {
        Self::with_transport(api_key, debug, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> GoogleTtsClient<T> {
    pub fn with_transport(api_key: ApiKey, debug: bool, transport: T) -> Self {
        Self {
            transport,
            api_key,
            base_url: DEFAULT_HOST.to_owned(),
            debug,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Resolves the selection and synthesizes it, returning the decoded audio.
    pub async fn speak(
        &self,
        text: &str,
        lang: Option<&str>,
        voice: Option<&str>,
        fileformat: Option<&str>,
        samplerate: Option<u32>,
    ) -> Result<Vec<u8>, TtsError> {
        let request = resolve(text, lang, voice, fileformat, samplerate)?;
        self.synthesize(&request).await
    }

    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        let url = self.endpoint()?;
        let body = serde_json::to_vec(&SynthesizeBody::from(request))
            .map_err(|e| TtsError::General(format!("failed to encode request: {e}")))?;

        if self.debug {
            tracing::debug!(
                target: LOG_TARGET,
                language = request.language_code(),
                voice = request.voice_name(),
                encoding = request.audio_encoding(),
                sample_rate_hz = request.sample_rate_hertz(),
                text_len = request.text().len(),
                "sending synthesis request"
            );
        }

        let response = self
            .transport
            .post(HttpRequest {
                url: url.into(),
                content_type: JSON_CONTENT_TYPE,
                body,
            })
            .await?;

        if response.status == 401 {
            tracing::warn!(
                target: LOG_TARGET,
                status = response.status,
                "synthesis request rejected: unauthorized"
            );
            return Err(TtsError::Auth {
                status: response.status,
                reason: response.reason,
            });
        }

        if response.status != 200 {
            tracing::warn!(
                target: LOG_TARGET,
                status = response.status,
                reason = %response.reason,
                "synthesis request failed"
            );
            return Err(TtsError::BadRequest {
                status: response.status,
                reason: response.reason,
            });
        }

        let payload: SynthesizeResponse = serde_json::from_slice(&response.body)
            .map_err(|e| TtsError::General(format!("invalid JSON in response: {e}")))?;

        let audio_content = payload
            .audio_content
            .ok_or_else(|| TtsError::General("response has no audioContent".to_owned()))?;

        let audio = BASE64
            .decode(audio_content.as_bytes())
            .map_err(|e| TtsError::General(format!("audioContent is not valid base64: {e}")))?;

        if self.debug {
            tracing::debug!(target: LOG_TARGET, audio_bytes = audio.len(), "synthesis complete");
        }

        Ok(audio)
    }

    fn endpoint(&self) -> Result<Url, TtsError> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{SYNTHESIZE_PATH}"))
            .map_err(|e| TtsError::General(format!("invalid endpoint {base}: {e}")))?;
        url.query_pairs_mut().append_pair("key", self.api_key.expose());
        Ok(url)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeBody<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig<'a>,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: &'a str,
    sample_rate_hertz: u32,
}

impl<'a> From<&'a SynthesisRequest> for SynthesizeBody<'a> {
    fn from(request: &'a SynthesisRequest) -> Self {
        Self {
            input: SynthesisInput {
                text: request.text(),
            },
            voice: VoiceSelection {
                language_code: request.language_code(),
                name: request.voice_name(),
            },
            audio_config: AudioConfig {
                audio_encoding: request.audio_encoding(),
                sample_rate_hertz: request.sample_rate_hertz(),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::HttpResponse;
    use bytes::Bytes;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct StubTransport {
        status: u16,
        reason: &'static str,
        body: &'static str,
        seen: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl StubTransport {
        fn new(status: u16, reason: &'static str, body: &'static str) -> Self {
            Self {
                status,
                reason,
                body,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl HttpTransport for StubTransport {
        fn post(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TtsError>> {
            self.seen.lock().unwrap().push(request);
            let response = HttpResponse {
                status: self.status,
                reason: self.reason.to_owned(),
                body: Bytes::from_static(self.body.as_bytes()),
            };
            async move { Ok(response) }.boxed()
        }
    }

    #[derive(Clone)]
    struct FailingTransport;

    impl HttpTransport for FailingTransport {
        fn post(&self, _request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TtsError>> {
            async { Err(TtsError::General("connection reset".into())) }.boxed()
        }
    }

    fn client(transport: StubTransport) -> GoogleTtsClient<StubTransport> {
        GoogleTtsClient::with_transport(ApiKey::new("test-key").unwrap(), true, transport)
    }

    fn default_request() -> SynthesisRequest {
        resolve("hello", None, None, None, None).unwrap()
    }

    #[tokio::test]
    async fn decodes_audio_on_success() {
        let stub = StubTransport::new(200, "OK", r#"{"audioContent":"aGVsbG8="}"#);
        let audio = client(stub).synthesize(&default_request()).await.unwrap();
        assert_eq!(audio, b"hello");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let stub = StubTransport::new(401, "Unauthorized", "");
        let err = client(stub).synthesize(&default_request()).await.unwrap_err();
        match &err {
            TtsError::Auth { status, reason } => {
                assert_eq!(*status, 401);
                assert_eq!(reason, "Unauthorized");
            }
            other => panic!("expected auth error, got {other:?}"),
        }
        assert_eq!(err.to_string(), "401 Unauthorized");
    }

    #[tokio::test]
    async fn server_error_maps_to_bad_request() {
        let stub = StubTransport::new(500, "Internal Server Error", "oops");
        let err = client(stub).synthesize(&default_request()).await.unwrap_err();
        assert!(matches!(err, TtsError::BadRequest { status: 500, .. }));
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[tokio::test]
    async fn non_200_success_is_still_bad_request() {
        let stub = StubTransport::new(204, "No Content", "");
        let err = client(stub).synthesize(&default_request()).await.unwrap_err();
        assert!(matches!(err, TtsError::BadRequest { status: 204, .. }));
    }

    #[tokio::test]
    async fn non_json_body_is_general_error() {
        let stub = StubTransport::new(200, "OK", "<html>not json</html>");
        let err = client(stub).synthesize(&default_request()).await.unwrap_err();
        assert!(matches!(err, TtsError::General(_)));
    }

    #[tokio::test]
    async fn missing_audio_content_is_general_error() {
        let stub = StubTransport::new(200, "OK", r#"{"timepoints":[]}"#);
        let err = client(stub).synthesize(&default_request()).await.unwrap_err();
        match err {
            TtsError::General(msg) => assert!(msg.contains("audioContent")),
            other => panic!("expected general error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_base64_is_general_error() {
        let stub = StubTransport::new(200, "OK", r#"{"audioContent":"***"}"#);
        let err = client(stub).synthesize(&default_request()).await.unwrap_err();
        assert!(matches!(err, TtsError::General(_)));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let client = GoogleTtsClient::with_transport(
            ApiKey::new("test-key").unwrap(),
            false,
            FailingTransport,
        );
        let err = client.synthesize(&default_request()).await.unwrap_err();
        assert!(matches!(err, TtsError::General(_)));
    }

    #[tokio::test]
    async fn request_carries_key_header_and_body() {
        let stub = StubTransport::new(200, "OK", r#"{"audioContent":""}"#);
        let request = resolve(
            "say \"hi\"\nthen stop",
            Some("fr-CA"),
            Some("fr-CA-Standard-B"),
            Some("MP3"),
            Some(22_050),
        )
        .unwrap();
        let audio = client(stub.clone()).synthesize(&request).await.unwrap();
        assert!(audio.is_empty());

        let sent = stub.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].url,
            "https://texttospeech.googleapis.com/v1beta1/text:synthesize?key=test-key"
        );
        assert_eq!(sent[0].content_type, "application/json; charset=utf-8");

        let body: serde_json::Value = serde_json::from_slice(&sent[0].body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "input": { "text": "say \"hi\"\nthen stop" },
                "voice": { "languageCode": "fr-CA", "name": "fr-CA-Standard-B" },
                "audioConfig": { "audioEncoding": "MP3", "sampleRateHertz": 22050 }
            })
        );
    }

    #[tokio::test]
    async fn api_key_is_query_encoded() {
        let stub = StubTransport::new(200, "OK", r#"{"audioContent":"aGVsbG8="}"#);
        let client = GoogleTtsClient::with_transport(
            ApiKey::new("a&b=c").unwrap(),
            false,
            stub.clone(),
        )
        .with_base_url("http://localhost:9999/".to_owned());
        client.synthesize(&default_request()).await.unwrap();
        assert_eq!(
            stub.requests()[0].url,
            "http://localhost:9999/v1beta1/text:synthesize?key=a%26b%3Dc"
        );
    }

    #[tokio::test]
    async fn speak_resolves_before_calling_transport() {
        let stub = StubTransport::new(200, "OK", r#"{"audioContent":"aGVsbG8="}"#);
        let client = client(stub.clone());

        let err = client
            .speak("hi", Some("xx-XX"), None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::Language(_)));
        assert!(stub.requests().is_empty());

        let audio = client.speak("hi", None, None, None, None).await.unwrap();
        assert_eq!(audio, b"hello");
        assert_eq!(stub.requests().len(), 1);
    }
}
