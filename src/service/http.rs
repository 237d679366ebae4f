//! reqwest-backed [`BackendService`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::service::error::ServiceError;
use crate::service::types::{ApiResponse, EncodeRequest, EncodedText, ErrorBody, HelloMessage};
use crate::service::{BackendService, ServiceResult};

pub const HELLO_PATH: &str = "/api/hello";
pub const ENCODE_PATH: &str = "/api/base64/encode";

/// Talks to the demo backend over HTTP.
///
/// 2xx bodies become `data`; non-2xx responses carrying `{"error": ...}`
/// become `error`. Anything else is a [`ServiceError`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(ServiceError::Client)?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        url: String,
    ) -> ServiceResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|source| ServiceError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ServiceError::Transport {
                url: url.clone(),
                source,
            })?;

        if status.is_success() {
            return serde_json::from_slice::<T>(&body)
                .map(ApiResponse::ok)
                .map_err(|e| ServiceError::Decode {
                    url,
                    message: e.to_string(),
                });
        }

        match serde_json::from_slice::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) => {
                tracing::debug!(%url, status = status.as_u16(), %error, "Backend reported error");
                Ok(ApiResponse::error(error))
            }
            Err(_) => Err(ServiceError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}

impl BackendService for HttpBackend {
    async fn get_hello(&self) -> ServiceResult<HelloMessage> {
        let url = self.url(HELLO_PATH);
        self.send_json(self.client.get(&url), url).await
    }

    async fn encode_base64(&self, request: EncodeRequest) -> ServiceResult<EncodedText> {
        let url = self.url(ENCODE_PATH);
        self.send_json(self.client.post(&url).json(&request), url)
            .await
    }
}
