//! reqwest implementation of the GalleryClient port.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::domain::models::{GalleryConfig, GalleryPayload};
use crate::domain::ports::{GalleryClient, GalleryError};

/// HTTP client for the remote gallery endpoint.
///
/// The `Authorization: Client-ID <token>` header is installed once as a
/// default header when the client is built, so every request carries it and
/// the credentials cannot change for the client's lifetime.
#[derive(Debug, Clone)]
pub struct HttpGalleryClient {
    http_client: ReqwestClient,
    base_url: String,
}

impl HttpGalleryClient {
    pub fn new(config: &GalleryConfig) -> Result<Self, GalleryError> {
        if config.client_id.trim().is_empty() {
            return Err(GalleryError::MissingClientId);
        }
        if config.timeout_secs == 0 {
            return Err(GalleryError::ZeroTimeout);
        }

        let mut authorization = HeaderValue::from_str(&format!("Client-ID {}", config.client_id))
            .map_err(|_| GalleryError::InvalidClientId)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);

        let http_client = ReqwestClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GalleryClient for HttpGalleryClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self) -> Result<GalleryPayload, GalleryError> {
        let response = self.http_client.get(&self.base_url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GalleryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = GalleryPayload::from_json(&body)?;
        debug!(success = payload.success, groups = payload.groups.len(), "gallery page received");
        Ok(payload)
    }
}
