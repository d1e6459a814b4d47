use async_trait::async_trait;

use super::errors::GalleryError;
use crate::domain::models::GalleryPayload;

/// Port for the remote gallery endpoint.
///
/// Implementations issue exactly one request per call and never retry;
/// the configured credentials are fixed for the client's lifetime.
#[async_trait]
pub trait GalleryClient: Send + Sync {
    /// Fetch one page of the gallery.
    async fn fetch_page(&self) -> Result<GalleryPayload, GalleryError>;
}
