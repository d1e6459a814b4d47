//! Prefetching cache in front of the remote gallery.
//!
//! A cache miss fetches a whole gallery page, hands out its first link and
//! keeps the rest in a FIFO pool; later calls drain the pool before touching
//! the network again.

use std::collections::VecDeque;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::adapters::gallery::HttpGalleryClient;
use crate::domain::models::{GalleryConfig, ResourceLink};
use crate::domain::ports::{GalleryClient, GalleryError};

/// Why a fetch produced no resource.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// Network, HTTP status or payload decoding failure
    #[error("gallery transport failure: {0}")]
    Transport(#[from] GalleryError),

    /// The endpoint answered but reported `success: false`
    #[error("gallery reported failure (status {status:?})")]
    Application { status: Option<u16> },

    /// The endpoint reported success without any links
    #[error("gallery payload contained no links")]
    EmptyPayload,

    /// The caller cancelled while the request was in flight
    #[error("gallery fetch cancelled")]
    Cancelled,
}

/// Result of one `ResourceCache::fetch` call.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Served from the pool without a network call
    Cached(ResourceLink),
    /// First link of a freshly fetched page
    Fetched(ResourceLink),
    /// No resource this time; the pool is unchanged
    Unavailable(FetchFailure),
}

impl FetchOutcome {
    pub fn link(&self) -> Option<&ResourceLink> {
        match self {
            Self::Cached(link) | Self::Fetched(link) => Some(link),
            Self::Unavailable(_) => None,
        }
    }

    pub fn into_link(self) -> Option<ResourceLink> {
        match self {
            Self::Cached(link) | Self::Fetched(link) => Some(link),
            Self::Unavailable(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Unavailable(failure) => Some(failure),
            _ => None,
        }
    }

    pub const fn is_cache_hit(&self) -> bool {
        matches!(self, Self::Cached(_))
    }
}

/// Single-owner link cache over a `GalleryClient`.
///
/// `fetch` takes `&mut self`; share one cache between tasks only behind a
/// mutex or a single-consumer channel.
pub struct ResourceCache<C: GalleryClient> {
    client: C,
    pool: VecDeque<ResourceLink>,
}

impl ResourceCache<HttpGalleryClient> {
    /// Cache over the HTTP gallery described by `config`.
    pub fn from_config(config: &GalleryConfig) -> Result<Self, GalleryError> {
        Ok(Self::new(HttpGalleryClient::new(config)?))
    }
}

impl<C: GalleryClient> ResourceCache<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            pool: VecDeque::new(),
        }
    }

    /// Cache whose pool starts with `links`, in order.
    pub fn with_pool(client: C, links: impl IntoIterator<Item = ResourceLink>) -> Self {
        Self {
            client,
            pool: links.into_iter().collect(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Number of links waiting in the pool.
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Pooled links in the order they will be handed out.
    pub fn pool(&self) -> impl Iterator<Item = &ResourceLink> {
        self.pool.iter()
    }

    /// Return the next resource link.
    ///
    /// A pooled link is returned immediately and `cancel` is not consulted.
    /// Otherwise one gallery request is issued and raced against `cancel`.
    /// Failures are logged and reported as `FetchOutcome::Unavailable`; they
    /// never leave a partial page in the pool.
    #[instrument(skip(self, cancel), fields(pooled = self.pool.len()))]
    pub async fn fetch(&mut self, cancel: &CancellationToken) -> FetchOutcome {
        if let Some(link) = self.pool.pop_front() {
            debug!(remaining = self.pool.len(), "serving pooled link");
            return FetchOutcome::Cached(link);
        }

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("gallery fetch cancelled");
                return FetchOutcome::Unavailable(FetchFailure::Cancelled);
            }
            response = self.client.fetch_page() => response,
        };

        let payload = match response {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "failed fetching gallery page");
                return FetchOutcome::Unavailable(FetchFailure::Transport(err));
            }
        };

        if !payload.success {
            warn!(status = ?payload.status, "gallery rejected the request");
            return FetchOutcome::Unavailable(FetchFailure::Application {
                status: payload.status,
            });
        }

        let mut links = payload.into_links().into_iter();
        let Some(first) = links.next() else {
            warn!("gallery reported success but returned no links");
            return FetchOutcome::Unavailable(FetchFailure::EmptyPayload);
        };

        self.pool.extend(links);
        info!(pooled = self.pool.len(), "gallery page cached");
        FetchOutcome::Fetched(first)
    }
}
