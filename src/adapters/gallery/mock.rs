//! Mock gallery client for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::models::{GalleryGroup, GalleryImage, GalleryPayload, ResourceLink};
use crate::domain::ports::{GalleryClient, GalleryError};

/// One scripted answer of the mock gallery.
#[derive(Debug, Clone)]
pub enum MockGalleryResponse {
    /// `success: true` with the given groups of links
    Groups(Vec<Vec<String>>),
    /// `success: false`
    Rejected { status: u16 },
    /// Non-success HTTP status
    HttpStatus(u16),
    /// Body that is not a gallery payload
    Malformed,
}

impl MockGalleryResponse {
    /// A single group holding `links` in order.
    pub fn links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Groups(vec![links.into_iter().map(Into::into).collect()])
    }

    pub fn rejected() -> Self {
        Self::Rejected { status: 403 }
    }

    fn into_result(self) -> Result<GalleryPayload, GalleryError> {
        match self {
            Self::Groups(groups) => Ok(GalleryPayload {
                success: true,
                status: Some(200),
                groups: groups
                    .into_iter()
                    .map(|links| GalleryGroup {
                        images: links
                            .into_iter()
                            .map(|link| GalleryImage {
                                link: ResourceLink::new(link),
                            })
                            .collect(),
                    })
                    .collect(),
            }),
            Self::Rejected { status } => Ok(GalleryPayload {
                success: false,
                status: Some(status),
                groups: Vec::new(),
            }),
            Self::HttpStatus(status) => Err(GalleryError::Status {
                status,
                body: String::new(),
            }),
            Self::Malformed => Err(GalleryError::Decode(<serde_json::Error as serde::de::Error>::custom(
                "expected a gallery payload",
            ))),
        }
    }
}

/// Gallery client that replays scripted responses in order.
#[derive(Debug, Default)]
pub struct MockGalleryClient {
    responses: Mutex<VecDeque<MockGalleryResponse>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockGalleryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: impl IntoIterator<Item = MockGalleryResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Wait this long before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GalleryClient for MockGalleryClient {
    async fn fetch_page(&self) -> Result<GalleryPayload, GalleryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front();

        next.map_or_else(
            || {
                Err(GalleryError::Status {
                    status: 500,
                    body: "mock gallery has no scripted response".to_string(),
                })
            },
            MockGalleryResponse::into_result,
        )
    }
}
