//! Remote gallery adapters.

pub mod http_client;
pub mod mock;

pub use http_client::HttpGalleryClient;
pub use mock::{MockGalleryClient, MockGalleryResponse};
