//! Gallery payloads and the resource links extracted from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque URI of one fetchable gallery item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceLink(String);

impl ResourceLink {
    pub fn new(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResourceLink {
    fn from(link: String) -> Self {
        Self(link)
    }
}

impl From<&str> for ResourceLink {
    fn from(link: &str) -> Self {
        Self(link.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub link: ResourceLink,
}

/// One gallery entry; entries that are not albums carry no images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryGroup {
    #[serde(default)]
    pub images: Vec<GalleryImage>,
}

/// Parsed response of one gallery request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GalleryPayload {
    pub success: bool,
    pub status: Option<u16>,
    pub groups: Vec<GalleryGroup>,
}

/// Wire shape. `data` is an error object rather than a list when the
/// endpoint reports failure, so it is only interpreted on success.
#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    data: serde_json::Value,
}

impl GalleryPayload {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let envelope: Envelope = serde_json::from_str(body)?;

        let groups = if envelope.success {
            serde_json::from_value(envelope.data)?
        } else {
            Vec::new()
        };

        Ok(Self {
            success: envelope.success,
            status: envelope.status,
            groups,
        })
    }

    /// All links in group order, then item order within each group.
    pub fn into_links(self) -> Vec<ResourceLink> {
        self.groups
            .into_iter()
            .flat_map(|group| group.images.into_iter().map(|image| image.link))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_successful_payload_preserves_order() {
        let body = r#"{
            "success": true,
            "status": 200,
            "data": [
                { "images": [ { "link": "https://i.example/1.jpg" }, { "link": "https://i.example/2.jpg" } ] },
                { "title": "not an album" },
                { "images": [ { "link": "https://i.example/3.jpg" } ] }
            ]
        }"#;

        let payload = GalleryPayload::from_json(body).unwrap();
        assert!(payload.success);
        assert_eq!(payload.status, Some(200));
        assert_eq!(payload.groups.len(), 3);

        let links: Vec<String> = payload.into_links().into_iter().map(ResourceLink::into_inner).collect();
        assert_eq!(
            links,
            vec![
                "https://i.example/1.jpg",
                "https://i.example/2.jpg",
                "https://i.example/3.jpg",
            ]
        );
    }

    #[test]
    fn test_parse_failed_payload_ignores_error_object() {
        let body = r#"{
            "success": false,
            "status": 403,
            "data": { "error": "Permission denied", "request": "/3/gallery/r/cats/page/", "method": "GET" }
        }"#;

        let payload = GalleryPayload::from_json(body).unwrap();
        assert!(!payload.success);
        assert_eq!(payload.status, Some(403));
        assert!(payload.into_links().is_empty());
    }

    #[test]
    fn test_parse_success_without_data_is_an_error() {
        assert!(GalleryPayload::from_json(r#"{ "success": true }"#).is_err());
        assert!(GalleryPayload::from_json("not json").is_err());
    }

    #[test]
    fn test_empty_groups_yield_no_links() {
        let payload = GalleryPayload::from_json(r#"{ "success": true, "data": [ { "images": [] } ] }"#).unwrap();
        assert!(payload.into_links().is_empty());
    }
}
