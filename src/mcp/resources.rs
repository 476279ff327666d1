//! MCP resources: the embedded category taxonomy.

use async_trait::async_trait;
use pmcp::types::{Content, ListResourcesResult, ReadResourceResult, ResourceInfo};
use pmcp::{Error, RequestHandlerExtra, ResourceHandler};

use crate::taxonomy::{TAXONOMY_JSON, TAXONOMY_URI};

/// Resource name of the taxonomy document
pub const TAXONOMY_RESOURCE: &str = "category-taxonomy";

const JSON_MIME_TYPE: &str = "application/json";

/// Serves the taxonomy JSON verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxonomyResource;

impl TaxonomyResource {
    /// Resource listing entry
    pub fn info() -> Result<ResourceInfo, Error> {
        let info = serde_json::json!({
            "uri": TAXONOMY_URI,
            "name": TAXONOMY_RESOURCE,
            "title": "Category Taxonomy",
            "description": "A JSON representation of the arXiv category taxonomy, showing all \
                            category tags and their descriptions.",
            "mimeType": JSON_MIME_TYPE
        });
        serde_json::from_value(info).map_err(|e| Error::internal(e.to_string()))
    }

    /// Read `uri`, which must be the taxonomy URI
    pub fn read_uri(uri: &str) -> Result<ReadResourceResult, Error> {
        if uri != TAXONOMY_URI {
            return Err(Error::invalid_params(format!("Unknown resource: {}", uri)));
        }
        Ok(ReadResourceResult {
            contents: vec![Content::Resource {
                uri: uri.to_string(),
                text: Some(TAXONOMY_JSON.to_string()),
                mime_type: Some(JSON_MIME_TYPE.to_string()),
            }],
        })
    }
}

#[async_trait]
impl ResourceHandler for TaxonomyResource {
    async fn read(&self, uri: &str, _extra: RequestHandlerExtra) -> Result<ReadResourceResult, Error> {
        tracing::debug!("Reading resource {}", uri);
        Self::read_uri(uri)
    }

    async fn list(
        &self,
        _cursor: Option<String>,
        _extra: RequestHandlerExtra,
    ) -> Result<ListResourcesResult, Error> {
        Ok(ListResourcesResult {
            resources: vec![Self::info()?],
            next_cursor: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info() {
        let info = TaxonomyResource::info().unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["uri"], "file://arxiv/taxonomy.json");
        assert_eq!(json["name"], "category-taxonomy");
        assert_eq!(json["mimeType"], "application/json");
    }

    #[test]
    fn test_read_serves_asset_verbatim() {
        let result = TaxonomyResource::read_uri(TAXONOMY_URI).unwrap();
        assert_eq!(result.contents.len(), 1);
        match &result.contents[0] {
            Content::Resource {
                uri,
                text,
                mime_type,
            } => {
                assert_eq!(uri, TAXONOMY_URI);
                assert_eq!(text.as_deref(), Some(TAXONOMY_JSON));
                assert_eq!(mime_type.as_deref(), Some("application/json"));
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_read_unknown_uri() {
        assert!(TaxonomyResource::read_uri("file://arxiv/other.json").is_err());
    }
}
