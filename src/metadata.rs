//! Off-chain token metadata document.
//!
//! The document follows the common token-list shape (name, symbol,
//! description, image, file properties) and is rendered as a base64
//! `data:application/json` URI so the host can reference it without another
//! storage round trip.

use base64::Engine;
use serde::Serialize;

use crate::error::MinterError;
use crate::request::TokenCreationRequest;

#[derive(Debug, Clone, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<serde_json::Value>,
    pub properties: MetadataProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadataProperties {
    pub files: Vec<MetadataFile>,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadataFile {
    pub uri: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl TokenMetadata {
    pub fn from_request(request: &TokenCreationRequest, image_content_type: &str) -> TokenMetadata {
        TokenMetadata {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            description: request.description.clone(),
            image: request.image_url.clone(),
            attributes: Vec::new(),
            properties: MetadataProperties {
                files: vec![MetadataFile {
                    uri: request.image_url.clone(),
                    content_type: image_content_type.to_string(),
                }],
                category: "image".to_string(),
            },
        }
    }

    /// Render the document as a `data:application/json;base64,…` URI.
    pub fn to_data_uri(&self) -> Result<String, MinterError> {
        let json = serde_json::to_string(self)
            .map_err(|e| MinterError::Codec(format!("serialize metadata: {}", e)))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(json);
        Ok(format!("data:application/json;base64,{}", encoded))
    }
}
