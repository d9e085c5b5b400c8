use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response variant for a preset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    /// Unique identifier for this variant within the preset
    pub id: String,
    /// HTTP status code for the response (100-599)
    pub status: u16,
    /// Response headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Response body, carried byte-for-byte as defined (JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}
