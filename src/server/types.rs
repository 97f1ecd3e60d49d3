use crate::relay::ImageData;
use serde::{Deserialize, Serialize};

/// Fields are optional so the handlers, not the JSON layer, answer missing
/// fields with the contractual 400 body.
#[derive(Debug, Deserialize)]
pub struct SwapRequest {
    #[serde(default)]
    pub target: Option<ImageData>,
    #[serde(default)]
    pub outfit: Option<ImageData>,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub image: Option<ImageData>,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
