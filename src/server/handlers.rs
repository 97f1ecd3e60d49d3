use super::types::{EditRequest, ErrorResponse, ImageResponse, SwapRequest};
use crate::{relay::Relay, Error};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

pub async fn outfit_swap(
    State(state): State<AppState>,
    Json(request): Json<SwapRequest>,
) -> Result<Json<ImageResponse>, HandlerError> {
    let (Some(target), Some(outfit)) = (request.target, request.outfit) else {
        return Err(bad_request("Missing target or outfit image"));
    };

    info!("Received outfit swap request");

    match state.relay.outfit_swap(&target, &outfit).await {
        Ok(image) => {
            info!("Outfit swap succeeded");
            Ok(Json(ImageResponse { image }))
        }
        Err(e) => {
            error!("Outfit swap failed: {}", e);
            Err(relay_error(e))
        }
    }
}

pub async fn edit_image(
    State(state): State<AppState>,
    Json(request): Json<EditRequest>,
) -> Result<Json<ImageResponse>, HandlerError> {
    let (Some(image), Some(prompt)) = (request.image, request.prompt) else {
        return Err(bad_request("Missing image or prompt"));
    };
    if prompt.is_empty() {
        return Err(bad_request("Missing image or prompt"));
    }

    info!("Received image edit request");

    match state.relay.edit_image_with_text(&image, &prompt).await {
        Ok(image) => {
            info!("Image edit succeeded");
            Ok(Json(ImageResponse { image }))
        }
        Err(e) => {
            error!("Image edit failed: {}", e);
            Err(relay_error(e))
        }
    }
}

fn bad_request(message: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn relay_error(e: Error) -> HandlerError {
    let status = if e.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
