use super::operators::VaultState;
use super::types::{PingResponse, UploadedFile};
use axum::Json;
use axum::extract::{Extension, Multipart, Query};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct GroupParams {
    #[serde(rename = "groupId")]
    pub group_id: String,
}

#[derive(Deserialize)]
pub struct ElementParams {
    #[serde(rename = "groupId")]
    pub group_id: String,
    #[serde(rename = "elementId")]
    pub element_id: String,
}

// only allow alphanumeric, underscore and hyphen
fn valid_identifier(value: &str) -> bool {
    Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap().is_match(value)
}

pub async fn handle_ping(Extension(state): Extension<Arc<VaultState>>) -> Json<PingResponse> {
    Json(PingResponse {
        id: state.config.id.clone(),
        instance: "vault".to_string(),
        extended: String::new(),
    })
}

pub async fn handle_groups(Extension(state): Extension<Arc<VaultState>>) -> Json<Vec<String>> {
    Json(state.get_groups().await)
}

pub async fn handle_group_list(
    Extension(state): Extension<Arc<VaultState>>,
    Query(params): Query<GroupParams>,
) -> Response {
    if !valid_identifier(&params.group_id) {
        return (StatusCode::BAD_REQUEST, "Invalid Group ID").into_response();
    }

    Json(state.records_in_group(&params.group_id).await).into_response()
}

pub async fn handle_group_upload(
    Extension(state): Extension<Arc<VaultState>>,
    Query(params): Query<GroupParams>,
    mut multipart: Multipart,
) -> Response {
    if !valid_identifier(&params.group_id) {
        return (StatusCode::BAD_REQUEST, "Invalid Group ID").into_response();
    }

    let mut files = Vec::new();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("files") {
                    continue;
                }
                let name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        if bytes.len() > state.config.in_memory_upload_size {
                            return (StatusCode::BAD_REQUEST, "files too large").into_response();
                        }
                        files.push(UploadedFile {
                            name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                    // Body-limit violations surface here as read errors.
                    Err(e) => {
                        tracing::error!("Failed to read multipart field: {}", e);
                        return (StatusCode::BAD_REQUEST, "files too large").into_response();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to parse multipart body: {}", e);
                return (StatusCode::BAD_REQUEST, "invalid multipart body").into_response();
            }
        }
    }

    if files.is_empty() {
        return (StatusCode::BAD_REQUEST, "No files uploaded").into_response();
    }

    match state.put_group(&params.group_id, files).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::error!("Failed to store upload for group {}: {}", params.group_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to store upload").into_response()
        }
    }
}

pub async fn handle_group_delete(
    Extension(state): Extension<Arc<VaultState>>,
    Query(params): Query<GroupParams>,
) -> Response {
    if !valid_identifier(&params.group_id) {
        return (StatusCode::BAD_REQUEST, "Invalid Group ID").into_response();
    }

    match state.delete_group(&params.group_id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::error!("Failed to delete group {}: {}", params.group_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to delete group").into_response()
        }
    }
}

pub async fn handle_element_get(
    Extension(state): Extension<Arc<VaultState>>,
    Query(params): Query<ElementParams>,
) -> Response {
    if !valid_identifier(&params.group_id) {
        return (StatusCode::BAD_REQUEST, "Invalid Group ID").into_response();
    }
    if !valid_identifier(&params.element_id) {
        return (StatusCode::BAD_REQUEST, "Invalid Element ID").into_response();
    }

    match state.get_element(&params.element_id).await {
        Ok((bytes, content_type)) => {
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read element {}: {}", params.element_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "element not available").into_response()
        }
    }
}

pub async fn handle_element_delete(
    Extension(state): Extension<Arc<VaultState>>,
    Query(params): Query<ElementParams>,
) -> Response {
    if !valid_identifier(&params.group_id) {
        return (StatusCode::BAD_REQUEST, "Invalid Group ID").into_response();
    }
    if !valid_identifier(&params.element_id) {
        return (StatusCode::BAD_REQUEST, "Invalid Element ID").into_response();
    }

    match state.delete_element(&params.element_id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::error!("Failed to delete element {}: {}", params.element_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to delete element").into_response()
        }
    }
}
