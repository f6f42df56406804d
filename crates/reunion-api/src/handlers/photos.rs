use crate::constants::PHOTOS_CACHE_CONTROL;
use crate::error::{ErrorResponse, HttpAppError, ValidatedQuery};
use crate::state::AppState;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use reunion_core::gallery::{filter_media, paginate, shuffle};
use reunion_core::{AppError, MediaItem, MediaKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PhotosQuery {
    /// `photo` or `video`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Case-insensitive substring of the file name
    pub q: Option<String>,
    #[serde(default)]
    pub shuffle: bool,
    /// Makes `shuffle` reproducible
    pub seed: Option<u64>,
    /// 1-based page number; enables pagination
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotosResponse {
    pub files: Vec<MediaItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

/// List every photo and video in the shared Drive folder.
#[utoipa::path(
    get,
    path = "/api/photos",
    tag = "gallery",
    params(PhotosQuery),
    responses(
        (status = 200, description = "Media in the shared folder", body = PhotosResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 403, description = "Origin not allowed or Drive denied access", body = ErrorResponse),
        (status = 404, description = "Folder missing or contains no media", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded"),
        (status = 500, description = "Configuration or upstream failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, query),
    fields(
        kind = ?query.kind,
        page = ?query.page,
        shuffle = query.shuffle,
        operation = "list_photos"
    )
)]
pub async fn list_photos(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<PhotosQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let kind = query
        .kind
        .as_deref()
        .map(str::parse::<MediaKind>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let items = state.media.list_media().await?;
    let fetched = items.len();

    let mut files = filter_media(items, kind, query.q.as_deref());
    if query.shuffle {
        shuffle(&mut files, query.seed);
    }

    let body = if query.page.is_some() || query.per_page.is_some() {
        let page = paginate(
            &files,
            query.page.unwrap_or(1),
            query
                .per_page
                .unwrap_or_else(|| state.config.gallery_page_size()),
        );
        PhotosResponse {
            files: page.items,
            page: Some(page.page),
            per_page: Some(page.per_page),
            total: Some(page.total),
            has_more: Some(page.has_more),
        }
    } else {
        PhotosResponse {
            files,
            page: None,
            per_page: None,
            total: None,
            has_more: None,
        }
    };

    tracing::debug!(fetched, returned = body.files.len(), "Gallery listed");

    Ok((
        [(header::CACHE_CONTROL, PHOTOS_CACHE_CONTROL)],
        Json(body),
    ))
}
