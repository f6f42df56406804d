//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use reunion_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reunion API",
        version = "0.1.0",
        description = "Read-only backend for the class reunion site: a photo/video gallery proxied from a shared Google Drive folder, a contact directory read from a Google Sheet, and headline statistics."
    ),
    paths(
        handlers::photos::list_photos,
        handlers::contacts::list_contacts,
        handlers::stats::get_stats,
        handlers::health::health_check,
        handlers::health::liveness_check,
    ),
    components(schemas(
        models::MediaItem,
        models::MediaKind,
        models::ContactRecord,
        models::StatsSnapshot,
        handlers::photos::PhotosResponse,
        handlers::contacts::ContactsResponse,
        handlers::contacts::ContactsErrorResponse,
        handlers::stats::StatsResponse,
        handlers::health::HealthCheckResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "gallery", description = "Photos and videos from the shared Drive folder"),
        (name = "directory", description = "Classmate contact directory"),
        (name = "stats", description = "Landing page statistics"),
        (name = "health", description = "Liveness and configuration probes"),
    )
)]
pub struct ApiDoc;
