use crate::constants::{CONTACTS_CACHE_CONTROL, CONTACTS_FETCH_FAILED};
use crate::error::{log_error, HttpAppError, ValidatedQuery};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reunion_core::gallery::{search_contacts, shuffle_pinned_first};
use reunion_core::{AppError, ContactRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactsQuery {
    /// Matches name, email and blood group case-insensitively; phone and WhatsApp literally
    pub q: Option<String>,
    /// Shuffle every contact except the first
    #[serde(default)]
    pub shuffle: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactsResponse {
    pub success: bool,
    pub contacts: Vec<ContactRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactsErrorResponse {
    pub success: bool,
    pub error: String,
    pub contacts: Vec<ContactRecord>,
}

fn failure(error: &AppError) -> Response {
    log_error(error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ContactsErrorResponse {
            success: false,
            error: CONTACTS_FETCH_FAILED.to_string(),
            contacts: Vec::new(),
        }),
    )
        .into_response()
}

/// Class directory read from the shared spreadsheet.
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "directory",
    params(ContactsQuery),
    responses(
        (status = 200, description = "Contacts in sheet order", body = ContactsResponse),
        (status = 400, description = "Invalid query parameters", body = crate::error::ErrorResponse),
        (status = 500, description = "Sheet could not be fetched or parsed", body = ContactsErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(shuffle = query.shuffle, operation = "list_contacts"))]
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<ContactsQuery>,
) -> Result<Response, HttpAppError> {
    let contacts = match state.contacts.list_contacts().await {
        Ok(contacts) => contacts,
        Err(e) => return Ok(failure(&AppError::from(e))),
    };

    let mut contacts = search_contacts(contacts, query.q.as_deref());
    if query.shuffle {
        shuffle_pinned_first(&mut contacts, query.seed);
    }

    let count = contacts.len();
    tracing::debug!(count, "Contacts listed");

    Ok((
        [(header::CACHE_CONTROL, CONTACTS_CACHE_CONTROL)],
        Json(ContactsResponse {
            success: true,
            contacts,
            count,
        }),
    )
        .into_response())
}
