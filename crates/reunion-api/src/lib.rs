//! Reunion API Library
//!
//! HTTP handlers, middleware and application setup for the reunion backend.

mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
pub mod setup;
mod utils;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
