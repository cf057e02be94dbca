//! Defines the page and route handler for requests to pages that do not exist.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Renders the 404 page.
pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Html(
                error_view(
                    "Not Found",
                    "404",
                    "Something's missing.",
                    "Sorry, we can't find that page. You'll find lots to explore on the ledger page.",
                )
                .into_string(),
            ),
        )
            .into_response()
    }
}

/// The fallback route handler for paths that do not match any route.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
