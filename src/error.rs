//! Defines the app level error type and conversions to rendered HTML pages.
use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted a transaction form that could not be parsed.
    ///
    /// Handlers should render the form again with the error message rather
    /// than treating this as a server error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist.
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The ledger could not be converted into a PDF document.
    ///
    /// The string holds the message from the PDF library.
    #[error("could not generate the PDF: {0}")]
    RenderError(String),
}

/// The ways a submitted transaction form can be invalid.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    /// A required field was missing or only contained whitespace.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The date was not in the format YYYY-MM-DD or is not a real date.
    #[error("\"{0}\" is not a valid date, use the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The amount was not a whole number.
    #[error("\"{0}\" is not a valid amount, use a whole number")]
    InvalidAmount(String),

    /// The transaction type was neither "income" nor "expense".
    #[error("\"{0}\" is not a valid type, choose either income or expense")]
    InvalidTransactionType(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::RenderError(_) => self.into_plain_text_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into a plain text response.
    ///
    /// Used for endpoints that do not return HTML, such as the PDF export.
    pub fn into_plain_text_response(self) -> Response {
        let (status_code, message) = match self {
            Error::RenderError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Could not generate the PDF: {message}"),
            ),
            Error::Validation(error) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "The requested resource could not be found.".to_owned(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (
            status_code,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}
