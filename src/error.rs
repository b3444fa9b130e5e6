//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    error_pages::{InternalServerError, NotFoundError},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount of an expense was not a positive number.
    ///
    /// Callers should pass in the text that failed to parse or the rejected number.
    #[error("\"{0}\" is not a valid amount, amounts must be positive numbers")]
    InvalidAmount(String),

    /// The category of an expense was empty or only whitespace.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// A date string was not a calendar date in the format YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, dates must be formatted as YYYY-MM-DD")]
    InvalidDate(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
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
                    "Could not get local timezone \"{timezone}\". Check the --timezone flag and \
                    ensure it is a valid, canonical timezone string"
                ),
            }
            .into_response(),
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
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidAmount(_) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid amount".to_owned(),
                    details: "Enter an amount greater than zero, e.g. 12.50.".to_owned(),
                },
            ),
            Error::EmptyCategory => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid category".to_owned(),
                    details: "The category cannot be empty.".to_owned(),
                },
            ),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid date".to_owned(),
                    details: format!("\"{date}\" is not a date. Use the format YYYY-MM-DD."),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check the --timezone flag and \
                        ensure it is a valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        test_utils::{assert_valid_html, parse_html_document, parse_html_fragment},
    };

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[tokio::test]
    async fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
    }

    #[tokio::test]
    async fn invalid_amount_renders_bad_request_alert() {
        let response = Error::InvalidAmount("-1".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let fragment = parse_html_fragment(response).await;
        let text = fragment.root_element().text().collect::<String>();
        assert!(
            text.contains("Invalid amount"),
            "want alert to contain \"Invalid amount\", got {text:?}"
        );
    }

    #[test]
    fn lock_error_is_internal_server_error() {
        let response = Error::DatabaseLockError.into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
