use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::booking::BookingError;
use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref err) => match err {
                DatabaseError::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
                DatabaseError::Duplicate => (StatusCode::CONFLICT, "Resource already exists"),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                ),
            },
            AppError::Booking(ref err) => match err {
                BookingError::InvalidTimeFormat(_) => {
                    (StatusCode::BAD_REQUEST, "Invalid time format")
                }
                BookingError::NoServiceSelected => {
                    (StatusCode::BAD_REQUEST, "At least one service must be selected")
                }
                BookingError::SlotUnavailable => {
                    (StatusCode::CONFLICT, "Slot unavailable, please choose another")
                }
                BookingError::BarberNotFound => (StatusCode::NOT_FOUND, "Barber not found"),
                BookingError::StoreUnavailable(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service unavailable, please try again",
                ),
            },
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, "Authentication failed"),
            AppError::Authorization(_) => (StatusCode::FORBIDDEN, "Access denied"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found"),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "details": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(DatabaseError::from(err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::slots::TimeOfDay;

    #[test]
    fn malformed_time_labels_become_bad_requests() {
        let parse_err = "9am".parse::<TimeOfDay>().unwrap_err();
        let err = BookingError::from(parse_err);
        assert!(matches!(err, BookingError::InvalidTimeFormat(ref label) if label == "9am"));

        let response = AppError::Booking(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn booking_errors_map_to_client_statuses() {
        let cases = [
            (BookingError::NoServiceSelected, StatusCode::BAD_REQUEST),
            (BookingError::SlotUnavailable, StatusCode::CONFLICT),
            (BookingError::BarberNotFound, StatusCode::NOT_FOUND),
            (
                BookingError::StoreUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, status) in cases {
            let response = AppError::Booking(err).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn duplicate_records_conflict() {
        let response = AppError::Database(DatabaseError::Duplicate).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
