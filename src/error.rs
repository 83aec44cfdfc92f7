use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use derive_more::Display;

/// Request failures. Validation variants map to 400, backend ones to 500
/// with a fixed message that never leaks the underlying cause.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "Invalid type")]
    InvalidKind,

    #[display(fmt = "Invalid volume")]
    InvalidVolume,

    #[display(fmt = "{}", _0)]
    Backend(&'static str),
}

impl AppError {
    /// Logs the database error and turns it into a generic 500.
    pub fn backend(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |e| {
            tracing::error!(error = %e, "{}", message);
            AppError::Backend(message)
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidKind | AppError::InvalidVolume => StatusCode::BAD_REQUEST,
            AppError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }
}
