use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("local file could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("data structure is incorrect: {0}")]
    Format(#[from] serde_json::Error),

    #[error("project slug \"{0}\" is not URL-safe")]
    InvalidSlug(String),

    #[error("project slug \"{0}\" is defined more than once")]
    DuplicateSlug(String),

    #[error("content data is invalid: {0}")]
    InvalidContent(String),

    #[error("project \"{0}\" not found")]
    ProjectNotFound(String),

    #[error("missing or invalid fields: {}", .0.join(", "))]
    InvalidSubmission(Vec<&'static str>),

    /// Guards a single `ContactForm`. The POST handler builds a fresh form
    /// per request, so this only surfaces through the form API.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("contact relay failed: {0}")]
    RelayFailed(String),

    #[error("resume is unavailable: {0}")]
    ResumeUnavailable(String),

    #[error("request could not be read: {0}")]
    BadRequest(String),
}

impl ResponseError for FolioError {
    fn status_code(&self) -> StatusCode {
        match self {
            FolioError::ProjectNotFound(_) | FolioError::ResumeUnavailable(_) => {
                StatusCode::NOT_FOUND
            }
            FolioError::BadRequest(_) => StatusCode::BAD_REQUEST,
            FolioError::InvalidSubmission(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FolioError::SubmissionInFlight => StatusCode::CONFLICT,
            FolioError::RelayFailed(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            FolioError::ProjectNotFound(_) => json!({
                "title": "Project Not Found",
                "message": "The project you're looking for doesn't exist.",
            }),
            FolioError::BadRequest(_) => json!({
                "title": "Bad request",
                "message": self.to_string(),
            }),
            FolioError::InvalidSubmission(fields) => json!({
                "title": "Invalid submission",
                "message": self.to_string(),
                "fields": fields,
            }),
            _ => json!({
                "title": "Something went wrong",
                "message": self.to_string(),
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_message() {
        let error = FolioError::ProjectNotFound("nope".to_string());
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "project \"nope\" not found");
    }

    #[test]
    fn invalid_submission_lists_fields() {
        let error = FolioError::InvalidSubmission(vec!["name", "email"]);
        assert_eq!(error.to_string(), "missing or invalid fields: name, email");
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn in_flight_submission_is_a_conflict() {
        let error = FolioError::SubmissionInFlight;
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn bad_request_carries_title_and_message() {
        let error = FolioError::BadRequest("Content type error".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "request could not be read: Content type error");
    }
}
