use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use axum_helpers::{AUTHENTICATION_FAILED, AppError};
use thiserror::Error;
use validator::ValidationErrors;

pub const ACCOUNT_CREATION_FAILED: &str = "Account creation failed";
pub const USER_UPDATE_FAILED: &str = "User updation failed";
pub const NO_PERMISSION: &str = "No Permission for Update";
pub const NO_USER_FOUND: &str = "No User found";

pub const CAUSE_ID_TAKEN: &str = "already same id is used";
pub const CAUSE_INVALID_SIGNUP: &str = "required id and credential";
pub const CAUSE_IMMUTABLE_FIELD: &str = "not updatable id and credential";
pub const CAUSE_NOTHING_TO_UPDATE: &str = "required displayName or note";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with id '{0}' already exists")]
    AlreadyExists(String),

    #[error("Invalid signup input: {0}")]
    InvalidSignup(#[from] ValidationErrors),

    #[error("User not found")]
    NotFound,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Authenticated id does not match the requested user")]
    Forbidden,

    #[error("id and credential cannot be updated")]
    ImmutableField,

    #[error("Neither displayName nor note given")]
    NothingToUpdate,

    #[error("Unreadable signup body: {0}")]
    MalformedSignup(JsonRejection),

    #[error("Unreadable update body: {0}")]
    MalformedUpdate(JsonRejection),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::AlreadyExists(_) => {
                AppError::bad_request(ACCOUNT_CREATION_FAILED, CAUSE_ID_TAKEN)
            }
            UserError::InvalidSignup(_) => {
                AppError::bad_request(ACCOUNT_CREATION_FAILED, CAUSE_INVALID_SIGNUP)
            }
            UserError::ImmutableField => {
                AppError::bad_request(USER_UPDATE_FAILED, CAUSE_IMMUTABLE_FIELD)
            }
            UserError::NothingToUpdate => {
                AppError::bad_request(USER_UPDATE_FAILED, CAUSE_NOTHING_TO_UPDATE)
            }
            UserError::AuthenticationFailed => {
                AppError::Unauthorized(AUTHENTICATION_FAILED.to_string())
            }
            UserError::Forbidden => AppError::Forbidden(NO_PERMISSION.to_string()),
            UserError::NotFound => AppError::NotFound(NO_USER_FOUND.to_string()),
            UserError::MalformedSignup(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Unreadable signup body");
                AppError::bad_request(ACCOUNT_CREATION_FAILED, CAUSE_INVALID_SIGNUP)
            }
            UserError::MalformedUpdate(rejection) => {
                AppError::bad_request(USER_UPDATE_FAILED, rejection.body_text())
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::AlreadyExists("TaroYamada".into()), StatusCode::BAD_REQUEST),
            (UserError::ImmutableField, StatusCode::BAD_REQUEST),
            (UserError::NothingToUpdate, StatusCode::BAD_REQUEST),
            (UserError::AuthenticationFailed, StatusCode::UNAUTHORIZED),
            (UserError::Forbidden, StatusCode::FORBIDDEN),
            (UserError::NotFound, StatusCode::NOT_FOUND),
        ];

        for (err, expected) in cases {
            let label = err.to_string();
            assert_eq!(AppError::from(err).status(), expected, "{label}");
        }
    }

    #[test]
    fn test_conflict_carries_cause() {
        match AppError::from(UserError::AlreadyExists("TaroYamada".into())) {
            AppError::BadRequest { message, cause } => {
                assert_eq!(message, ACCOUNT_CREATION_FAILED);
                assert_eq!(cause.as_deref(), Some(CAUSE_ID_TAKEN));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
