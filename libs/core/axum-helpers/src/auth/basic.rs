use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use crate::errors::AppError;

/// Message returned whenever credentials are missing or do not match.
pub const AUTHENTICATION_FAILED: &str = "Authentication Failed";

/// Credentials taken from an `Authorization: Basic ...` header.
///
/// Extraction fails with `401 Authentication Failed` when the header is
/// missing, uses another scheme, is not valid base64 or has no `:` separator.
/// A successful extraction says nothing about whether the credentials are
/// correct; that is up to the handler.
///
/// # Example
/// ```ignore
/// async fn close(auth: BasicAuth) -> String {
///     format!("closing {}", auth.username)
/// }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl<S> FromRequestParts<S> for BasicAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    tracing::debug!(reason = %rejection, "No usable Basic credentials");
                    AppError::Unauthorized(AUTHENTICATION_FAILED.to_string())
                })?;

        Ok(Self {
            username: basic.username().to_string(),
            password: basic.password().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode, header::AUTHORIZATION};
    use base64::{Engine, engine::general_purpose::STANDARD};

    async fn extract(header: Option<&str>) -> Result<BasicAuth, AppError> {
        let mut builder = Request::builder().uri("/close");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        BasicAuth::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_decodes_id_and_credential() {
        let header = format!("Basic {}", STANDARD.encode("TaroYamada:PaSSwd4TY"));
        let auth = extract(Some(&header)).await.unwrap();

        assert_eq!(auth.username, "TaroYamada");
        assert_eq!(auth.password, "PaSSwd4TY");
    }

    #[tokio::test]
    async fn test_credential_may_contain_colons() {
        let header = format!("Basic {}", STANDARD.encode("TaroYamada:pa:ss:wd"));
        let auth = extract(Some(&header)).await.unwrap();

        assert_eq!(auth.password, "pa:ss:wd");
    }

    #[tokio::test]
    async fn test_rejects_unusable_headers() {
        let not_base64 = "Basic !!!not-base64!!!".to_string();
        let no_colon = format!("Basic {}", STANDARD.encode("TaroYamada"));
        let bearer = "Bearer some.jwt.token".to_string();

        for header in [None, Some(not_base64), Some(no_colon), Some(bearer)] {
            let err = extract(header.as_deref()).await.unwrap_err();
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED, "header: {header:?}");
            assert!(err.to_string().contains(AUTHENTICATION_FAILED));
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let auth = BasicAuth {
            username: "TaroYamada".to_string(),
            password: "PaSSwd4TY".to_string(),
        };
        let rendered = format!("{auth:?}");

        assert!(rendered.contains("TaroYamada"));
        assert!(!rendered.contains("PaSSwd4TY"));
    }
}
