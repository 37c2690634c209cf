use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    exp: usize,
    iat: usize,
    sub: String,
}

/// Verifies HS256 access tokens signed with the shared `SECRET_KEY`.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret_key: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret_key.as_ref()),
            validation: Validation::default(),
        }
    }

    pub fn user_id(&self, token: &str) -> Result<i32, ApiError> {
        let token = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| ApiError::InvalidToken)?;
        token
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| ApiError::InvalidToken)
    }
}

/// The caller identified by the `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
}

impl<S> FromRequestParts<S> for AuthUser
where
    TokenVerifier: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(ApiError::AuthenticationFailed)?
            .to_str()
            .map_err(|_| ApiError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::InvalidToken)?;

        let verifier = TokenVerifier::from_ref(state);
        let id = verifier.user_id(token)?;

        Ok(AuthUser { id })
    }
}

#[cfg(test)]
pub(crate) fn issue_token(secret_key: &str, sub: &str, expires_in: chrono::TimeDelta) -> String {
    use jsonwebtoken::EncodingKey;

    let now = chrono::Utc::now();
    let claims = Claims {
        exp: (now + expires_in).timestamp() as usize,
        iat: now.timestamp() as usize,
        sub: sub.to_string(),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(secret_key.as_ref()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use chrono::TimeDelta;

    use super::*;

    const SECRET: &str = "test-secret";

    async fn extract(header: Option<String>) -> Result<AuthUser, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &TokenVerifier::new(SECRET)).await
    }

    #[tokio::test]
    async fn test_valid_token() {
        let token = issue_token(SECRET, "42", TimeDelta::hours(8));
        let user = extract(Some(format!("Bearer {token}"))).await.unwrap();
        assert_eq!(user, AuthUser { id: 42 });
    }

    #[tokio::test]
    async fn test_missing_header() {
        assert!(matches!(
            extract(None).await,
            Err(ApiError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn test_not_bearer() {
        let token = issue_token(SECRET, "42", TimeDelta::hours(8));
        assert!(matches!(
            extract(Some(format!("Basic {token}"))).await,
            Err(ApiError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_wrong_secret() {
        let token = issue_token("another-secret", "42", TimeDelta::hours(8));
        assert!(matches!(
            extract(Some(format!("Bearer {token}"))).await,
            Err(ApiError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let token = issue_token(SECRET, "42", TimeDelta::hours(-2));
        assert!(matches!(
            extract(Some(format!("Bearer {token}"))).await,
            Err(ApiError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_non_numeric_subject() {
        let token = issue_token(SECRET, "not-a-user", TimeDelta::hours(8));
        assert!(matches!(
            extract(Some(format!("Bearer {token}"))).await,
            Err(ApiError::InvalidToken)
        ));
    }
}
