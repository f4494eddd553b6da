use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use uuid::Uuid;

/// The caller's identity for an operation-API request.
///
/// This is a development-only stub: it trusts the `X-User-Id` header
/// outright instead of verifying a session or bearer token. Real
/// authentication and league-membership authorization are out of scope;
/// a production deployment swaps this extractor without touching any
/// handler that takes it as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("X-User-Id")
            .ok_or((StatusCode::UNAUTHORIZED, "missing X-User-Id header"))?;

        let raw = header
            .to_str()
            .map_err(|_| (StatusCode::BAD_REQUEST, "X-User-Id header is not valid UTF-8"))?;

        let user_id = Uuid::parse_str(raw)
            .map_err(|_| (StatusCode::BAD_REQUEST, "X-User-Id header is not a valid UUID"))?;

        Ok(AuthContext { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<AuthContext, (StatusCode, &'static str)> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header("X-User-Id", value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        AuthContext::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_user_id_header() {
        let user_id = Uuid::new_v4();
        let result = extract(Some(&user_id.to_string())).await.unwrap();
        assert_eq!(result.user_id, user_id);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let result = extract(None).await;
        assert_eq!(result.unwrap_err().0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_uuid_is_bad_request() {
        let result = extract(Some("not-a-uuid")).await;
        assert_eq!(result.unwrap_err().0, StatusCode::BAD_REQUEST);
    }
}
