//! Caller identity extractor
//!
//! The upstream gateway authenticates the user and forwards their id in
//! `X-User-Id`. The role is never taken from the request; it is looked up
//! in the user directory.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderName, HeaderValue},
};
use axum_extra::{
    headers::{self, Header},
    TypedHeader,
};
use mentor_core::{Role, User, UserId};

use crate::response::ApiError;
use crate::state::AppState;

static X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");

/// Typed `X-User-Id` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XUserId(pub UserId);

impl Header for XUserId {
    fn name() -> &'static HeaderName {
        &X_USER_ID
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        values
            .next()
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::parse(s.trim()).ok())
            .map(Self)
            .ok_or_else(headers::Error::invalid)
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        if let Ok(value) = HeaderValue::from_str(&self.0.to_string()) {
            values.extend(std::iter::once(value));
        }
    }
}

/// The identified caller, resolved through the user directory
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: User,
}

impl Caller {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(XUserId(user_id)) =
            TypedHeader::<XUserId>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        ApiError::MissingIdentity
                    } else {
                        ApiError::InvalidIdentity
                    }
                })?;

        let app_state = AppState::from_ref(state);
        let user = app_state
            .service_context()
            .user_directory()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Request from unknown caller");
                ApiError::UnknownCaller
            })?;

        Ok(Self { user })
    }
}
