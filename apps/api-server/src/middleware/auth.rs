//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use inkwell_core::domain::UserProfile;
use inkwell_core::services::select_token;

use crate::middleware::error::AppError;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Resolves the session cookie (or a Bearer token) through the
/// authorization gate and loads the identity's profile. Use it in handlers
/// to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.profile.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub profile: UserProfile,
}

impl Identity {
    pub fn id(&self) -> Uuid {
        self.profile.id
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let cookie = req.cookie(SESSION_COOKIE).map(|c| c.value().to_owned());
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                AppError::Internal("AppState not found in app data".to_string())
            })?;

            let token = select_token(cookie.as_deref(), authorization.as_deref());
            let profile = state.gate.authenticate(token).await?;

            Ok(Identity { profile })
        })
    }
}
