//! Authentication handlers.

use actix_web::{HttpResponse, web};

use inkwell_core::services::{Credentials, NewAccount, Session};
use inkwell_shared::MessageResponse;
use inkwell_shared::dto::{AuthResponse, LoginRequest, RegisterRequest};

use crate::handlers::views::user_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn session_body(session: Session) -> AuthResponse {
    AuthResponse {
        token: session.token,
        user: user_response(session.user),
    }
}

/// POST /api/v1/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state
        .auth
        .register(NewAccount {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state.session.issue_cookie(&session.token);
    Ok(HttpResponse::Created()
        .cookie(cookie)
        .json(session_body(session)))
}

/// POST /api/v1/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state
        .auth
        .login(Credentials {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state.session.issue_cookie(&session.token);
    Ok(HttpResponse::Ok().cookie(cookie).json(session_body(session)))
}

/// POST /api/v1/auth/logout - clears the session cookie.
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.session.removal_cookie())
        .json(MessageResponse::new("Logged out successfully"))
}
