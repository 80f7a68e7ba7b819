//! Profile handlers. Every route here requires an [`Identity`].

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkwell_core::services::ProfilePatch;
use inkwell_shared::dto::UpdateProfileRequest;

use crate::handlers::views::{socials, user_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/users/profile
pub async fn profile(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let profile = state.profiles.profile(identity.id()).await?;
    Ok(HttpResponse::Ok().json(user_response(profile)))
}

/// PUT /api/v1/users/completeprofile
pub async fn complete_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = ProfilePatch {
        name: req.name.into(),
        email: req.email.into(),
        bio: req.bio.into(),
        socials: req.socials.map(socials).into(),
    };

    let updated = state.profiles.update_profile(identity.id(), patch).await?;
    Ok(HttpResponse::Ok().json(user_response(updated)))
}

/// GET /api/v1/users/{id}
pub async fn public_profile(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let profile = state.profiles.profile(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user_response(profile)))
}
