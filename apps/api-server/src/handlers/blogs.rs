//! Blog handlers: CRUD plus likes, dislikes and comments.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkwell_core::services::{BlogPatch, NewBlog};
use inkwell_shared::MessageResponse;
use inkwell_shared::dto::{
    BlogQuery, BlogResponse, CommentRequest, CommentsResponse, CreateBlogRequest,
    DislikeResponse, LikeResponse, UpdateBlogRequest,
};

use crate::handlers::views::{blog_response, comment_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/blogs?search=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<BlogQuery>,
) -> AppResult<HttpResponse> {
    let views = state.blogs.get_all(query.search.as_deref()).await?;
    let body: Vec<BlogResponse> = views.into_iter().map(blog_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/blogs/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let view = state.blogs.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(blog_response(view)))
}

/// GET /api/v1/blogs/my/blogs
pub async fn mine(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let views = state.blogs.get_mine(identity.id()).await?;
    let body: Vec<BlogResponse> = views.into_iter().map(blog_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/v1/blogs
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let view = state
        .blogs
        .create(
            identity.id(),
            NewBlog {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(blog_response(view)))
}

/// PUT /api/v1/blogs/{id} - author only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = BlogPatch {
        title: req.title.into(),
        content: req.content.into(),
    };

    let view = state
        .blogs
        .update(path.into_inner(), identity.id(), patch)
        .await?;
    Ok(HttpResponse::Ok().json(blog_response(view)))
}

/// DELETE /api/v1/blogs/{id} - author only.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.blogs.delete(path.into_inner(), identity.id()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Blog deleted successfully")))
}

/// PUT /api/v1/blogs/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let likes = state
        .interactions
        .like(path.into_inner(), identity.id())
        .await?;

    Ok(HttpResponse::Ok().json(LikeResponse {
        message: "Like status updated".to_string(),
        likes,
    }))
}

/// PUT /api/v1/blogs/{id}/dislike
pub async fn dislike(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let dislikes = state
        .interactions
        .dislike(path.into_inner(), identity.id())
        .await?;

    Ok(HttpResponse::Ok().json(DislikeResponse {
        message: "Dislike status updated".to_string(),
        dislikes,
    }))
}

/// POST /api/v1/blogs/{id}/comment
pub async fn comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comments = state
        .interactions
        .add_comment(path.into_inner(), identity.id(), &body.text)
        .await?;

    Ok(HttpResponse::Ok().json(CommentsResponse {
        message: "Comment added successfully".to_string(),
        comments: comments.into_iter().map(comment_response).collect(),
    }))
}
