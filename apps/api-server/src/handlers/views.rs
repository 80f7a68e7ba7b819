//! Domain values to wire DTOs.

use inkwell_core::domain::{Socials, UserProfile};
use inkwell_core::services::{BlogView, CommentView};
use inkwell_shared::dto::{
    AuthorResponse, BlogResponse, CommentResponse, CommenterResponse, SocialsDto, UserResponse,
};

pub fn user_response(profile: UserProfile) -> UserResponse {
    UserResponse {
        id: profile.id,
        name: profile.name,
        email: profile.email,
        bio: profile.bio,
        socials: SocialsDto {
            linkedin: profile.socials.linkedin,
            instagram: profile.socials.instagram,
            x: profile.socials.x,
        },
        last_login: profile.last_login,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    }
}

pub fn socials(dto: SocialsDto) -> Socials {
    Socials {
        linkedin: dto.linkedin,
        instagram: dto.instagram,
        x: dto.x,
    }
}

pub fn comment_response(view: CommentView) -> CommentResponse {
    let CommentView { comment, user } = view;
    CommentResponse {
        id: comment.id,
        user: CommenterResponse {
            id: comment.author_id,
            name: user.map(|u| u.name),
        },
        text: comment.text,
        created_at: comment.created_at,
    }
}

pub fn blog_response(view: BlogView) -> BlogResponse {
    let BlogView {
        blog,
        author,
        comments,
        counts,
    } = view;

    BlogResponse {
        id: blog.id,
        title: blog.title,
        content: blog.content,
        author_id: blog.author_id,
        author: author.map(|a| AuthorResponse {
            id: a.id,
            name: a.name,
            email: a.email,
        }),
        likes: blog.likes.into_iter().collect(),
        dislikes: blog.dislikes.into_iter().collect(),
        comments: comments.into_iter().map(comment_response).collect(),
        likes_count: counts.likes,
        dislikes_count: counts.dislikes,
        comments_count: counts.comments,
        created_at: blog.created_at,
        updated_at: blog.updated_at,
    }
}
