//! Serialized views of entities.
//!
//! Each view is the flat, password-free JSON shape exposed for a record.
//! Views never touch the database; relationship collections are passed in
//! already loaded (see the repositories' `load_view` helpers).

use crate::entities::{MediaType, comment, follower, media, post, user};
use serde::Serialize;

/// Serialized user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    /// User ID
    pub id: i32,
    /// Login email
    pub email: String,
    /// Unique handle
    pub username: String,
    /// Display name
    pub full_name: Option<String>,
    /// Whether the account is active
    pub is_active: bool,
    /// Number of edges pointing at the user
    pub followers_count: usize,
    /// Number of edges originating from the user
    pub following_count: usize,
}

impl UserView {
    /// Build a view from a user and its loaded follow edges.
    ///
    /// `followers` are edges pointing at the user, `following` are edges
    /// originating from the user.
    #[must_use]
    pub fn from_parts(
        user: &user::Model,
        followers: &[follower::Model],
        following: &[follower::Model],
    ) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            followers_count: followers.len(),
            following_count: following.len(),
        }
    }
}

/// Serialized post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    /// Post ID
    pub id: i32,
    /// Owner of the post
    pub user_id: i32,
    /// Free-form caption
    pub caption: Option<String>,
    /// Where the post was made
    pub location: Option<String>,
    /// Number of comments on the post
    pub comments_count: usize,
    /// Urls in the order the media collection was loaded.
    pub media_urls: Vec<String>,
}

impl PostView {
    /// Build a view from a post and its loaded comments and media.
    #[must_use]
    pub fn from_parts(post: &post::Model, comments: &[comment::Model], media: &[media::Model]) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            caption: post.caption.clone(),
            location: post.location.clone(),
            comments_count: comments.len(),
            media_urls: media.iter().map(|m| m.url.clone()).collect(),
        }
    }
}

/// Serialized media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaView {
    /// Media ID
    pub id: i32,
    /// Image or video, serialized under `type`
    #[serde(rename = "type")]
    pub kind: MediaType,
    /// Location of the file
    pub url: String,
    /// Post the media is attached to
    pub post_id: i32,
}

impl From<media::Model> for MediaView {
    fn from(m: media::Model) -> Self {
        Self {
            id: m.id,
            kind: m.kind,
            url: m.url,
            post_id: m.post_id,
        }
    }
}

/// Serialized comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// Comment ID
    pub id: i32,
    /// Body of the comment
    pub comment_text: String,
    /// The user who wrote the comment
    pub author_id: i32,
    /// The post being commented on
    pub post_id: i32,
}

impl From<comment::Model> for CommentView {
    fn from(c: comment::Model) -> Self {
        Self {
            id: c.id,
            comment_text: c.comment_text,
            author_id: c.author_id,
            post_id: c.post_id,
        }
    }
}

/// Serialized follow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowerView {
    /// The user who follows
    pub user_from_id: i32,
    /// The user being followed
    pub user_to_id: i32,
}

impl From<follower::Model> for FollowerView {
    fn from(f: follower::Model) -> Self {
        Self {
            user_from_id: f.user_from_id,
            user_to_id: f.user_to_id,
        }
    }
}
