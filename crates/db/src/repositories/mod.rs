//! Repositories for data access.
//!
//! Every repository owns a shared handle to the connection pool that is
//! passed in explicitly by the caller.

mod comment;
mod follower;
mod media;
mod post;
mod user;

pub use comment::CommentRepository;
pub use follower::FollowerRepository;
pub use media::MediaRepository;
pub use post::PostRepository;
pub use user::UserRepository;
