pub mod client;
pub mod trpc;
pub mod types;

pub use client::{ApiError, ForumClient};
pub use trpc::TrpcForumClient;
pub use types::{AddCommentInput, Author, Comment, Post, PostPage, SessionUser};
