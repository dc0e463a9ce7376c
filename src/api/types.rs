use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile attached to posts and comments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A comment as the forum returns it.
///
/// `id` is `None` for optimistic comments that only exist in the local cache
/// until the next refetch replaces them with the server's record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// True when the comment was built locally and not yet confirmed by the server.
    pub fn is_provisional(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of the post feed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Input of the `comments.add` mutation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentInput {
    pub message: String,
    pub post_id: String,
}

/// Input of the `post.infinitePosts` query.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InfinitePostsInput<'a> {
    pub limit: u32,
    pub search: &'a str,
    pub cursor: Option<&'a str>,
}

/// The signed-in user as the session endpoint describes it.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

// ============================================================================
// Wire envelopes
// ============================================================================

/// Request body wrapper used by the tRPC transformer: `{"json": <input>}`.
#[derive(Serialize, Debug)]
pub(crate) struct TrpcInput<T> {
    pub json: T,
}

/// Successful tRPC response: `{"result": {"data": {"json": <output>}}}`.
#[derive(Deserialize, Debug)]
pub(crate) struct TrpcResponse<T> {
    pub result: TrpcResult<T>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct TrpcResult<T> {
    pub data: TrpcData<T>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct TrpcData<T> {
    pub json: T,
}

/// Failed tRPC response: `{"error": {"json": {"message": ..., "code": ...}}}`.
#[derive(Deserialize, Debug)]
pub(crate) struct TrpcErrorResponse {
    pub error: TrpcData<TrpcErrorBody>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct TrpcErrorBody {
    pub message: String,
}

/// Body of `/api/auth/session`. An empty object means nobody is signed in.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct SessionResponse {
    #[serde(default)]
    pub user: Option<SessionUser>,
}
