//! HTTP implementation of [`ForumClient`] against a tRPC + next-auth backend.
//!
//! Procedures are addressed as `/api/trpc/<router>.<procedure>`:
//! - mutations are `POST` with a `{"json": input}` body
//! - queries are `GET` with the same envelope in the `input` query parameter
//!
//! Authentication rides on the session cookie, the same one the browser sends.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::COOKIE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::client::{ApiError, ForumClient};
use super::types::{
    AddCommentInput, Comment, InfinitePostsInput, PostPage, SessionResponse, SessionUser,
    TrpcErrorResponse, TrpcInput, TrpcResponse,
};
use crate::core::cache::PostListKey;

pub const DEFAULT_SESSION_COOKIE: &str = "next-auth.session-token";

pub struct TrpcForumClient {
    base_url: String,
    session_token: Option<String>,
    session_cookie: String,
    client: reqwest::Client,
}

impl TrpcForumClient {
    pub fn new(base_url: String, session_token: Option<String>, session_cookie: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token,
            session_cookie,
            client: reqwest::Client::new(),
        }
    }

    fn procedure_url(&self, procedure: &str) -> String {
        format!("{}/api/trpc/{}", self.base_url, procedure)
    }

    /// Attaches the session cookie when a token is configured.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session_token {
            Some(token) => request.header(COOKIE, format!("{}={}", self.session_cookie, token)),
            None => request,
        }
    }

    async fn mutation<I, O>(&self, procedure: &str, input: &I) -> Result<O, ApiError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        debug!("tRPC mutation {}", procedure);
        let request = self
            .client
            .post(self.procedure_url(procedure))
            .json(&TrpcInput { json: input });
        let response = self.authorize(request).send().await?;
        read_trpc_response(procedure, response).await
    }

    async fn query<I, O>(&self, procedure: &str, input: &I) -> Result<O, ApiError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        debug!("tRPC query {}", procedure);
        let encoded = serde_json::to_string(&TrpcInput { json: input })
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let request = self
            .client
            .get(self.procedure_url(procedure))
            .query(&[("input", encoded)]);
        let response = self.authorize(request).send().await?;
        read_trpc_response(procedure, response).await
    }
}

/// Unwraps a tRPC response, turning error envelopes into [`ApiError::Api`].
async fn read_trpc_response<O: DeserializeOwned>(
    procedure: &str,
    response: reqwest::Response,
) -> Result<O, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<TrpcErrorResponse>(&body)
            .map(|e| e.error.json.message)
            .unwrap_or(body);
        warn!("tRPC {} failed with HTTP {}: {}", procedure, status.as_u16(), message);
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str::<TrpcResponse<O>>(&body)
        .map(|r| r.result.data.json)
        .map_err(|e| ApiError::Parse(format!("{procedure}: {e}")))
}

#[async_trait]
impl ForumClient for TrpcForumClient {
    async fn add_comment(&self, input: &AddCommentInput) -> Result<Comment, ApiError> {
        let comment: Comment = self.mutation("comments.add", input).await?;
        info!(
            "Comment {} created on post {}",
            comment.id.as_deref().unwrap_or("?"),
            input.post_id
        );
        Ok(comment)
    }

    async fn infinite_posts(
        &self,
        key: &PostListKey,
        cursor: Option<&str>,
    ) -> Result<PostPage, ApiError> {
        let input = InfinitePostsInput {
            limit: key.limit,
            search: &key.search,
            cursor,
        };
        let page: PostPage = self.query("post.infinitePosts", &input).await?;
        debug!("Fetched {} posts for {:?}", page.posts.len(), key);
        Ok(page)
    }

    async fn session(&self) -> Result<Option<SessionUser>, ApiError> {
        let url = format!("{}/api/auth/session", self.base_url);
        let response = self.authorize(self.client.get(url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.text().await?;
        // next-auth answers `null` or `{}` when nobody is signed in
        let session: Option<SessionResponse> =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(session.and_then(|s| s.user))
    }

    fn sign_in_url(&self) -> String {
        format!("{}/api/auth/signin", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = TrpcForumClient::new(
            "http://localhost:3000/".to_string(),
            None,
            DEFAULT_SESSION_COOKIE.to_string(),
        );
        assert_eq!(
            client.procedure_url("comments.add"),
            "http://localhost:3000/api/trpc/comments.add"
        );
        assert_eq!(client.sign_in_url(), "http://localhost:3000/api/auth/signin");
    }
}
