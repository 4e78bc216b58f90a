use async_graphql::{Context, EmptySubscription, Object, Request, Schema};

use super::guard::AuthGuard;
use super::loader::creator_loader;
use super::types::*;
use crate::identity::Identity;
use crate::model::UserId;
use crate::service::PostService;

pub type PostboardSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: PostService) -> PostboardSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

/// Attaches the per-request data resolvers expect: the caller's identity,
/// when known, and a fresh creator loader.
pub fn prepare_request(request: Request, service: &PostService, identity: Option<Identity>) -> Request {
    let request = request.data(creator_loader(service));
    match identity {
        Some(identity) => request.data(identity),
        None => request,
    }
}

fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a PostService> {
    ctx.data::<PostService>()
}

fn caller(ctx: &Context<'_>) -> async_graphql::Result<UserId> {
    Ok(ctx.data::<Identity>()?.user_id)
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Newest posts first. `limit` is capped at 50; pass the last post's
    /// `createdAt` as `cursor` to fetch the next page.
    async fn posts(
        &self,
        ctx: &Context<'_>,
        limit: i32,
        cursor: Option<String>,
    ) -> async_graphql::Result<PaginatedPosts> {
        let page = service(ctx)?.list_posts(limit, cursor.as_deref()).await?;
        Ok(page.into())
    }

    /// Get a single post by ID
    async fn post(&self, ctx: &Context<'_>, id: i32) -> async_graphql::Result<Option<Post>> {
        let post = service(ctx)?.get_post(id).await?;
        Ok(post.map(Post::from))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a post authored by the caller
    #[graphql(guard = "AuthGuard")]
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        input: PostInput,
    ) -> async_graphql::Result<PostResponse> {
        let caller = caller(ctx)?;
        Ok(service(ctx)?.create_post(caller, input.into()).await.into())
    }

    /// Replace title and text of a post the caller created
    #[graphql(guard = "AuthGuard")]
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: PostInput,
    ) -> async_graphql::Result<UpdatePostPayload> {
        let caller = caller(ctx)?;
        Ok(service(ctx)?.update_post(caller, id, input.into()).await.into())
    }

    /// Delete a post the caller created
    #[graphql(guard = "AuthGuard")]
    async fn delete_post(
        &self,
        ctx: &Context<'_>,
        id: i32,
    ) -> async_graphql::Result<DeletePostPayload> {
        let caller = caller(ctx)?;
        Ok(service(ctx)?.delete_post(caller, id).await.into())
    }
}
