use super::loader::CreatorLoader;
use crate::model::{Post as ModelPost, User as ModelUser};
use crate::service::{self, DeleteOutcome, FieldError as ServiceFieldError, PostPage, UpdateOutcome};
use async_graphql::{Context, Enum, InputObject, Object, SimpleObject};

/// A post as exposed over GraphQL.
pub struct Post(pub ModelPost);

impl From<ModelPost> for Post {
    fn from(p: ModelPost) -> Self {
        Self(p)
    }
}

#[Object]
impl Post {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn text(&self) -> &str {
        &self.0.text
    }

    /// The first 50 characters of the text
    async fn text_snippet(&self) -> &str {
        self.0.text_snippet()
    }

    /// Creator's name when the post was written
    async fn creator_name(&self) -> &str {
        &self.0.creator_name
    }

    async fn creator_id(&self) -> i32 {
        self.0.creator_id
    }

    async fn creator(&self, ctx: &Context<'_>) -> async_graphql::Result<User> {
        let loader = ctx.data::<CreatorLoader>()?;
        match loader.load_one(self.0.creator_id).await? {
            Some(user) => Ok(user.into()),
            None => Err(format!("creator {} not found", self.0.creator_id).into()),
        }
    }

    /// Milliseconds since the Unix epoch; usable as a `posts` cursor
    async fn created_at(&self) -> String {
        service::cursor_for(&self.0)
    }

    /// Milliseconds since the Unix epoch
    async fn updated_at(&self) -> String {
        self.0.updated_at.timestamp_millis().to_string()
    }
}

#[derive(SimpleObject, Clone)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<ModelUser> for User {
    fn from(u: ModelUser) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

#[derive(SimpleObject)]
pub struct PaginatedPosts {
    pub posts: Vec<Post>,
    pub has_more: bool,
}

impl From<PostPage> for PaginatedPosts {
    fn from(page: PostPage) -> Self {
        Self {
            posts: page.posts.into_iter().map(Post::from).collect(),
            has_more: page.has_more,
        }
    }
}

#[derive(InputObject)]
pub struct PostInput {
    pub title: String,
    pub text: String,
}

impl From<PostInput> for service::PostInput {
    fn from(input: PostInput) -> Self {
        Self {
            title: input.title,
            text: input.text,
        }
    }
}

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<ServiceFieldError> for FieldError {
    fn from(e: ServiceFieldError) -> Self {
        Self {
            field: e.field,
            message: e.message,
        }
    }
}

fn field_errors(errors: Vec<ServiceFieldError>) -> Option<Vec<FieldError>> {
    Some(errors.into_iter().map(FieldError::from).collect())
}

/// What an ownership-scoped write did.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum WriteOutcome {
    /// The post was changed
    Applied,
    /// No post has the given id
    NotFound,
    /// The post belongs to another user and was left untouched
    Forbidden,
    /// The write could not be performed; see `errors`
    Failed,
}

#[derive(SimpleObject)]
pub struct PostResponse {
    pub errors: Option<Vec<FieldError>>,
    pub post: Option<Post>,
}

impl From<service::WriteResult<ModelPost>> for PostResponse {
    fn from(result: service::WriteResult<ModelPost>) -> Self {
        match result {
            Ok(post) => Self {
                errors: None,
                post: Some(post.into()),
            },
            Err(errors) => Self {
                errors: field_errors(errors),
                post: None,
            },
        }
    }
}

#[derive(SimpleObject)]
pub struct UpdatePostPayload {
    pub outcome: WriteOutcome,
    pub post: Option<Post>,
    pub errors: Option<Vec<FieldError>>,
}

impl From<service::WriteResult<UpdateOutcome>> for UpdatePostPayload {
    fn from(result: service::WriteResult<UpdateOutcome>) -> Self {
        let (outcome, post, errors) = match result {
            Ok(UpdateOutcome::Updated(post)) => (WriteOutcome::Applied, Some(post.into()), None),
            Ok(UpdateOutcome::NotFound) => (WriteOutcome::NotFound, None, None),
            Ok(UpdateOutcome::Forbidden) => (WriteOutcome::Forbidden, None, None),
            Err(errors) => (WriteOutcome::Failed, None, field_errors(errors)),
        };
        Self {
            outcome,
            post,
            errors,
        }
    }
}

#[derive(SimpleObject)]
pub struct DeletePostPayload {
    /// True whenever the request completed, including when nothing matched
    pub deleted: bool,
    pub outcome: WriteOutcome,
    pub errors: Option<Vec<FieldError>>,
}

impl From<service::WriteResult<DeleteOutcome>> for DeletePostPayload {
    fn from(result: service::WriteResult<DeleteOutcome>) -> Self {
        let outcome = match &result {
            Ok(DeleteOutcome::Deleted) => WriteOutcome::Applied,
            Ok(DeleteOutcome::NotFound) => WriteOutcome::NotFound,
            Ok(DeleteOutcome::Forbidden) => WriteOutcome::Forbidden,
            Err(_) => WriteOutcome::Failed,
        };
        Self {
            deleted: result.is_ok(),
            outcome,
            errors: result.err().and_then(field_errors),
        }
    }
}
