use crate::identity::Identity;
use async_graphql::{Context, Guard};

pub const NOT_AUTHENTICATED: &str = "not authenticated";

/// Rejects the field unless an [`Identity`] is attached to the request.
pub struct AuthGuard;

impl Guard for AuthGuard {
    async fn check(&self, ctx: &Context<'_>) -> async_graphql::Result<()> {
        if ctx.data_opt::<Identity>().is_some() {
            Ok(())
        } else {
            Err(NOT_AUTHENTICATED.into())
        }
    }
}
