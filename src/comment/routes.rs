//! HTTP boundary for the comment store.
//!
//! | Route | Store call | Success |
//! |---|---|---|
//! | `GET /comments` | `list` | JSON array |
//! | `GET /comments/{id}` | `find` | JSON comment |
//! | `PATCH /comments/{id}` | `update` | JSON updated comment |
//! | `DELETE /comments/{id}` | `delete` | JSON removed comment |
//!
//! Unknown and unparseable ids both answer `404` with [`NOT_FOUND_MESSAGE`].

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use tracing::error;

use super::model::{Comment, CommentId};
use super::store::{CommentStore, StoreError};
use crate::handler::Handler;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;

pub const NOT_FOUND_MESSAGE: &str = "Comment not found ⚠️";

/// Routes for the comment collection, all sharing `store`.
pub fn router(store: Arc<CommentStore>) -> Router {
    Router::new()
        .get("/comments", with_store(Arc::clone(&store), index))
        .get("/comments/{id}", with_store(Arc::clone(&store), show))
        .patch("/comments/{id}", with_store(Arc::clone(&store), update))
        .delete("/comments/{id}", with_store(store, destroy))
}

/// Adapts a handler that takes the store into a plain [`Handler`].
fn with_store<F, Fut, R>(store: Arc<CommentStore>, f: F) -> impl Handler
where
    F: Fn(Arc<CommentStore>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    move |req: Request| f(Arc::clone(&store), req)
}

#[derive(Deserialize)]
struct UpdateComment {
    text: String,
}

async fn index(store: Arc<CommentStore>, _req: Request) -> Json<Vec<Comment>> {
    Json(store.list())
}

async fn show(store: Arc<CommentStore>, req: Request) -> Result<Json<Comment>, StoreError> {
    let id = comment_id(&req)?;
    store.find(id).map(Json)
}

async fn update(store: Arc<CommentStore>, req: Request) -> Response {
    let id = match comment_id(&req) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let body: UpdateComment = match req.json() {
        Ok(body) => body,
        Err(rejection) => return rejection.into_response(),
    };
    store.update(id, body.text).map(Json).into_response()
}

async fn destroy(store: Arc<CommentStore>, req: Request) -> Result<Json<Comment>, StoreError> {
    let id = comment_id(&req)?;
    store.delete(id).map(Json)
}

fn comment_id(req: &Request) -> Result<CommentId, StoreError> {
    req.param("id").unwrap_or_default().parse()
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        match self {
            StoreError::NotFound(_) | StoreError::InvalidId(_) => Response::builder()
                .status(Status::NotFound)
                .text(NOT_FOUND_MESSAGE),
            StoreError::DuplicateId(_) => {
                error!("unexpected store error in request path: {self}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}
