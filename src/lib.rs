//! # commentd
//!
//! An in-memory comment service with fetch, update and delete by id, served
//! over a minimal hyper-based HTTP layer.
//!
//! The HTTP layer is deliberately small:
//!
//! - Radix-tree routing, one tree per method, via [`matchit`]
//! - hyper with HTTP/1.1 and HTTP/2 auto-detection
//! - Middleware as plain `async fn(Request, Next) -> Response`
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//!
//! TLS, rate limiting and body-size limits belong to the reverse proxy in
//! front of it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use commentd::{CommentStore, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), commentd::Error> {
//!     let store = Arc::new(CommentStore::with_default_seed());
//!     Server::bind("127.0.0.1:3000").await?.serve(commentd::app(store)).await
//! }
//! ```
//!
//! ```text
//! curl localhost:3000/comments/1
//! curl -X PATCH localhost:3000/comments/1 -d '{"text":"edited"}'
//! curl -X DELETE localhost:3000/comments/1
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod comment;
pub mod config;
pub mod middleware;

use std::sync::Arc;

pub use comment::{Comment, CommentId, CommentStore, StoreError};
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::{JsonRejection, Request};
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;

/// The full service: comment routes wrapped in request tracing.
pub fn app(store: Arc<CommentStore>) -> Router {
    comment::routes::router(store).layer(middleware::trace)
}
