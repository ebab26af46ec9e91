//! Middleware layer.
//!
//! A middleware receives the request and a [`Next`] handle to the rest of the
//! stack. It may inspect or replace the request, short-circuit with its own
//! response, or await `next.run(req)` and decorate what comes back:
//!
//! ```rust
//! use commentd::middleware::Next;
//! use commentd::{Request, Response, Router};
//!
//! async fn no_store(req: Request, next: Next) -> Response {
//!     let mut res = next.run(req).await;
//!     res.insert_header("cache-control", "no-store");
//!     res
//! }
//!
//! let app = Router::new().layer(no_store);
//! ```
//!
//! Built-in:
//! - [`trace`]: per-request span with method and path; logs status and latency

use std::future::Future;
use std::sync::Arc;

use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

mod trace;

pub use trace::trace;

/// Implemented for every `Fn(Request, Next) -> impl Future<Output = Response>`.
pub trait Middleware: Send + Sync + 'static {
    #[doc(hidden)]
    fn handle(&self, req: Request, next: Next) -> BoxFuture;
}

impl<F, Fut> Middleware for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        Box::pin((self)(req, next))
    }
}

/// The remainder of the middleware stack, ending in the router itself.
pub struct Next {
    router: Arc<Router>,
    index: usize,
}

impl Next {
    pub(crate) fn new(router: Arc<Router>) -> Self {
        Self { router, index: 0 }
    }

    /// Pass the request to the next layer, or to the matched handler when
    /// this is the innermost layer.
    pub async fn run(self, req: Request) -> Response {
        match self.router.layers.get(self.index).cloned() {
            Some(layer) => {
                let next = Next { router: Arc::clone(&self.router), index: self.index + 1 };
                layer.handle(req, next).await
            }
            None => self.router.route(req).await,
        }
    }
}
