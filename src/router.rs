//! Radix-tree request router.
//!
//! One matchit tree per HTTP method, O(path-length) lookup. Middleware layers
//! wrap the whole routing step, so they also see 404 and 405 responses.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Body;
use matchit::Router as MatchitRouter;
use tracing::warn;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and hand it to [`Server::serve`](crate::Server::serve),
/// or wrap it in an `Arc` and drive it directly with [`Router::oneshot`].
/// Every builder method returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    /// Outermost layer first.
    pub(crate) layers: Vec<Arc<dyn Middleware>>,
}

pub(crate) enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), layers: Vec::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and are read back with
    /// [`Request::param`].
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid matchit route or conflicts with a route
    /// already registered for `method`. Routes are fixed at startup, so this
    /// is a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Wrap every route, including the 404/405 fallbacks, in `middleware`.
    ///
    /// The layer added last runs first.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.layers.insert(0, Arc::new(middleware));
        self
    }

    /// Dispatch one request through the middleware stack and the routes.
    ///
    /// The body is collected in full before any handler runs. A body that
    /// fails mid-stream yields `400 Bad Request`.
    pub async fn oneshot<B>(self: &Arc<Self>, req: http::Request<B>) -> Response
    where
        B: Body<Data = Bytes>,
        B::Error: Display,
    {
        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(path = parts.uri.path(), "failed to read request body: {e}");
                return Response::status(Status::BadRequest);
            }
        };

        let req = Request::new(parts.method, parts.uri.path().to_owned(), parts.headers, body);
        Next::new(Arc::clone(self)).run(req).await
    }

    /// Innermost step of the chain: find the handler and call it.
    pub(crate) async fn route(&self, mut req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Lookup::Found(handler, params) => {
                req.params = params;
                handler.call(req).await
            }
            Lookup::MethodNotAllowed(allowed) => {
                let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
                Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .no_body()
            }
            Lookup::NotFound => Response::status(Status::NotFound),
        }
    }

    pub(crate) fn lookup(&self, method: &http::Method, path: &str) -> Lookup {
        if let Ok(method) = Method::try_from(method) {
            if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
                let handler = Arc::clone(matched.value);
                let params = matched.params.iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                return Lookup::Found(handler, params);
            }
        }

        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| *m)
            .collect();
        if allowed.is_empty() {
            return Lookup::NotFound;
        }
        allowed.sort();
        Lookup::MethodNotAllowed(allowed)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
