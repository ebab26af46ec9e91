//! Comments: the record type, the in-memory store that owns them, and the
//! routes that expose the store over HTTP.

mod model;
mod store;

pub mod routes;

pub use model::{Comment, CommentId};
pub use store::{CommentStore, StoreError};
