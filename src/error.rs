//! Unified error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::comment::StoreError;

/// The error type returned by commentd's fallible startup and serving paths.
///
/// Application-level errors (404, 400, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: parsing the listen address, binding to a port,
/// accepting a connection, or loading seed data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("seed file {}: {source}", path.display())]
    Seed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("seed data: {0}")]
    Store(#[from] StoreError),
}
