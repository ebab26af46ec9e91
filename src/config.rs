//! Command-line and environment configuration.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::comment::{Comment, CommentStore};
use crate::error::Error;

/// Runtime configuration. Every flag can also be set through its env var.
#[derive(Debug, Clone, Parser)]
#[command(name = "commentd", version, about = "In-memory comment service")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "COMMENTD_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,

    /// JSON file holding an array of `{"id": .., "text": ..}` seed comments.
    #[arg(long, env = "COMMENTD_SEED")]
    pub seed: Option<PathBuf>,

    /// tracing-subscriber filter directive, e.g. `info` or `commentd=debug`.
    #[arg(long = "log", env = "COMMENTD_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    /// Builds the store from the seed file, or the default seed if none is set.
    pub fn load_store(&self) -> Result<CommentStore, Error> {
        match &self.seed {
            Some(path) => load_seed(path),
            None => Ok(CommentStore::with_default_seed()),
        }
    }
}

fn load_seed(path: &Path) -> Result<CommentStore, Error> {
    let raw = std::fs::read(path)?;
    let comments: Vec<Comment> = serde_json::from_slice(&raw).map_err(|source| Error::Seed {
        path: path.to_owned(),
        source,
    })?;
    Ok(CommentStore::seeded(comments)?)
}
