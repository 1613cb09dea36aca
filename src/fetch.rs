//! Resource fetching.
//!
//! Data tables and detail documents are retrieved through a [`ResourceFetcher`]. A
//! browser host implements it over HTTP; [`DirFetcher`] serves a site checked out on
//! disk and [`MapFetcher`] keeps resources in memory.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors returned by a [`ResourceFetcher`].
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("request for {path} failed with status {status}")]
    Status { path: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Retrieves the text of a site resource such as `data/publications.csv`.
pub trait ResourceFetcher {
    /// Fetch the resource at `path`, relative to the site root.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the resource is missing or cannot be read.
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

impl<F: ResourceFetcher + ?Sized> ResourceFetcher for &F {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        (**self).fetch(path)
    }
}

/// Serves resources from a directory on disk.
///
/// Paths are resolved relative to the root; paths that would leave the root are
/// reported as not found.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        (!escapes).then(|| self.root.join(relative))
    }
}

impl ResourceFetcher for DirFetcher {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let full = self
            .resolve(path)
            .ok_or_else(|| FetchError::NotFound(path.to_string()))?;
        debug!(path, file = %full.display(), "fetching resource");
        std::fs::read_to_string(&full).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
            _ => FetchError::Io(err),
        })
    }
}

/// Serves resources from memory.
#[derive(Debug, Clone, Default)]
pub struct MapFetcher {
    resources: HashMap<String, String>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource, replacing any previous one at `path`.
    #[must_use]
    pub fn with<P: Into<String>, B: Into<String>>(mut self, path: P, body: B) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert<P: Into<String>, B: Into<String>>(&mut self, path: P, body: B) {
        self.resources.insert(path.into(), body.into());
    }
}

impl ResourceFetcher for MapFetcher {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}
