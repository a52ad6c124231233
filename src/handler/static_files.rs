//! Static file serving module
//!
//! Maps a request path onto the root directory, loads the file and turns the
//! outcome into a response. Every failure is answered with 404; the reason is
//! only logged.

use crate::config::{HttpConfig, StorageConfig};
use crate::error::ResourceError;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Served in place of `/`
const INDEX_PATH: &str = "/index.html";

/// A file loaded from the root directory
#[derive(Debug)]
pub struct Resource {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Resolves request paths against the root directory and answers them
#[derive(Debug, Clone)]
pub struct StaticFileResponder {
    root_dir: PathBuf,
    reject_traversal: bool,
    content_type: String,
    server_name: String,
}

impl StaticFileResponder {
    pub fn new(storage: &StorageConfig, http: &HttpConfig) -> Self {
        Self {
            root_dir: storage.root_dir.clone(),
            reject_traversal: storage.reject_traversal,
            content_type: http.content_type.clone(),
            server_name: http.server_name.clone(),
        }
    }

    /// `/` becomes `/index.html`; any other path is returned untouched
    pub fn normalize(path: &str) -> &str {
        if path == "/" {
            INDEX_PATH
        } else {
            path
        }
    }

    /// Candidate file for `path`: the root directory with the normalized path
    /// appended as a plain string. `..` segments are kept as they are.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let mut candidate = OsString::from(self.root_dir.as_os_str());
        candidate.push(Self::normalize(path));
        PathBuf::from(candidate)
    }

    /// Read the resource behind `path` fully into memory
    pub async fn load(&self, path: &str) -> Result<Resource, ResourceError> {
        let candidate = self.resolve(path);

        if self.reject_traversal && has_parent_segment(Self::normalize(path)) {
            return Err(ResourceError::Traversal { path: candidate });
        }

        let metadata = fs::metadata(&candidate)
            .await
            .map_err(|e| ResourceError::from_io(&candidate, e))?;
        if !metadata.is_file() {
            return Err(ResourceError::NotAFile { path: candidate });
        }

        let contents = fs::read(&candidate)
            .await
            .map_err(|e| ResourceError::from_io(&candidate, e))?;

        Ok(Resource {
            path: candidate,
            contents,
        })
    }

    /// Answer a request for `path`
    pub async fn respond(&self, path: &str) -> Response<Full<Bytes>> {
        match self.load(path).await {
            Ok(resource) => {
                logger::log_resource_served(&resource.path, resource.contents.len());
                http::build_resource_response(
                    resource.contents,
                    &self.content_type,
                    &self.server_name,
                )
            }
            Err(err) => {
                let normalized = Self::normalize(path);
                logger::log_not_found(normalized, &err);
                http::build_not_found_response(normalized, &self.server_name)
            }
        }
    }
}

fn has_parent_segment(path: &str) -> bool {
    Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}
