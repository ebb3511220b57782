//! Index page serving module
//!
//! Only `/` is served. The file is read from disk on every request so edits show up
//! without a restart.

use super::Handler;
use crate::http::{self, mime, HttpResponse};
use crate::logger::Logger;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::io::ErrorKind;

pub struct StaticPage {
    index_file: String,
    logger: Logger,
}

impl StaticPage {
    pub fn new(index_file: impl Into<String>, logger: Logger) -> Self {
        Self {
            index_file: index_file.into(),
            logger,
        }
    }

    async fn serve_index(&self, is_head: bool) -> HttpResponse {
        match tokio::fs::read(&self.index_file).await {
            Ok(content) => http::build_file_response(
                http::no_cache(Response::builder()),
                Bytes::from(content),
                mime::content_type_for(&self.index_file),
                is_head,
            ),
            // Missing page is an ordinary 404
            Err(e) if e.kind() == ErrorKind::NotFound => http::build_404_response(),
            Err(e) => {
                self.logger
                    .error(&format!("Failed to read index file '{}': {e}", self.index_file));
                http::build_500_response(Response::builder())
            }
        }
    }
}

impl Handler for StaticPage {
    async fn call(&self, req: Request<()>) -> HttpResponse {
        if req.uri().path() != "/" {
            return http::build_404_response();
        }
        self.serve_index(req.method() == Method::HEAD).await
    }
}
