//! Request dispatch module
//!
//! Entry point for HTTP request processing. The method is never inspected:
//! every request is answered from the URI path alone.

use crate::config::AppState;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{ACCEPT, USER_AGENT};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let uri = req.uri();
    let accept = header_value(&req, ACCEPT);

    logger::log_request(uri, accept.as_deref());

    let response = state.responder.respond(uri.path()).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = http_version(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.accept = accept;
        entry.user_agent = header_value(&req, USER_AGENT);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn header_value<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn http_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Overrides};
    use http_body_util::BodyExt;
    use hyper::{Method, StatusCode};
    use std::io;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log lines in memory
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn state_for(root: &std::path::Path) -> Arc<AppState> {
        let overrides = Overrides {
            root_dir: Some(root.to_string_lossy().into_owned()),
            ..Overrides::default()
        };
        let missing = root.join("no-config").to_string_lossy().into_owned();
        let config = Config::load_from(&missing, &overrides).unwrap();
        Arc::new(AppState::new(config))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    #[tokio::test]
    async fn test_any_method_is_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("study.json"), "[]").unwrap();
        let state = state_for(dir.path());

        for method in [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS] {
            let req = Request::builder()
                .method(method)
                .uri("/study.json")
                .body(Full::new(Bytes::new()))
                .unwrap();
            let resp = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_query_string_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("series"), "series-body").unwrap();
        let state = state_for(dir.path());

        let req = Request::builder()
            .uri("/series?includefield=all")
            .header(ACCEPT, "application/dicom+json")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = handle_request(req, state, peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"series-body");
    }

    #[tokio::test]
    async fn test_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        let req = Request::builder()
            .uri("/dicomweb/studies")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = handle_request(req, state, peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_and_not_found_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        let state = state_for(dir.path());

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let req = Request::builder()
            .uri("/dicomweb/studies/1.2.3?includefield=all")
            .header(ACCEPT, "application/dicom+json")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = Request::builder()
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = handle_request(req, state, peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let output = logs.contents();
        assert!(output.contains(
            "Request url is /dicomweb/studies/1.2.3?includefield=all for accept application/dicom+json"
        ));
        assert!(output.contains("File not found /dicomweb/studies/1.2.3"));
        assert!(output.contains("Request url is / for accept -"));
        assert!(!output.contains("File not found /index.html"));
    }
}
