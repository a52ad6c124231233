//! HTTP response building module
//!
//! Provides builders for the two responses the server ever sends, decoupled
//! from how resources are located.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, SERVER};
use hyper::{Response, StatusCode};

/// Build 200 OK response carrying a resource's raw bytes
pub fn build_resource_response(
    data: Vec<u8>,
    content_type: &str,
    server_name: &str,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, data.len())
        .header(SERVER, server_name)
        .body(Full::new(Bytes::from(data)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response naming the path that was requested
pub fn build_not_found_response(path: &str, server_name: &str) -> Response<Full<Bytes>> {
    let body = format!("File not found {path}");
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, body.len())
        .header(SERVER, server_name)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = StatusCode::NOT_FOUND;
            resp
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_resource_response() {
        let resp = build_resource_response(b"\x00DICM\xff".to_vec(), "text/html", "wado-server");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "6");
        assert_eq!(resp.headers()[SERVER], "wado-server");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"\x00DICM\xff");
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let resp = build_not_found_response("/dicomweb/studies/1.2.3", "wado-server");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"File not found /dicomweb/studies/1.2.3");
    }

    #[test]
    fn test_invalid_header_value_falls_back() {
        let resp = build_not_found_response("/x", "bad\nname");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get(SERVER).is_none());
    }
}
