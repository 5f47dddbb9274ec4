use async_trait::async_trait;
use curtain_core::{
    ErrorCategory, Method, NetworkClient, NetworkError, NetworkRequest, NetworkResponse,
};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// The real network primitive, backed by reqwest.
///
/// Mirrors fetch: any status code is a response, only transport failures
/// are errors.
#[derive(Clone, Default)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

pub fn to_network_error(e: reqwest::Error, request: &NetworkRequest) -> NetworkError {
    let context = json!({ "url": request.url, "method": request.method.as_str() });
    let message = e.to_string();
    let err = if e.is_timeout() {
        NetworkError::timeout_error(format!("{} timed out: {}", request.url, message))
    } else if e.is_builder() {
        NetworkError::invalid_request(message)
    } else if e.is_connect() || e.is_request() {
        NetworkError::connection_error(message)
    } else if e.is_redirect() {
        NetworkError::new(ErrorCategory::Redirect, message)
    } else if e.is_body() || e.is_decode() {
        NetworkError::body_error(message)
    } else {
        NetworkError::new(ErrorCategory::Unknown, message)
    };
    err.with_context(context)
}

#[async_trait]
impl NetworkClient for HttpClient {
    async fn call(&self, request: NetworkRequest) -> Result<NetworkResponse, NetworkError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| to_network_error(e, &request))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| to_network_error(e, &request))?
            .to_vec();

        Ok(NetworkResponse { status, headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on a local port.
    async fn serve_once(raw: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            socket.write_all(raw.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn methods_map_to_reqwest() {
        assert_eq!(to_reqwest_method(Method::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(Method::Delete), reqwest::Method::DELETE);
        assert_eq!(to_reqwest_method(Method::Options), reqwest::Method::OPTIONS);
    }

    #[tokio::test]
    async fn error_status_is_a_response() {
        let base = serve_once(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 4\r\nx-test: yes\r\nconnection: close\r\n\r\nnope",
        )
        .await;
        let response = HttpClient::new()
            .call(NetworkRequest::get(format!("{}/missing", base)))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.body, b"nope");
        assert!(response.headers.contains(&("x-test".to_string(), "yes".to_string())));
    }

    #[tokio::test]
    async fn malformed_url_is_invalid_request() {
        let err = HttpClient::new()
            .call(NetworkRequest::get("not a url"))
            .await
            .unwrap_err();
        assert_eq!(err.category, ErrorCategory::InvalidRequest);
        assert!(!err.recoverable);
        assert_eq!(err.context["url"], "not a url");
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpClient::new()
            .call(NetworkRequest::get(format!("http://{}/", addr)))
            .await
            .unwrap_err();
        assert_eq!(err.category, ErrorCategory::Network);
        assert!(err.recoverable);
        assert_eq!(err.context["method"], "GET");
    }
}
