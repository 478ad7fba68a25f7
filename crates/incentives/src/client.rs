use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::endpoint::incentives_url;
use crate::error::ApiError;
use crate::model::IncentivesResponse;
use crate::source::IncentiveSource;

/// HTTP client for the incentives API.
#[derive(Debug, Clone)]
pub struct IncentivesClient {
    base: String,
    http: reqwest::Client,
}

impl IncentivesClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_base(config.api_base())
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Raw upstream response, for proxying.
    pub async fn fetch_raw(&self, state: &str) -> Result<reqwest::Response, ApiError> {
        let url = incentives_url(&self.base, state)?;
        debug!(%url, "fetching incentives");
        self.http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}

impl IncentiveSource for IncentivesClient {
    async fn incentives_for_state(&self, state: &str) -> Result<IncentivesResponse, ApiError> {
        let resp = self.fetch_raw(state).await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(state, status = status.as_u16(), "incentives request rejected");
            return Err(ApiError::Status {
                state: state.to_string(),
                status: status.as_u16(),
            });
        }
        resp.json::<IncentivesResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::sample_response;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers a single request with a canned response; yields the request line.
    async fn canned_upstream(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("addr"));
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.expect("read");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            let text = String::from_utf8_lossy(&request).to_string();
            text.lines().next().unwrap_or_default().to_string()
        });
        (base, handle)
    }

    #[tokio::test]
    async fn decodes_incentives_from_upstream() {
        let body = serde_json::to_string(&sample_response()).expect("encode");
        let (base, upstream) = canned_upstream("200 OK", body).await;

        let client = IncentivesClient::with_base(format!("{base}/"));
        let resp = client.incentives_for_state("CA").await.expect("incentives");
        assert_eq!(resp.count(), 3);
        assert_eq!(resp, sample_response());

        let request_line = upstream.await.expect("upstream");
        assert_eq!(request_line, "GET /api/v1/incentives?state=CA HTTP/1.1");
    }

    #[tokio::test]
    async fn upstream_rejection_keeps_status() {
        let (base, upstream) = canned_upstream("503 Service Unavailable", "{}".to_string()).await;
        let client = IncentivesClient::with_base(base);
        let err = client.incentives_for_state("TX").await.expect_err("503");
        assert_eq!(
            err,
            ApiError::Status {
                state: "TX".to_string(),
                status: 503,
            }
        );
        upstream.await.expect("upstream");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (base, upstream) = canned_upstream("200 OK", "{\"incentives\": 7}".to_string()).await;
        let client = IncentivesClient::with_base(base);
        let err = client.incentives_for_state("NY").await.expect_err("decode");
        assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
        upstream.await.expect("upstream");
    }
}
