use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Transport-level failure of a single request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,
    #[error("Connection error: {0}")]
    Connection(String),
}

/// HTTP seam used by the prober.
///
/// Any HTTP response, whatever its status, is a success at this level.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Issues a HEAD request and returns the status code. No body is read.
    async fn head(&self, url: &str) -> Result<u16, TransportError>;

    /// Issues a GET request and returns the status code with the full body.
    async fn get(&self, url: &str) -> Result<(u16, String), TransportError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("site-monitor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(classify)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ProbeTransport for ReqwestTransport {
    async fn head(&self, url: &str) -> Result<u16, TransportError> {
        let response = self.client.head(url).send().await.map_err(classify)?;
        Ok(response.status().as_u16())
    }

    async fn get(&self, url: &str) -> Result<(u16, String), TransportError> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        Ok((status, body))
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connection(err.to_string())
    }
}
