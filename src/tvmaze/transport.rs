//! HTTP transport used by the TVMaze client.

use super::TvMazeError;
use crate::config::ClientConfig;
use std::time::Duration;

/// Performs a single HTTP GET and returns the response body.
///
/// Implementations report connection problems as
/// [`TvMazeError::RequestError`] and non-success status codes as
/// [`TvMazeError::HttpStatus`]. The body is returned as-is; decoding is the
/// client's job.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<String, TvMazeError>;
}

/// Transport backed by a blocking `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport honouring the timeout and user agent of `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, TvMazeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TvMazeError::RequestError(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<String, TvMazeError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| TvMazeError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TvMazeError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .map_err(|e| TvMazeError::RequestError(e.to_string()))
    }
}

/// In-memory transport for tests. Unknown URLs answer with HTTP 404.
#[cfg(test)]
pub(crate) mod fake {
    use super::{Transport, TvMazeError};
    use std::collections::HashMap;
    use std::sync::Mutex;

    enum FakeResponse {
        Body(String),
        Status(u16),
        Failure(String),
    }

    #[derive(Default)]
    pub(crate) struct FakeTransport {
        responses: HashMap<String, FakeResponse>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_body(mut self, url: &str, body: &str) -> Self {
            self.responses
                .insert(url.to_string(), FakeResponse::Body(body.to_string()));
            self
        }

        pub(crate) fn with_status(mut self, url: &str, status: u16) -> Self {
            self.responses
                .insert(url.to_string(), FakeResponse::Status(status));
            self
        }

        pub(crate) fn with_failure(mut self, url: &str, message: &str) -> Self {
            self.responses
                .insert(url.to_string(), FakeResponse::Failure(message.to_string()));
            self
        }

        /// URLs requested so far, in order.
        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str) -> Result<String, TvMazeError> {
            self.requests.lock().unwrap().push(url.to_string());

            match self.responses.get(url) {
                Some(FakeResponse::Body(body)) => Ok(body.clone()),
                Some(FakeResponse::Status(status)) => Err(TvMazeError::HttpStatus {
                    status: *status,
                    reason: "Fake".to_string(),
                    url: url.to_string(),
                }),
                Some(FakeResponse::Failure(message)) => {
                    Err(TvMazeError::RequestError(message.clone()))
                }
                None => Err(TvMazeError::HttpStatus {
                    status: 404,
                    reason: "Not Found".to_string(),
                    url: url.to_string(),
                }),
            }
        }
    }
}
