use common::{FormInput, OptimizationResult, SUBMIT_PATH};
use reqwest::Client;
use tracing::debug;

/// Failure classes of one submit round trip.
#[derive(Debug)]
pub enum SubmitError {
    /// The request never completed: connect, send or body read failed.
    Transport(reqwest::Error),
    /// The optimizer answered with a non-success status. The body is not read.
    Status(u16),
    /// A success response whose body is not a valid optimization result.
    Decode(serde_json::Error),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Status(status) => write!(f, "Server error: {status}"),
            Self::Decode(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status(_) => None,
            Self::Decode(err) => Some(err),
        }
    }
}

#[derive(Clone)]
pub struct OptimizerClient {
    http: Client,
    server_base_url: String,
}

impl OptimizerClient {
    pub fn new(server_base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_base_url: server_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn submit_url(&self) -> String {
        format!("{}{}", self.server_base_url, SUBMIT_PATH)
    }

    /// Posts the form fields as JSON and decodes the optimizer's answer.
    ///
    /// Exactly one request is issued per call. There is no retry, no timeout
    /// and no caching of earlier answers.
    pub async fn submit(&self, input: &FormInput) -> Result<OptimizationResult, SubmitError> {
        let url = self.submit_url();
        debug!(%url, data_size = %input.data_size, "posting optimization request");

        let response = self
            .http
            .post(url)
            .json(input)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(SubmitError::Transport)?;
        serde_json::from_slice(&body).map_err(SubmitError::Decode)
    }
}
