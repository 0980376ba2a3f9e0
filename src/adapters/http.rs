use crate::core::{ConfigProvider, RemoteResponse, RemoteService};
use crate::utils::error::{Result, StepError};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// reqwest-backed `RemoteService` rooted at the RMA service base URL.
pub struct HttpService {
    client: Client,
    base_url: String,
}

impl HttpService {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        validate_url("base_url", config.base_url())?;

        let mut builder = Client::builder().user_agent(config.user_agent());
        // No timeout unless configured; reqwest then waits indefinitely.
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| StepError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    /// Appends the endpoint path to the base URL, keeping any base path prefix.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let joined = format!("{}{}", self.base_url, endpoint);
        Url::parse(&joined).map_err(|e| StepError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: joined.clone(),
            reason: format!("Invalid endpoint URL: {}", e),
        })
    }
}

#[async_trait]
impl RemoteService for HttpService {
    async fn post_json(
        &self,
        step: &str,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<RemoteResponse> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!("{}: sending request to {}", step, url);

        let transport_error = |source: reqwest::Error| StepError::TransportError {
            step: step.to_string(),
            source,
        };

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(RemoteResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceSettings;

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let settings = ServiceSettings {
            base_url: "https://claimr.example.com/staging/".to_string(),
            ..ServiceSettings::default()
        };
        let service = HttpService::new(&settings).unwrap();

        let url = service.endpoint_url("/api/agents/echo").unwrap();
        assert_eq!(
            url.as_str(),
            "https://claimr.example.com/staging/api/agents/echo"
        );
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let settings = ServiceSettings {
            base_url: "not a url".to_string(),
            ..ServiceSettings::default()
        };
        assert!(HttpService::new(&settings).is_err());
    }
}
