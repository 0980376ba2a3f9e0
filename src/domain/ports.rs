use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Raw outcome of one POST, before any status or field checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Sends `payload` as a JSON body to `endpoint`. `step` is only used to
    /// label transport errors.
    async fn post_json(
        &self,
        step: &str,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<RemoteResponse>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn user_agent(&self) -> &str;
}
