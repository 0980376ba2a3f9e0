use crate::core::adapter::RemoteAdapter;
use crate::core::steps::{
    IntakeRequest, NotificationRequest, RoutingRequest, StepInput, VendorSubmissionRequest,
};
use crate::core::{RemoteService, Storage};
use crate::domain::model::StepOutput;
use crate::utils::error::{Result, StepError};
use crate::utils::validation::validate_path;

/// Runs one step end to end: remote call, then the output artifact.
/// Nothing is written unless the call and field extraction succeed.
pub struct StepRunner<R: RemoteService, S: Storage> {
    adapter: RemoteAdapter<R>,
    storage: S,
}

impl<R: RemoteService, S: Storage> StepRunner<R, S> {
    pub fn new(service: R, storage: S) -> Self {
        Self {
            adapter: RemoteAdapter::new(service),
            storage,
        }
    }

    pub async fn run<I: StepInput + ?Sized>(
        &self,
        input: &I,
        output_path: &str,
    ) -> Result<StepOutput> {
        let spec = input.spec();
        validate_path("output_path", output_path)?;

        tracing::info!("{}: calling {}", spec.name, spec.endpoint);
        let output = self.adapter.call(input).await.inspect_err(|e| {
            tracing::error!("{}: step failed: {}", spec.name, e);
        })?;

        let text = output.value.to_plain_text();
        self.storage.write_file(output_path, text.as_bytes()).await?;

        tracing::info!(
            "{}: {} = {} (written to {})",
            spec.name,
            output.name,
            text,
            output_path
        );
        Ok(output)
    }

    /// Submits a new RMA and returns the generated request id.
    pub async fn intake(&self, request: &IntakeRequest, output_path: &str) -> Result<String> {
        let output = self.run(request, output_path).await?;
        text_value(output)
    }

    /// Returns the name of the handler the RMA should go to next.
    pub async fn route(&self, request: &RoutingRequest, output_path: &str) -> Result<String> {
        let output = self.run(request, output_path).await?;
        text_value(output)
    }

    pub async fn submit_vendor(
        &self,
        request: &VendorSubmissionRequest,
        output_path: &str,
    ) -> Result<String> {
        let output = self.run(request, output_path).await?;
        text_value(output)
    }

    /// `false` covers both an explicit failure and an absent `success` field.
    pub async fn notify(&self, request: &NotificationRequest, output_path: &str) -> Result<bool> {
        let output = self.run(request, output_path).await?;
        output.value.as_flag().ok_or_else(|| StepError::ConfigError {
            message: format!("{} produced a non-boolean result", output.step),
        })
    }
}

fn text_value(output: StepOutput) -> Result<String> {
    match output.value.as_text() {
        Some(s) => Ok(s.to_string()),
        None => Err(StepError::ConfigError {
            message: format!("{} produced a non-text result", output.step),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RemoteResponse;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }

        async fn is_empty(&self) -> bool {
            self.files.lock().await.is_empty()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockService {
        status: u16,
        body: serde_json::Value,
    }

    impl MockService {
        fn ok(body: serde_json::Value) -> Self {
            Self { status: 200, body }
        }
    }

    #[async_trait]
    impl RemoteService for MockService {
        async fn post_json(
            &self,
            _step: &str,
            _endpoint: &str,
            _payload: &serde_json::Value,
        ) -> Result<RemoteResponse> {
            let body = match &self.body {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Ok(RemoteResponse {
                status: self.status,
                body,
            })
        }
    }

    fn intake_request() -> IntakeRequest {
        IntakeRequest {
            serial_number: "SN123".to_string(),
            model_number: "M9".to_string(),
            issue_description: "won't power on".to_string(),
            vendor: "Acme".to_string(),
            submitted_by: "tech@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_intake_writes_rma_id() {
        let storage = MockStorage::new();
        let runner = StepRunner::new(
            MockService::ok(serde_json::json!({"success": true, "id": "rma-001"})),
            storage.clone(),
        );

        let rma_id = runner.intake(&intake_request(), "rma_id.txt").await.unwrap();

        assert_eq!(rma_id, "rma-001");
        assert_eq!(storage.get_file("rma_id.txt").await.unwrap(), "rma-001");
    }

    #[tokio::test]
    async fn test_vendor_submission_writes_vendor_rma_id() {
        let storage = MockStorage::new();
        let runner = StepRunner::new(
            MockService::ok(serde_json::json!({"vendor_rma_id": "QSC-123456"})),
            storage.clone(),
        );

        let request = VendorSubmissionRequest {
            rma_id: "rma-001".to_string(),
        };
        let vendor_rma_id = runner.submit_vendor(&request, "vendor.txt").await.unwrap();

        assert_eq!(vendor_rma_id, "QSC-123456");
        assert_eq!(storage.get_file("vendor.txt").await.unwrap(), "QSC-123456");
    }

    #[tokio::test]
    async fn test_notify_absent_success_writes_false() {
        let storage = MockStorage::new();
        let runner = StepRunner::new(MockService::ok(serde_json::json!({})), storage.clone());

        let request = NotificationRequest {
            rma_id: "rma-001".to_string(),
            vendor_rma_id: "V-77".to_string(),
        };
        let success = runner.notify(&request, "success.txt").await.unwrap();

        assert!(!success);
        assert_eq!(storage.get_file("success.txt").await.unwrap(), "false");
    }

    #[tokio::test]
    async fn test_notify_true_is_lowercase() {
        let storage = MockStorage::new();
        let runner = StepRunner::new(
            MockService::ok(serde_json::json!({"success": true, "email_id": "em_1"})),
            storage.clone(),
        );

        let request = NotificationRequest {
            rma_id: "rma-001".to_string(),
            vendor_rma_id: "V-77".to_string(),
        };
        assert!(runner.notify(&request, "success.txt").await.unwrap());
        assert_eq!(storage.get_file("success.txt").await.unwrap(), "true");
    }

    #[tokio::test]
    async fn test_remote_failure_writes_nothing() {
        let storage = MockStorage::new();
        let runner = StepRunner::new(
            MockService {
                status: 500,
                body: serde_json::Value::String("internal error".to_string()),
            },
            storage.clone(),
        );

        let err = runner
            .route(
                &RoutingRequest {
                    rma_id: "rma-001".to_string(),
                },
                "next_step.txt",
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StepError::RemoteCallError { status: 500, ref body, .. } if body == "internal error"
        ));
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_field_writes_nothing() {
        let storage = MockStorage::new();
        let runner = StepRunner::new(
            MockService::ok(serde_json::json!({"success": true})),
            storage.clone(),
        );

        let err = runner.intake(&intake_request(), "rma_id.txt").await.unwrap_err();

        assert!(matches!(
            err,
            StepError::MissingFieldError { ref field, .. } if field == "id"
        ));
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_output_path_is_rejected_before_call() {
        let storage = MockStorage::new();
        let runner = StepRunner::new(
            MockService::ok(serde_json::json!({"next_step": "formbot_qsc"})),
            storage.clone(),
        );

        let result = runner
            .route(
                &RoutingRequest {
                    rma_id: "rma-001".to_string(),
                },
                "",
            )
            .await;

        assert!(matches!(
            result,
            Err(StepError::InvalidConfigValueError { .. })
        ));
        assert!(storage.is_empty().await);
    }
}
