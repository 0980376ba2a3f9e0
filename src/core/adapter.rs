use crate::core::steps::StepInput;
use crate::domain::model::{FieldKind, MissingFieldPolicy, StepOutput, StepSpec, StepValue};
use crate::domain::ports::RemoteService;
use crate::utils::error::{Result, StepError};
use crate::utils::validation::validate_present;

/// One generic adapter for every step: the `StepSpec` decides the endpoint,
/// payload fields and how the response field is read.
pub struct RemoteAdapter<R: RemoteService> {
    service: R,
}

impl<R: RemoteService> RemoteAdapter<R> {
    pub fn new(service: R) -> Self {
        Self { service }
    }

    pub async fn call<I: StepInput + ?Sized>(&self, input: &I) -> Result<StepOutput> {
        let spec = input.spec();
        let payload = build_payload(spec, &input.values())?;
        self.invoke(spec, &payload).await
    }

    pub async fn invoke(
        &self,
        spec: &StepSpec,
        payload: &serde_json::Value,
    ) -> Result<StepOutput> {
        tracing::debug!("{}: POST {}", spec.name, spec.endpoint);
        let response = self
            .service
            .post_json(spec.name, spec.endpoint, payload)
            .await?;

        tracing::debug!("{}: response status {}", spec.name, response.status);

        if response.status != 200 {
            return Err(StepError::RemoteCallError {
                step: spec.name.to_string(),
                status: response.status,
                body: response.body,
            });
        }

        let body: serde_json::Value = serde_json::from_str(&response.body)?;
        let (value, field_present) = extract_value(spec, &body)?;

        if !field_present {
            tracing::warn!(
                "{}: '{}' absent from response, defaulting to {}",
                spec.name,
                spec.response_field,
                value
            );
        }

        Ok(StepOutput {
            step: spec.name,
            name: spec.output_name,
            value,
            field_present,
        })
    }
}

/// Builds the JSON request body, failing on any blank input before the
/// remote service is contacted.
pub fn build_payload(spec: &StepSpec, values: &[&str]) -> Result<serde_json::Value> {
    if values.len() != spec.request_fields.len() {
        return Err(StepError::ConfigError {
            message: format!(
                "{} expects {} inputs, got {}",
                spec.name,
                spec.request_fields.len(),
                values.len()
            ),
        });
    }

    let mut map = serde_json::Map::new();
    for (field, value) in spec.request_fields.iter().zip(values) {
        validate_present(field, value)?;
        map.insert(field.to_string(), serde_json::Value::String(value.to_string()));
    }

    Ok(serde_json::Value::Object(map))
}

/// Reads the step's response field. The returned flag is false when the
/// value was filled in by the missing-field policy.
pub fn extract_value(spec: &StepSpec, body: &serde_json::Value) -> Result<(StepValue, bool)> {
    let raw = body.get(spec.response_field);

    match spec.kind {
        FieldKind::Text => match raw.and_then(|v| v.as_str()) {
            Some(s) if !s.is_empty() => Ok((StepValue::Text(s.to_string()), true)),
            _ => missing(spec),
        },
        FieldKind::Flag => match raw.and_then(|v| v.as_bool()) {
            Some(b) => Ok((StepValue::Flag(b), true)),
            None => missing(spec),
        },
    }
}

fn missing(spec: &StepSpec) -> Result<(StepValue, bool)> {
    match spec.on_missing {
        MissingFieldPolicy::DefaultFalse => Ok((StepValue::Flag(false), false)),
        MissingFieldPolicy::Fail => Err(StepError::MissingFieldError {
            step: spec.name.to_string(),
            field: spec.response_field.to_string(),
        }),
    }
}
