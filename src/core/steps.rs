use crate::domain::model::{FieldKind, MissingFieldPolicy, StepSpec};

pub const INTAKE: StepSpec = StepSpec {
    name: "reqwest",
    endpoint: "/api/agents/reqwest",
    request_fields: &[
        "serial_number",
        "model_number",
        "issue_description",
        "vendor",
        "submitted_by",
    ],
    response_field: "id",
    output_name: "rma_id",
    kind: FieldKind::Text,
    on_missing: MissingFieldPolicy::Fail,
};

pub const ROUTING: StepSpec = StepSpec {
    name: "traceroute",
    endpoint: "/api/agents/traceroute",
    request_fields: &["id"],
    response_field: "next_step",
    output_name: "next_step",
    kind: FieldKind::Text,
    on_missing: MissingFieldPolicy::Fail,
};

pub const VENDOR_SUBMISSION: StepSpec = StepSpec {
    name: "formbot_qsc",
    endpoint: "/api/agents/formbot_qsc",
    request_fields: &["id"],
    response_field: "vendor_rma_id",
    output_name: "vendor_rma_id",
    kind: FieldKind::Text,
    on_missing: MissingFieldPolicy::Fail,
};

pub const NOTIFICATION: StepSpec = StepSpec {
    name: "echo",
    endpoint: "/api/agents/echo",
    request_fields: &["id", "vendor_rma_id"],
    response_field: "success",
    output_name: "success",
    kind: FieldKind::Flag,
    on_missing: MissingFieldPolicy::DefaultFalse,
};

/// Caller-supplied inputs for one step.
pub trait StepInput: Send + Sync {
    fn spec(&self) -> &'static StepSpec;

    /// Values in the order of `spec().request_fields`.
    fn values(&self) -> Vec<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeRequest {
    pub serial_number: String,
    pub model_number: String,
    pub issue_description: String,
    pub vendor: String,
    pub submitted_by: String,
}

impl StepInput for IntakeRequest {
    fn spec(&self) -> &'static StepSpec {
        &INTAKE
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.serial_number.as_str(),
            self.model_number.as_str(),
            self.issue_description.as_str(),
            self.vendor.as_str(),
            self.submitted_by.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRequest {
    pub rma_id: String,
}

impl StepInput for RoutingRequest {
    fn spec(&self) -> &'static StepSpec {
        &ROUTING
    }

    fn values(&self) -> Vec<&str> {
        vec![self.rma_id.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSubmissionRequest {
    pub rma_id: String,
}

impl StepInput for VendorSubmissionRequest {
    fn spec(&self) -> &'static StepSpec {
        &VENDOR_SUBMISSION
    }

    fn values(&self) -> Vec<&str> {
        vec![self.rma_id.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub rma_id: String,
    pub vendor_rma_id: String,
}

impl StepInput for NotificationRequest {
    fn spec(&self) -> &'static StepSpec {
        &NOTIFICATION
    }

    fn values(&self) -> Vec<&str> {
        vec![self.rma_id.as_str(), self.vendor_rma_id.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_line_up_with_request_fields() {
        let inputs: Vec<Box<dyn StepInput>> = vec![
            Box::new(IntakeRequest {
                serial_number: "SN123".to_string(),
                model_number: "M9".to_string(),
                issue_description: "won't power on".to_string(),
                vendor: "Acme".to_string(),
                submitted_by: "tech@example.com".to_string(),
            }),
            Box::new(RoutingRequest {
                rma_id: "rma-001".to_string(),
            }),
            Box::new(VendorSubmissionRequest {
                rma_id: "rma-001".to_string(),
            }),
            Box::new(NotificationRequest {
                rma_id: "rma-001".to_string(),
                vendor_rma_id: "V-77".to_string(),
            }),
        ];

        for input in inputs {
            assert_eq!(input.values().len(), input.spec().request_fields.len());
        }
    }

    #[test]
    fn test_only_notification_defaults_on_missing() {
        for spec in [&INTAKE, &ROUTING, &VENDOR_SUBMISSION] {
            assert_eq!(spec.kind, FieldKind::Text);
            assert_eq!(spec.on_missing, MissingFieldPolicy::Fail);
        }
        assert_eq!(NOTIFICATION.kind, FieldKind::Flag);
        assert_eq!(NOTIFICATION.on_missing, MissingFieldPolicy::DefaultFalse);
    }
}
