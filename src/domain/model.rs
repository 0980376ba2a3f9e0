use std::fmt;

/// JSON type of the single response field a step consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
}

/// What a step does when its response field is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFieldPolicy {
    Fail,
    DefaultFalse,
}

/// Static description of one remote step: where it posts, what it sends,
/// and which field it reads back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub request_fields: &'static [&'static str],
    pub response_field: &'static str,
    pub output_name: &'static str,
    pub kind: FieldKind,
    pub on_missing: MissingFieldPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepValue {
    Text(String),
    Flag(bool),
}

impl StepValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StepValue::Text(s) => Some(s),
            StepValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            StepValue::Flag(b) => Some(*b),
            StepValue::Text(_) => None,
        }
    }

    /// Artifact representation: strings verbatim, booleans lowercase.
    pub fn to_plain_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StepValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepValue::Text(s) => f.write_str(s),
            StepValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&StepValue> for serde_json::Value {
    fn from(value: &StepValue) -> Self {
        match value {
            StepValue::Text(s) => serde_json::Value::String(s.clone()),
            StepValue::Flag(b) => serde_json::Value::Bool(*b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    pub step: &'static str,
    pub name: &'static str,
    pub value: StepValue,
    /// False when the value came from `MissingFieldPolicy::DefaultFalse`.
    pub field_present: bool,
}

impl StepOutput {
    /// Structured result, e.g. `{"rma_id": "rma-001"}`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(self.name.to_string(), (&self.value).into());
        serde_json::Value::Object(map)
    }
}
