pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, StepCommand};

pub use adapters::{HttpService, LocalStorage};
pub use config::ServiceSettings;
pub use self::core::{
    adapter::RemoteAdapter,
    runner::StepRunner,
    steps::{IntakeRequest, NotificationRequest, RoutingRequest, VendorSubmissionRequest},
};
pub use domain::model::{StepOutput, StepValue};
pub use utils::error::{Result, StepError};
