pub mod adapter;
pub mod runner;
pub mod steps;

pub use crate::domain::model::{StepOutput, StepSpec, StepValue};
pub use crate::domain::ports::{ConfigProvider, RemoteResponse, RemoteService, Storage};
pub use crate::utils::error::Result;
