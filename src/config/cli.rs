use crate::config::toml_config::{LogFormat, TomlConfig};
use crate::config::ServiceSettings;
use crate::core::steps::{
    IntakeRequest, NotificationRequest, RoutingRequest, StepInput, VendorSubmissionRequest,
};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "rma-step")]
#[command(about = "Run one RMA processing step against the RMA service")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML config file with [service] and [logging] sections")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "RMA_SERVICE_URL", help = "RMA service base URL")]
    pub base_url: Option<String>,

    #[arg(
        long,
        global = true,
        env = "RMA_TIMEOUT_SECONDS",
        help = "Request timeout; unset waits for the transport default"
    )]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: StepCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum StepCommand {
    /// Submit new RMA details and receive the generated RMA id
    #[command(alias = "reqwest")]
    Intake {
        #[arg(long)]
        serial_number: String,
        #[arg(long)]
        model_number: String,
        #[arg(long)]
        issue_description: String,
        #[arg(long)]
        vendor: String,
        #[arg(long)]
        submitted_by: String,
        #[arg(long)]
        rma_id_output_path: String,
    },

    /// Ask which handler should process the RMA next
    #[command(alias = "traceroute")]
    Route {
        #[arg(long)]
        rma_id: String,
        #[arg(long)]
        next_step_output_path: String,
    },

    /// Submit the RMA to the vendor portal and receive the vendor RMA id
    #[command(alias = "formbot-qsc")]
    SubmitVendor {
        #[arg(long)]
        rma_id: String,
        #[arg(long)]
        vendor_rma_id_output_path: String,
    },

    /// Send the confirmation notification for a submitted RMA
    #[command(alias = "echo")]
    Notify {
        #[arg(long)]
        rma_id: String,
        #[arg(long)]
        vendor_rma_id: String,
        #[arg(long)]
        success_output_path: String,
    },
}

impl StepCommand {
    /// Splits the subcommand into its typed step input and artifact path.
    pub fn into_input(self) -> (Box<dyn StepInput>, String) {
        match self {
            StepCommand::Intake {
                serial_number,
                model_number,
                issue_description,
                vendor,
                submitted_by,
                rma_id_output_path,
            } => (
                Box::new(IntakeRequest {
                    serial_number,
                    model_number,
                    issue_description,
                    vendor,
                    submitted_by,
                }),
                rma_id_output_path,
            ),
            StepCommand::Route {
                rma_id,
                next_step_output_path,
            } => (Box::new(RoutingRequest { rma_id }), next_step_output_path),
            StepCommand::SubmitVendor {
                rma_id,
                vendor_rma_id_output_path,
            } => (
                Box::new(VendorSubmissionRequest { rma_id }),
                vendor_rma_id_output_path,
            ),
            StepCommand::Notify {
                rma_id,
                vendor_rma_id,
                success_output_path,
            } => (
                Box::new(NotificationRequest {
                    rma_id,
                    vendor_rma_id,
                }),
                success_output_path,
            ),
        }
    }
}

impl CliConfig {
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        self.config.as_ref().map(TomlConfig::from_file).transpose()
    }

    pub fn settings(&self, file: Option<&TomlConfig>) -> Result<ServiceSettings> {
        ServiceSettings::resolve(file, self.base_url.clone(), self.timeout_seconds)
    }

    /// `--json-logs` wins; otherwise the config file decides.
    pub fn log_format(&self, file: Option<&TomlConfig>) -> LogFormat {
        if self.json_logs {
            LogFormat::Json
        } else {
            file.map(TomlConfig::log_format).unwrap_or_default()
        }
    }

    pub fn verbose(&self, file: Option<&TomlConfig>) -> bool {
        self.verbose || file.is_some_and(TomlConfig::verbose)
    }
}
