pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{
    ColumnMapping, DEFAULT_CALLER_PLACEHOLDER, DEFAULT_SUMMARY_PLACEHOLDER,
};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "incident-etl")]
#[command(about = "Migrates a legacy incident export to a cloud-ready JSON document")]
pub struct CliConfig {
    #[arg(long, default_value = "data/legacy_incidents_data.csv")]
    pub input_path: String,

    #[arg(long, default_value = "data/cloud_ready_incidents.json")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_SUMMARY_PLACEHOLDER)]
    pub summary_placeholder: String,

    #[arg(long, default_value = DEFAULT_CALLER_PLACEHOLDER)]
    pub caller_placeholder: String,

    /// TOML configuration file; takes precedence over the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log system stats per stage")]
    pub monitor: bool,

    // 欄位對應表固定為舊系統的匯出格式，僅 TOML 配置可覆寫
    #[arg(skip)]
    #[serde(default)]
    pub columns: ColumnMapping,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn column_mapping(&self) -> &ColumnMapping {
        &self.columns
    }

    fn summary_placeholder(&self) -> &str {
        &self.summary_placeholder
    }

    fn caller_placeholder(&self) -> &str {
        &self.caller_placeholder
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_path", &self.input_path)?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("summary_placeholder", &self.summary_placeholder)?;
        validate_non_empty_string("caller_placeholder", &self.caller_placeholder)?;
        Ok(())
    }
}
