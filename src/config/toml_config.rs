use crate::domain::model::{
    ColumnMapping, DEFAULT_CALLER_PLACEHOLDER, DEFAULT_SUMMARY_PLACEHOLDER,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default = "default_summary_placeholder")]
    pub summary_placeholder: String,
    #[serde(default = "default_caller_placeholder")]
    pub caller_placeholder: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMapping::default(),
            summary_placeholder: default_summary_placeholder(),
            caller_placeholder: default_caller_placeholder(),
        }
    }
}

fn default_summary_placeholder() -> String {
    DEFAULT_SUMMARY_PLACEHOLDER.to_string()
}

fn default_caller_placeholder() -> String {
    DEFAULT_CALLER_PLACEHOLDER.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("source.path", &self.source.path)?;
        validate_path("load.output_path", &self.load.output_path)?;

        validate_non_empty_string(
            "transform.summary_placeholder",
            &self.transform.summary_placeholder,
        )?;
        validate_non_empty_string(
            "transform.caller_placeholder",
            &self.transform.caller_placeholder,
        )?;

        // 對應表的每個來源欄位名稱都不可為空
        let columns = &self.transform.columns;
        validate_non_empty_string("transform.columns.incident_id", &columns.incident_id)?;
        validate_non_empty_string("transform.columns.summary", &columns.summary)?;
        validate_non_empty_string("transform.columns.caller", &columns.caller)?;
        validate_non_empty_string("transform.columns.priority_level", &columns.priority_level)?;
        validate_non_empty_string(
            "transform.columns.creation_timestamp",
            &columns.creation_timestamp,
        )?;

        Ok(())
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn column_mapping(&self) -> &ColumnMapping {
        &self.transform.columns
    }

    fn summary_placeholder(&self) -> &str {
        &self.transform.summary_placeholder
    }

    fn caller_placeholder(&self) -> &str {
        &self.transform.caller_placeholder
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
