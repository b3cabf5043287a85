use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_SUMMARY_PLACEHOLDER: &str = "No summary provided";
pub const DEFAULT_CALLER_PLACEHOLDER: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

/// 來源欄位對應表：每個輸出欄位取自哪個舊系統欄位
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub incident_id: String,
    pub summary: String,
    pub caller: String,
    pub priority_level: String,
    pub creation_timestamp: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            incident_id: "number".to_string(),
            summary: "short_description".to_string(),
            caller: "caller_id".to_string(),
            priority_level: "priority".to_string(),
            creation_timestamp: "sys_created_on".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn source_columns(&self) -> [&str; 5] {
        [
            &self.incident_id,
            &self.summary,
            &self.caller,
            &self.priority_level,
            &self.creation_timestamp,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudIncidentRecord {
    pub incident_id: serde_json::Value,
    pub summary: String,
    pub caller: String,
    pub priority_level: serde_json::Value,
    pub creation_timestamp: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<CloudIncidentRecord>,
}
