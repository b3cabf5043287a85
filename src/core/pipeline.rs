use crate::core::{CloudIncidentRecord, ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::utils::error::{EtlError, Result};
use crate::utils::timestamp::normalize_timestamp;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub struct IncidentPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> IncidentPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for IncidentPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let input_path = self.config.input_path();
        println!("Reading legacy data from {}...", input_path);

        let bytes = match self.storage.read_file(input_path).await {
            Ok(bytes) => bytes,
            Err(EtlError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EtlError::MissingInputError {
                    path: input_path.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes.as_slice());

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        tracing::debug!("Input columns: {:?}", headers);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    // 無法解析的行直接丟棄
                    tracing::debug!("Skipping unparsable line: {}", e);
                    continue;
                }
            };

            if row.len() != headers.len() {
                tracing::debug!(
                    "Skipping malformed line with {} fields (expected {})",
                    row.len(),
                    headers.len()
                );
                continue;
            }

            let mut data = HashMap::new();
            for (header, field) in headers.iter().zip(row.iter()) {
                data.insert(header.clone(), coerce_scalar(field));
            }
            records.push(Record { data });
        }

        // 欄位缺失必須在任何輸出寫出之前被擋下
        for column in self.config.column_mapping().source_columns() {
            if !headers.iter().any(|h| h == column) {
                return Err(EtlError::SchemaError {
                    column: column.to_string(),
                });
            }
        }

        Ok(records)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let mapping = self.config.column_mapping();
        let mut records = Vec::with_capacity(data.len());

        for record in data {
            // 日期轉換失敗會中止整個批次，不做逐列退回
            let raw_date = scalar_to_text(record.data.get(&mapping.creation_timestamp));
            let creation_timestamp = normalize_timestamp(&raw_date)?;

            let summary = text_or_placeholder(
                record.data.get(&mapping.summary),
                self.config.summary_placeholder(),
            );
            let caller = text_or_placeholder(
                record.data.get(&mapping.caller),
                self.config.caller_placeholder(),
            );

            records.push(CloudIncidentRecord {
                incident_id: record
                    .data
                    .get(&mapping.incident_id)
                    .cloned()
                    .unwrap_or(Value::Null),
                summary,
                caller,
                priority_level: record
                    .data
                    .get(&mapping.priority_level)
                    .cloned()
                    .unwrap_or(Value::Null),
                creation_timestamp,
            });
        }

        Ok(TransformResult { records })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        // 舊的匯出工具使用 4 空格縮排，下游系統照此解析
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        result.records.serialize(&mut serializer)?;

        self.storage.write_file(&output_path, &buf).await?;

        tracing::debug!("Wrote {} bytes to {}", buf.len(), output_path);
        Ok(output_path)
    }
}

// 與舊載入器相同的純量推斷：整數、浮點數、空值，其餘保留原文
fn coerce_scalar(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(raw.to_string())
}

fn scalar_to_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn text_or_placeholder(value: Option<&Value>, placeholder: &str) -> String {
    let text = scalar_to_text(value);
    if text.trim().is_empty() {
        placeholder.to_string()
    } else {
        text
    }
}
