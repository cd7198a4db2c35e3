// ==========================================
// 货代报价比选系统 - 文件解析器实现
// ==========================================
// 支持: 报价 CSV (.csv) / 运输需求 JSON (.json)
// 红线: 只做读取与字段落位，类型校验交给 raw_record
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw_record::{RawQuoteRecord, RawShipmentRequest, RawValue};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 检查文件存在且扩展名符合预期
fn check_file(path: &Path, expected_ext: &str) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != expected_ext {
        return Err(ImportError::UnsupportedFormat(ext));
    }

    Ok(())
}

// ==========================================
// QuoteCsvParser - 报价 CSV 解析
// ==========================================
// 表头不区分大小写，支持常见别名（如 amount → total_amount）
pub struct QuoteCsvParser;

impl QuoteCsvParser {
    /// 解析报价 CSV 文件
    ///
    /// # 返回
    /// - Ok(Vec<RawQuoteRecord>): 原始记录（已去空白、跳过空行）
    /// - Err(ImportError): 文件不存在/格式不支持/CSV 结构错误
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawQuoteRecord>> {
        let path = file_path.as_ref();
        check_file(path, "csv")?;

        let file = File::open(path)?;
        self.parse_reader(file)
    }

    /// 从任意 Reader 解析（便于测试与管道输入）
    pub fn parse_reader<R: std::io::Read>(&self, reader: R) -> ImportResult<Vec<RawQuoteRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map: HashMap<&str, String> = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.as_str(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(Self::to_raw_record(&row_map));
        }

        Ok(records)
    }

    fn to_raw_record(row: &HashMap<&str, String>) -> RawQuoteRecord {
        let pick = |aliases: &[&str]| -> Option<String> {
            aliases
                .iter()
                .filter_map(|alias| row.get(alias))
                .find(|v| !v.is_empty())
                .cloned()
        };

        RawQuoteRecord {
            id: pick(&["id", "quote_id"]),
            request_id: pick(&["request_id", "shipment_request_id"]),
            forwarder_id: pick(&["forwarder_id"]),
            forwarder_name: pick(&["forwarder_name", "forwarder", "company_name"]),
            mode: pick(&["mode", "transport_mode"]),
            total_amount: pick(&["total_amount", "amount", "total"]).map(RawValue::Text),
            currency: pick(&["currency"]),
            transit_days: pick(&["transit_days", "transit"]).map(RawValue::Text),
            etd: pick(&["etd"]),
            eta: pick(&["eta"]),
            status: pick(&["status"]),
        }
    }
}

// ==========================================
// ShipmentRequestJsonParser - 运输需求 JSON 解析
// ==========================================
pub struct ShipmentRequestJsonParser;

impl ShipmentRequestJsonParser {
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawShipmentRequest> {
        let path = file_path.as_ref();
        check_file(path, "json")?;

        let file = File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
