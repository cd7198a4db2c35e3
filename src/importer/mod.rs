// ==========================================
// 货代报价比选系统 - 导入层
// ==========================================
// 职责: 外部输入（CSV/JSON/松散字段）→ 校验后的领域对象
// ==========================================

pub mod error;
pub mod field_parser;
pub mod file_parser;
pub mod raw_record;

pub use error::{ImportError, ImportResult};
pub use file_parser::{QuoteCsvParser, ShipmentRequestJsonParser};
pub use raw_record::{validate_quotes, RawQuoteRecord, RawShipmentRequest, RawValue};
