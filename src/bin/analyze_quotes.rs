// ==========================================
// 货代报价比选系统 - 离线分析命令
// ==========================================
// 用法: analyze_quotes <request.json> <quotes.csv>
// 输出: 分析结果 JSON（stdout）；校验/导入失败时错误写 stderr 并以非零码退出
// ==========================================

use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use freight_quote_analyzer::api::AnalysisResponse;
use freight_quote_analyzer::engine::QuoteAnalysisEngine;
use freight_quote_analyzer::importer::{
    validate_quotes, ImportError, QuoteCsvParser, ShipmentRequestJsonParser,
};

fn usage() -> &'static str {
    "用法: analyze_quotes <request.json> <quotes.csv>"
}

fn run(request_path: &str, quotes_path: &str) -> anyhow::Result<String> {
    let request = ShipmentRequestJsonParser
        .parse_file(request_path)
        .and_then(|raw| raw.into_domain().map_err(ImportError::from))
        .with_context(|| format!("运输需求读取失败: {}", request_path))?;

    let raw_quotes = QuoteCsvParser
        .parse_file(quotes_path)
        .with_context(|| format!("报价文件读取失败: {}", quotes_path))?;
    let quotes = validate_quotes(raw_quotes, &request.id)
        .with_context(|| format!("报价数据不合法: {}", quotes_path))?;

    let analysis = QuoteAnalysisEngine::default().analyze(&request, &quotes)?;
    let response = AnalysisResponse::new(analysis, Utc::now(), quotes.len());

    Ok(serde_json::to_string_pretty(&response)?)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("{}", usage());
        return ExitCode::from(2);
    }

    match run(&args[1], &args[2]) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
