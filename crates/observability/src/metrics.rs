//! 记录发送指标模块
//!
//! 统计通过构建好的 dispatcher 发出的日志记录。

use std::collections::BTreeMap;

use contracts::Severity;
use metrics::{counter, histogram};

/// 记录一条已发出的日志
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_emitted;
///
/// logger.emit("access", Severity::INFORMATIONAL, line);
/// record_emitted("access", Severity::INFORMATIONAL, line.len());
/// ```
pub fn record_emitted(category: &str, severity: Severity, bytes: usize) {
    counter!(
        "logcfg_records_emitted_total",
        "category" => category.to_string(),
        "severity" => severity.rank().to_string()
    )
    .increment(1);
    histogram!("logcfg_record_bytes").record(bytes as f64);
}

/// 记录被跳过的输入行 (空行)
pub fn record_skipped() {
    counter!("logcfg_input_lines_skipped_total").increment(1);
}

/// 发送统计聚合器
#[derive(Debug, Default, Clone)]
pub struct EmitStats {
    per_category: BTreeMap<String, u64>,
    total_records: u64,
    total_bytes: u64,
    skipped: u64,
}

impl EmitStats {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条已发出的日志
    pub fn record(&mut self, category: &str, bytes: usize) {
        *self.per_category.entry(category.to_string()).or_default() += 1;
        self.total_records += 1;
        self.total_bytes += bytes as u64;
    }

    /// 记录一条被跳过的输入
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// 已发出记录数
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// 获取统计摘要
    pub fn summary(&self) -> EmitSummary {
        EmitSummary {
            total_records: self.total_records,
            total_bytes: self.total_bytes,
            skipped: self.skipped,
            per_category: self.per_category.clone(),
        }
    }
}

/// 发送统计摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitSummary {
    pub total_records: u64,
    pub total_bytes: u64,
    pub skipped: u64,
    pub per_category: BTreeMap<String, u64>,
}
