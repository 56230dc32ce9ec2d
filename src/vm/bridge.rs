//! VM桥接层：把批处理报告转换为展示层使用的文本
//!
//! 核心只产出结构化结果和逐行进度日志，标题与汇总的排版放在这里。

use std::path::Path;

use crate::model::data_core::BatchSummary;

// === 常量定义（消除魔法值） ===
pub const SEPARATOR: &str = "=================================================";
pub const STATUS_START: &str = "开始处理文件...";
pub const STATUS_DONE: &str = "处理完成！";
pub const STATUS_FAILED_HINT: &str = "请查看日志了解失败详情。";
pub const STATUS_ERROR_PREFIX: &str = "错误: ";

/// 批处理开始前的标题块
pub fn header_lines(origin_count: usize, source: &Path) -> Vec<String> {
    let source_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    vec![
        SEPARATOR.to_string(),
        STATUS_START.to_string(),
        format!("原始文件数量: {}", origin_count),
        format!("来源文件: {}", source_name),
        SEPARATOR.to_string(),
    ]
}

/// 批处理结束后的统计块
pub fn summary_lines(summary: &BatchSummary, stopped: bool) -> Vec<String> {
    let mut lines = vec![
        SEPARATOR.to_string(),
        if stopped { "处理已中止，统计:".to_string() } else { "处理完成统计:".to_string() },
        format!("  总文件数: {}", summary.total),
        format!("  成功: {}", summary.succeeded),
        format!("  失败: {}", summary.failed),
        format!("  有变化: {}", summary.changed),
        SEPARATOR.to_string(),
    ];
    if summary.failed > 0 {
        lines.push(STATUS_FAILED_HINT.to_string());
    }
    lines
}
