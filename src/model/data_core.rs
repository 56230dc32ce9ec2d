//! 核心数据类型：错误分类、单文件处理结果与批处理统计

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// 文档在一次迁移中的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRole {
    /// 原始文件（被更新）
    Origin,
    /// 来源文件（提供新参数）
    Source,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Origin => f.write_str("原始文件"),
            DocumentRole::Source => f.write_str("来源文件"),
        }
    }
}

#[derive(Error, Debug)]
pub enum MoverError {
    #[error("{role}不存在: {}", .path.display())]
    Missing { role: DocumentRole, path: PathBuf },
    #[error("无法读取{role}: {source}")]
    Read {
        role: DocumentRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{role}JSON格式无效: {source}")]
    Parse {
        role: DocumentRole,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{role}JSON根节点不是对象: {}", .path.display())]
    NotObject { role: DocumentRole, path: PathBuf },
    #[error("序列化失败: {0}")]
    Format(#[from] serde_json::Error),
    #[error("无法写入输出文件 {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MoverError {
    /// 文档无法解析（JSON 无效或根节点不是对象）
    pub fn is_malformed(&self) -> bool {
        matches!(self, MoverError::Parse { .. } | MoverError::NotObject { .. })
    }
}

/// 单个文件的处理结局：成功写出的路径，或失败信息，二者互斥
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessOutcome {
    Written { output_path: PathBuf },
    Failed { error: String },
}

/// 文件处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    /// 原始文件名
    pub file_name: String,
    pub origin_path: PathBuf,
    /// 变更的字段列表（`节点.字段` 或标量键名）
    pub changed_fields: Vec<String>,
    #[serde(flatten)]
    pub outcome: ProcessOutcome,
}

impl ProcessResult {
    pub fn written(origin_path: &Path, changed_fields: Vec<String>, output_path: PathBuf) -> Self {
        Self {
            file_name: file_name_of(origin_path),
            origin_path: origin_path.to_path_buf(),
            changed_fields,
            outcome: ProcessOutcome::Written { output_path },
        }
    }

    pub fn failed(origin_path: &Path, err: &MoverError) -> Self {
        Self {
            file_name: file_name_of(origin_path),
            origin_path: origin_path.to_path_buf(),
            changed_fields: Vec::new(),
            outcome: ProcessOutcome::Failed { error: err.to_string() },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ProcessOutcome::Written { .. })
    }

    /// 是否有参数变化（失败的结果总是 false）
    pub fn has_changes(&self) -> bool {
        self.is_success() && !self.changed_fields.is_empty()
    }

    pub fn output_path(&self) -> Option<&Path> {
        match &self.outcome {
            ProcessOutcome::Written { output_path } => Some(output_path),
            ProcessOutcome::Failed { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            ProcessOutcome::Written { .. } => None,
            ProcessOutcome::Failed { error } => Some(error),
        }
    }
}

fn file_name_of(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

/// 批处理统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub changed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ProcessResult]) -> Self {
        let mut summary = Self { total: results.len(), ..Self::default() };
        for r in results {
            if r.is_success() {
                summary.succeeded += 1;
                if r.has_changes() {
                    summary.changed += 1;
                }
            } else {
                summary.failed += 1;
            }
        }
        summary
    }
}

/// 一次批处理的完整报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub results: Vec<ProcessResult>,
    pub summary: BatchSummary,
    /// 是否因停止标志提前结束
    pub stopped: bool,
}
