//! TMP 字体参数迁移工具库
//!
//! 把来源字体资源 JSON 中的指定参数迁移到一个或多个原始字体资源 JSON，
//! 只替换真正变化的字段，并以确定的格式写到原始文件旁的输出目录。

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::batch::{migrate_file, process_single_file, run_batch, run_batch_until};
pub use model::config::{FormatOptions, MoverConfig, DEFAULT_OUTPUT_DIR};
pub use model::data_core::{BatchReport, BatchSummary, DocumentRole, MoverError, ProcessOutcome, ProcessResult};
pub use model::field_policy::{resolve_fields, MigrationRule, MIGRATION_PLAN};
pub use model::merge::{migrate_document, migrate_fields, migrate_scalar};
