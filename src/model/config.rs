//! 运行配置：输出目录名与序列化格式，作为不可变值显式传递

use serde::{Deserialize, Serialize};

/// 默认输出目录名（位于原始文件所在目录下）
pub const DEFAULT_OUTPUT_DIR: &str = "Moved_Parameters";

/// 序列化格式选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// 每级缩进的空格数
    pub indent_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    pub output_dir_name: String,
    pub format: FormatOptions,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            output_dir_name: DEFAULT_OUTPUT_DIR.to_string(),
            format: FormatOptions::default(),
        }
    }
}
