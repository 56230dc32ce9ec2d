//! IO helper: JSON 文档读取、输出路径计算与原子写入

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::model::data_core::{DocumentRole, MoverError};

/// 检查文件是否存在
pub fn ensure_exists(p: &Path, role: DocumentRole) -> Result<(), MoverError> {
    if p.is_file() {
        Ok(())
    } else {
        Err(MoverError::Missing { role, path: p.to_path_buf() })
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 读取文件原始字节，编码问题留给解析阶段报告
pub fn read_bytes(p: &Path, role: DocumentRole) -> Result<Vec<u8>, MoverError> {
    std::fs::read(p).map_err(|source| MoverError::Read { role, path: p.to_path_buf(), source })
}

/// 解析 JSON 字节，必须是 UTF-8 且根节点是对象
pub fn parse_document(bytes: &[u8], p: &Path, role: DocumentRole) -> Result<Map<String, Value>, MoverError> {
    // 兼容带 BOM 的 UTF-8 文件
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let v: Value = serde_json::from_slice(bytes).map_err(|source| MoverError::Parse { role, path: p.to_path_buf(), source })?;
    match v {
        Value::Object(m) => Ok(m),
        _ => Err(MoverError::NotObject { role, path: p.to_path_buf() }),
    }
}

/// 输出路径：`<原始文件目录>/<output_dir_name>/<原始文件名>`
pub fn output_path_for(origin: &Path, output_dir_name: &str) -> PathBuf {
    let dir = origin.parent().unwrap_or_else(|| Path::new(""));
    let file_name = origin.file_name().unwrap_or(origin.as_os_str());
    dir.join(output_dir_name).join(file_name)
}

/// 原子写入：先写同目录临时文件，再重命名到目标路径
///
/// 失败时目标文件保持原样，不会留下写了一半的内容。
pub fn write_atomic(target: &Path, contents: &str) -> Result<(), MoverError> {
    let write_err = |source| MoverError::Write { path: target.to_path_buf(), source };
    let dir = match target.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(write_err)?;
    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(target).map_err(|e| write_err(e.error))?;
    Ok(())
}
