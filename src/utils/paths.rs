//! 路径整理：去掉拖拽/粘贴带来的引号，把目录展开为其中的 JSON 文件

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 清理文件路径，去掉首尾空白以及一对包裹的双引号或单引号
pub fn clean_file_path(raw: &str) -> String {
    let mut s = raw.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s = &s[1..s.len() - 1];
    }
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        s = &s[1..s.len() - 1];
    }
    s.trim().to_string()
}

fn is_json_file(p: &Path) -> bool {
    p.is_file()
        && p.extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
}

/// 列出目录中的 `*.json` 文件（不递归，按文件名排序）
pub fn json_files_in(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_json_file(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// 把用户输入的路径展开为有序、去重的原始文件列表
///
/// 目录展开为其中的 JSON 文件；其他输入原样保留（不存在的文件交由批处理报告失败）。
pub fn expand_origin_paths<I, S>(inputs: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for raw in inputs {
        let cleaned = clean_file_path(raw.as_ref());
        if cleaned.is_empty() {
            continue;
        }
        let p = PathBuf::from(cleaned);
        let candidates = if p.is_dir() {
            match json_files_in(&p) {
                Ok(files) => {
                    tracing::info!("目录 {} 中找到 {} 个JSON文件", p.display(), files.len());
                    files
                }
                Err(e) => {
                    tracing::warn!("无法读取目录 {}: {}", p.display(), e);
                    Vec::new()
                }
            }
        } else {
            vec![p]
        };
        for c in candidates {
            if seen.insert(c.clone()) {
                out.push(c);
            }
        }
    }
    out
}
