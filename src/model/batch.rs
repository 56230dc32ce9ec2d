//! 批处理：用同一个来源文件依次更新多个原始文件
//!
//! 每个文件独立处理，单个文件失败只记入结果，不中断整批。

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::model::config::MoverConfig;
use crate::model::data_core::{BatchReport, BatchSummary, DocumentRole, MoverError, ProcessResult};
use crate::model::merge::migrate_document;
use crate::utils::formatting::serialize_document;
use crate::utils::fs::{ensure_exists, output_path_for, parse_document, read_bytes, write_atomic};

/// 处理单个原始文件：读取、迁移、序列化并写出，返回变更记录与输出路径
///
/// 检查顺序：原始文件存在 → 来源文件存在 → 读取原始 → 读取来源 → 解析原始 → 解析来源。
pub fn migrate_file(origin: &Path, source: &Path, config: &MoverConfig) -> Result<(Vec<String>, PathBuf), MoverError> {
    ensure_exists(origin, DocumentRole::Origin)?;
    ensure_exists(source, DocumentRole::Source)?;

    let origin_bytes = read_bytes(origin, DocumentRole::Origin)?;
    let source_bytes = read_bytes(source, DocumentRole::Source)?;

    let mut origin_doc = parse_document(&origin_bytes, origin, DocumentRole::Origin)?;
    let source_doc = parse_document(&source_bytes, source, DocumentRole::Source)?;

    let changed = migrate_document(&source_doc, &mut origin_doc);
    let json = serialize_document(&origin_doc, &config.format)?;

    let output_path = output_path_for(origin, &config.output_dir_name);
    write_atomic(&output_path, &json)?;
    Ok((changed, output_path))
}

/// 处理单个文件并把结果写成进度日志
pub fn process_single_file<F>(origin: &Path, source: &Path, config: &MoverConfig, on_log: &mut F) -> ProcessResult
where
    F: FnMut(&str),
{
    match migrate_file(origin, source, config) {
        Ok((changed, output_path)) => {
            if changed.is_empty() {
                on_log("  没有参数被移动");
            } else {
                on_log(&format!("  移动了 {} 个参数:", changed.len()));
                for field in &changed {
                    on_log(&format!("    ✓ {}", field));
                }
            }
            on_log(&format!("  ✓ 输出文件: {}", output_path.display()));
            tracing::debug!("{} 处理完成，变更 {} 项", origin.display(), changed.len());
            ProcessResult::written(origin, changed, output_path)
        }
        Err(e) => {
            on_log(&format!("  ✗ 错误: {}", e));
            if e.is_malformed() {
                tracing::warn!("{} 不是有效的字体资源JSON: {}", origin.display(), e);
            } else {
                tracing::error!("{} 处理失败: {:?}", origin.display(), e);
            }
            ProcessResult::failed(origin, &e)
        }
    }
}

/// 批量处理，按输入顺序逐个完成
pub fn run_batch<F>(origins: &[PathBuf], source: &Path, config: &MoverConfig, on_log: F) -> BatchReport
where
    F: FnMut(&str),
{
    let never = AtomicBool::new(false);
    run_batch_until(origins, source, config, &never, on_log)
}

/// 批量处理，每个文件开始前检查停止标志
///
/// 已写出的文件不受停止影响；剩余文件不再处理，也不计入统计。
pub fn run_batch_until<F>(origins: &[PathBuf], source: &Path, config: &MoverConfig, stop: &AtomicBool, mut on_log: F) -> BatchReport
where
    F: FnMut(&str),
{
    let total = origins.len();
    tracing::info!("开始批处理: {} 个原始文件，来源文件 {}", total, source.display());

    let mut results = Vec::with_capacity(total);
    let mut stopped = false;
    for (i, origin) in origins.iter().enumerate() {
        if stop.load(Ordering::Relaxed) {
            tracing::warn!("收到停止请求，剩余 {} 个文件未处理", total - i);
            on_log(&format!("已停止，剩余 {} 个文件未处理", total - i));
            stopped = true;
            break;
        }
        let name = origin
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| origin.display().to_string());
        on_log(&format!("[{}/{}] 处理: {}", i + 1, total, name));
        results.push(process_single_file(origin, source, config, &mut on_log));
    }

    let summary = BatchSummary::from_results(&results);
    tracing::info!(
        "批处理完成: 成功 {}，失败 {}，有变化 {}",
        summary.succeeded,
        summary.failed,
        summary.changed
    );
    BatchReport { results, summary, stopped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn source_doc() -> Value {
        json!({
            "m_Name": "Source SDF",
            "m_fontInfo": {"Name": "SourceFont", "PointSize": 90, "Padding": 9},
            "m_FaceInfo": {"m_FamilyName": "Src", "m_StyleName": "Bold", "m_LineHeight": 110.5},
            "m_AtlasWidth": 1024,
            "m_AtlasHeight": 1024,
            "m_UsedGlyphRects": {"Array": []}
        })
    }

    fn write_json(dir: &Path, name: &str, v: &Value) -> PathBuf {
        let p = dir.join(name);
        std::fs::write(&p, serde_json::to_string(v).expect("序列化失败")).expect("写入失败");
        p
    }

    #[test]
    fn test_batch_scenario_mixed_results() {
        let dir = tempdir().expect("创建临时目录失败");
        let source = write_json(dir.path(), "S.json", &source_doc());
        let a = write_json(
            dir.path(),
            "A.json",
            &json!({
                "m_Name": "A SDF",
                "m_fontInfo": {"Name": "A", "PointSize": 36, "Padding": 9},
                "m_FaceInfo": {"m_FamilyName": "A", "m_StyleName": "Regular", "m_LineHeight": 40.0},
                "m_AtlasWidth": 512,
                "m_AtlasHeight": 1024,
                "m_UsedGlyphRects": {"Array": [{"m_X": 0}]}
            }),
        );
        let b = dir.path().join("B.json");
        std::fs::write(&b, "{ \"m_fontInfo\": ").expect("写入失败");
        let c = write_json(dir.path(), "C.json", &source_doc());

        let b_err = migrate_file(&b, &source, &MoverConfig::default()).unwrap_err();
        assert!(b_err.is_malformed(), "B.json 应归类为格式无效");

        let mut lines = Vec::new();
        let report = run_batch(&[a, b, c], &source, &MoverConfig::default(), |l| lines.push(l.to_string()));

        assert_eq!(report.summary, BatchSummary { total: 3, succeeded: 2, failed: 1, changed: 1 });
        assert!(!report.stopped);

        let ra = &report.results[0];
        assert!(ra.is_success());
        assert_eq!(
            ra.changed_fields,
            vec!["m_fontInfo.PointSize", "m_FaceInfo.m_LineHeight", "m_AtlasWidth", "m_UsedGlyphRects.Array"]
        );

        let rb = &report.results[1];
        assert!(!rb.is_success());
        assert!(rb.error_message().expect("应有错误信息").contains("原始文件JSON格式无效"));

        let rc = &report.results[2];
        assert!(rc.is_success() && rc.changed_fields.is_empty());

        let out: Value = serde_json::from_str(&std::fs::read_to_string(dir.path().join("Moved_Parameters/A.json")).expect("读取输出失败"))
            .expect("输出应为合法JSON");
        assert_eq!(out["m_Name"], json!("A SDF"), "未迁移的字段应保持原值");
        assert_eq!(out["m_fontInfo"]["Name"], json!("A"));
        assert_eq!(out["m_fontInfo"]["PointSize"], json!(90));
        assert_eq!(out["m_FaceInfo"]["m_StyleName"], json!("Regular"));
        assert_eq!(out["m_AtlasWidth"], json!(1024));
        assert_eq!(out["m_UsedGlyphRects"]["Array"], json!([]));

        assert!(!dir.path().join("Moved_Parameters/B.json").exists(), "失败的文件不应产生输出");
        assert!(lines.iter().any(|l| l == "[2/3] 处理: B.json"));
        assert!(lines.iter().any(|l| l == "  没有参数被移动"));
    }

    #[test]
    fn test_self_migration_is_byte_identical_to_normalized_copy() {
        let dir = tempdir().expect("创建临时目录失败");
        let raw = "{\"m_fontInfo\":{\"Name\":\"X\",\"Scale\":1.25},\"m_GlyphTable\":[ ],\"m_AtlasWidth\":256}";
        let doc_path = dir.path().join("D.json");
        std::fs::write(&doc_path, raw).expect("写入失败");

        let config = MoverConfig::default();
        let (changed, out_path) = migrate_file(&doc_path, &doc_path, &config).expect("迁移失败");
        assert!(changed.is_empty());

        let expected = serialize_document(&serde_json::from_str(raw).expect("解析失败"), &config.format).expect("序列化失败");
        assert_eq!(std::fs::read_to_string(out_path).expect("读取输出失败"), expected);
        assert!(expected.contains("\"m_GlyphTable\": []"));
    }

    #[test]
    fn test_missing_source_fails_every_file() {
        let dir = tempdir().expect("创建临时目录失败");
        let a = write_json(dir.path(), "A.json", &json!({}));
        let report = run_batch(&[a.clone(), a], &dir.path().join("S.json"), &MoverConfig::default(), |_| {});
        assert_eq!(report.summary.failed, 2);
        assert!(report.results[0].error_message().expect("应有错误信息").starts_with("来源文件不存在"));
    }

    #[test]
    fn test_non_utf8_origin_fails_as_malformed() {
        let dir = tempdir().expect("创建临时目录失败");
        let source = write_json(dir.path(), "S.json", &source_doc());
        let bad = dir.path().join("Bad.json");
        std::fs::write(&bad, b"{\"m_Name\": \"\xff\xfe\"}").expect("写入失败");

        let err = migrate_file(&bad, &source, &MoverConfig::default()).unwrap_err();
        assert!(matches!(err, MoverError::Parse { role: DocumentRole::Origin, .. }));

        let report = run_batch(&[bad], &source, &MoverConfig::default(), |_| {});
        assert!(report.results[0].error_message().expect("应有错误信息").starts_with("原始文件JSON格式无效"));
    }

    #[test]
    fn test_missing_origin_checked_before_source() {
        let dir = tempdir().expect("创建临时目录失败");
        let err = migrate_file(&dir.path().join("A.json"), &dir.path().join("S.json"), &MoverConfig::default()).unwrap_err();
        assert!(matches!(err, MoverError::Missing { role: DocumentRole::Origin, .. }));
    }

    #[test]
    fn test_custom_output_dir_and_indent() {
        let dir = tempdir().expect("创建临时目录失败");
        let source = write_json(dir.path(), "S.json", &json!({"m_AtlasWidth": 2048}));
        let a = write_json(dir.path(), "A.json", &json!({"m_AtlasWidth": 512}));
        let mut config = MoverConfig::default();
        config.output_dir_name = "out".to_string();
        config.format.indent_width = 4;

        let (changed, out_path) = migrate_file(&a, &source, &config).expect("迁移失败");
        assert_eq!(changed, vec!["m_AtlasWidth"]);
        assert_eq!(out_path, dir.path().join("out").join("A.json"));
        assert_eq!(std::fs::read_to_string(out_path).expect("读取输出失败"), "{\n    \"m_AtlasWidth\": 2048\n}");
    }

    #[test]
    fn test_stop_flag_halts_before_next_file() {
        let dir = tempdir().expect("创建临时目录失败");
        let source = write_json(dir.path(), "S.json", &json!({"m_AtlasWidth": 1}));
        let a = write_json(dir.path(), "A.json", &json!({"m_AtlasWidth": 0}));
        let b = write_json(dir.path(), "B.json", &json!({"m_AtlasWidth": 0}));

        let stop = AtomicBool::new(false);
        let report = run_batch_until(&[a, b], &source, &MoverConfig::default(), &stop, |line| {
            // 第一个文件写完后请求停止
            if line.contains("输出文件") {
                stop.store(true, Ordering::Relaxed);
            }
        });

        assert!(report.stopped);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.summary, BatchSummary { total: 1, succeeded: 1, failed: 0, changed: 1 });
        assert!(dir.path().join("Moved_Parameters/A.json").exists());
        assert!(!dir.path().join("Moved_Parameters/B.json").exists());
    }
}
