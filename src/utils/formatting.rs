//! 输出格式化：按配置缩进序列化，并清理空数组中的多余空白

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

use crate::model::config::FormatOptions;

/// 将文档序列化为带缩进的文本，并应用空数组清理
pub fn serialize_document(doc: &Map<String, Value>, options: &FormatOptions) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(options.indent_width);
    let mut buf = Vec::with_capacity(4096);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    // serde_json 只输出合法 UTF-8
    let text = String::from_utf8_lossy(&buf).into_owned();
    Ok(clean_empty_arrays(&text).into_owned())
}

/// 把只含空白的数组 `[ \n ]` 压缩为 `[]`
///
/// 纯文本后处理；字符串字面量整体匹配后原样保留，其中的方括号不受影响。
pub fn clean_empty_arrays(json: &str) -> Cow<'_, str> {
    static EMPTY_ARRAY: OnceLock<Regex> = OnceLock::new();
    let re = EMPTY_ARRAY.get_or_init(|| {
        Regex::new(r#""(?:[^"\\]|\\.)*"|\[\s*\]"#).expect("empty array regex is valid")
    });
    re.replace_all(json, |caps: &Captures| {
        let m = &caps[0];
        if m.starts_with('"') {
            m.to_string()
        } else {
            "[]".to_string()
        }
    })
}
