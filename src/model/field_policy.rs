//! 字段选择策略：决定每个节点中哪些字段需要迁移
//!
//! 规则以声明式表格表示（节点名 → 排除字段集），新增节点只需加一行数据。
//! 字段集始终由来源文件的节点内容驱动，不读取目标节点。

use serde_json::{Map, Value};

/// 迁移计划中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationRule {
    /// 对象节点：逐字段迁移，`excluded` 中的字段永不覆盖
    Section {
        name: &'static str,
        excluded: &'static [&'static str],
    },
    /// 根级标量：直接比较后替换
    Scalar { key: &'static str },
}

impl MigrationRule {
    /// 节点名或标量键名
    pub fn key(&self) -> &'static str {
        match self {
            MigrationRule::Section { name, .. } => *name,
            MigrationRule::Scalar { key } => *key,
        }
    }
}

/// 迁移计划（顺序即变更记录的输出顺序）
pub const MIGRATION_PLAN: &[MigrationRule] = &[
    MigrationRule::Section { name: "m_fontInfo", excluded: &["Name"] },
    MigrationRule::Section { name: "m_glyphInfoList", excluded: &[] },
    MigrationRule::Section { name: "m_FaceInfo", excluded: &["m_FamilyName", "m_StyleName"] },
    MigrationRule::Scalar { key: "m_AtlasWidth" },
    MigrationRule::Scalar { key: "m_AtlasHeight" },
    MigrationRule::Section { name: "m_GlyphTable", excluded: &[] },
    MigrationRule::Section { name: "m_CharacterTable", excluded: &[] },
    MigrationRule::Section { name: "m_UsedGlyphRects", excluded: &[] },
    MigrationRule::Section { name: "m_FreeGlyphRects", excluded: &[] },
];

/// 查询节点的排除字段集；不在表中的节点返回 None
pub fn excluded_fields(section_name: &str) -> Option<&'static [&'static str]> {
    MIGRATION_PLAN.iter().find_map(|rule| match rule {
        MigrationRule::Section { name, excluded } if *name == section_name => Some(*excluded),
        _ => None,
    })
}

/// 计算某节点需要迁移的字段列表（保持来源节点的键顺序）
///
/// 未登记的节点名按“全部字段”处理。
pub fn resolve_fields(section_name: &str, source_section: &Map<String, Value>) -> Vec<String> {
    let excluded = excluded_fields(section_name).unwrap_or(&[]);
    source_section
        .keys()
        .filter(|k| !excluded.iter().any(|e| *e == k.as_str()))
        .cloned()
        .collect()
}
