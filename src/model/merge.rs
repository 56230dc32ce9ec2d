//! 合并引擎：按字段整体替换，并记录实际发生变化的字段
//!
//! 相等性采用 `serde_json::Value` 的结构化比较：对象不关心键顺序，数组关心元素顺序。

use serde_json::{Map, Value};

use crate::model::field_policy::{resolve_fields, MigrationRule, MIGRATION_PLAN};

/// 将 `fields` 中列出的字段从 `from` 复制到 `to`，返回发生变化的字段名
///
/// 来源中缺失或为 `null` 的字段跳过；与目标值结构相等的字段不修改、不记录。
/// 变化的字段先从目标中移除再插入，因此会排到所在对象的末尾。
pub fn migrate_fields(from: &Map<String, Value>, to: &mut Map<String, Value>, fields: &[String]) -> Vec<String> {
    let mut moved = Vec::new();
    for field in fields {
        if move_value(from, to, field) {
            moved.push(field.clone());
        }
    }
    moved
}

/// 根级标量迁移（m_AtlasWidth / m_AtlasHeight），不经过字段策略
pub fn migrate_scalar(from: &Map<String, Value>, to: &mut Map<String, Value>, key: &str) -> bool {
    move_value(from, to, key)
}

fn move_value(from: &Map<String, Value>, to: &mut Map<String, Value>, key: &str) -> bool {
    let Some(new_value) = from.get(key).filter(|v| !v.is_null()) else {
        return false;
    };
    if to.get(key) == Some(new_value) {
        return false;
    }
    // preserve_order 下 Map::remove 是 swap_remove，会打乱其余键的顺序
    to.shift_remove(key);
    to.insert(key.to_string(), new_value.clone());
    true
}

/// 按迁移计划处理整份文档，返回带限定路径的变更记录（`节点.字段` 或标量键名）
///
/// 任一文档缺少某节点，或该节点不是对象时，整个节点跳过。
pub fn migrate_document(from: &Map<String, Value>, to: &mut Map<String, Value>) -> Vec<String> {
    let mut changed = Vec::new();
    for rule in MIGRATION_PLAN {
        match rule {
            MigrationRule::Section { name, .. } => {
                let Some(Value::Object(from_section)) = from.get(*name) else {
                    continue;
                };
                let Some(Value::Object(to_section)) = to.get_mut(*name) else {
                    continue;
                };
                let fields = resolve_fields(name, from_section);
                let moved = migrate_fields(from_section, to_section, &fields);
                changed.extend(moved.into_iter().map(|f| format!("{}.{}", name, f)));
            }
            MigrationRule::Scalar { key } => {
                if migrate_scalar(from, to, key) {
                    changed.push((*key).to_string());
                }
            }
        }
    }
    changed
}
