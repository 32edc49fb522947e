//! 键路径工具
//!
//! 使用 `.` 分隔的键路径访问嵌套 JSON（如 "picBed.smms"），不支持转义。
//! 数组节点可用数字下标访问（如 "picBed.list.0"）。

use crate::data::{ConfigError, Result};
use serde_json::{Map, Value};

/// 解析键路径
pub(crate) fn parse_key_path(key: &str) -> Vec<&str> {
    key.split('.').collect()
}

/// 获取嵌套值，任意一段缺失时返回 None
pub(crate) fn get_nested<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for segment in path {
        current = match current {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// 设置嵌套值
///
/// 自动创建不存在的中间对象，非对象的中间节点会被替换为对象。
pub(crate) fn set_nested(value: &mut Value, path: &[&str], new_value: Value) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        return Err(ConfigError::InvalidKey("空键路径".into()));
    };
    if path.iter().any(|segment| segment.is_empty()) {
        return Err(ConfigError::InvalidKey(path.join(".")));
    }

    let mut current = value;
    for &segment in parents {
        current = ensure_object(current)
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()));
    }

    ensure_object(current).insert((*last).to_string(), new_value);
    Ok(())
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("节点已替换为对象"),
    }
}

/// 将部分配置树按键路径逐项写入目标树
///
/// 每个顶层键本身就是一条键路径，对应位置的值整体替换，兄弟节点保持不变。
pub(crate) fn apply_partial(target: &mut Value, partial: &Map<String, Value>) -> Result<()> {
    for (key, value) in partial {
        set_nested(target, &parse_key_path(key), value.clone())?;
    }
    Ok(())
}
