//! 配置存储抽象
//!
//! 宿主应用持有真实的配置对象，本库只通过 [`ConfigStore`] 读取和写入。

use crate::data::key_path::{apply_partial, get_nested, parse_key_path};
use crate::data::{ConfigError, Result};
use serde_json::{Map, Value};

/// 外部配置存储接口
///
/// 不提供任何锁：同一图床类型的并发读写需要由宿主串行化。
pub trait ConfigStore {
    /// 完整配置树
    fn root(&self) -> &Value;

    /// 按键路径读取，任意一段缺失时返回 None
    fn get(&self, key: &str) -> Option<&Value> {
        get_nested(self.root(), &parse_key_path(key))
    }

    /// 写入部分配置树
    ///
    /// `partial` 的每个键都是一条键路径，对应位置整体替换。
    fn save(&mut self, partial: &Map<String, Value>) -> Result<()>;

    /// 是否具备写入能力
    fn is_writable(&self) -> bool {
        true
    }
}

/// 内存配置存储
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStore {
    tree: Value,
    writable: bool,
}

impl MemoryStore {
    pub fn new(tree: Value) -> Self {
        Self {
            tree,
            writable: true,
        }
    }

    /// 不具备写入能力的存储（对应宿主未提供 saveConfig 的情况）
    pub fn read_only(tree: Value) -> Self {
        Self {
            tree,
            writable: false,
        }
    }

    pub fn into_inner(self) -> Value {
        self.tree
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

impl ConfigStore for MemoryStore {
    fn root(&self) -> &Value {
        &self.tree
    }

    fn save(&mut self, partial: &Map<String, Value>) -> Result<()> {
        if !self.writable {
            return Err(ConfigError::ReadOnly);
        }
        apply_partial(&mut self.tree, partial)
    }

    fn is_writable(&self) -> bool {
        self.writable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_get() {
        let store = MemoryStore::new(json!({"picBed": {"current": "smms"}}));

        assert_eq!(store.get("picBed.current"), Some(&json!("smms")));
        assert_eq!(store.get("picBed.missing"), None);
    }

    #[test]
    fn test_memory_store_save() {
        let mut store = MemoryStore::default();
        let partial = json!({"uploader.smms": {"defaultId": "a"}});

        store.save(partial.as_object().unwrap()).unwrap();

        assert_eq!(store.get("uploader.smms.defaultId"), Some(&json!("a")));
    }

    #[test]
    fn test_read_only_store_rejects_save() {
        let mut store = MemoryStore::read_only(json!({}));
        let partial = json!({"picBed.smms": {}});

        assert!(!store.is_writable());
        assert!(matches!(
            store.save(partial.as_object().unwrap()),
            Err(ConfigError::ReadOnly)
        ));
        assert_eq!(store.into_inner(), json!({}));
    }
}
