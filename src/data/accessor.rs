//! 配置读写入口
//!
//! 对 [`ConfigStore`] 的无状态封装：读取带默认值兜底，写入带能力检查。

use crate::data::store::ConfigStore;
use crate::data::Result;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// 保存结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// 已交给存储持久化
    Saved,
    /// 存储不可写或没有待写内容，未执行写入
    Skipped,
}

/// 根据键路径获取配置项
///
/// - `key` 为空时返回整个配置树
/// - 任意一段缺失时返回 `default`，未提供默认值时返回 `Value::Null`
pub fn get_config<S>(store: &S, key: Option<&str>, default: Option<Value>) -> Value
where
    S: ConfigStore + ?Sized,
{
    let key = match key {
        Some(k) if !k.is_empty() => k,
        _ => return store.root().clone(),
    };

    match store.get(key) {
        Some(value) => value.clone(),
        None => default.unwrap_or(Value::Null),
    }
}

/// 按类型读取配置项，缺失或类型不匹配时返回 None
pub fn get_config_as<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: ConfigStore + ?Sized,
{
    let value = store.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, error = %e, "配置项类型不匹配，已忽略");
            None
        }
    }
}

/// 保存配置
///
/// 存储不可写或 `partial` 为空时仅记录警告。存储自身的持久化错误原样返回。
pub fn save_config<S>(store: &mut S, partial: &Map<String, Value>) -> Result<SaveOutcome>
where
    S: ConfigStore + ?Sized,
{
    if partial.is_empty() || !store.is_writable() {
        tracing::warn!(
            writable = store.is_writable(),
            keys = partial.len(),
            "配置存储不可写或待保存内容为空，跳过保存"
        );
        return Ok(SaveOutcome::Skipped);
    }

    tracing::debug!(keys = ?partial.keys().collect::<Vec<_>>(), "保存配置");
    store.save(partial)?;
    Ok(SaveOutcome::Saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryStore;
    use crate::models::PicBedType;
    use serde_json::json;

    fn sample_store() -> MemoryStore {
        MemoryStore::new(json!({
            "picBed": {
                "current": "smms",
                "smms": {"token": "abc"},
                "list": [{"type": "smms", "name": "SM.MS", "visible": true}],
            }
        }))
    }

    #[test]
    fn test_get_config_without_key_returns_root() {
        let store = sample_store();

        assert_eq!(get_config(&store, None, None), store.root().clone());
        assert_eq!(get_config(&store, Some(""), None), store.root().clone());
    }

    #[test]
    fn test_get_config_with_key() {
        let store = sample_store();

        assert_eq!(
            get_config(&store, Some("picBed.smms.token"), None),
            json!("abc")
        );
    }

    #[test]
    fn test_get_config_default_fallback() {
        let store = sample_store();

        assert_eq!(
            get_config(&store, Some("uploader.smms"), Some(json!({}))),
            json!({})
        );
        assert_eq!(get_config(&store, Some("a.b.c.d"), None), Value::Null);
    }

    #[test]
    fn test_get_config_as() {
        let store = sample_store();

        let list: Option<Vec<PicBedType>> = get_config_as(&store, "picBed.list");
        assert_eq!(list.map(|l| l.len()), Some(1));

        let mismatched: Option<Vec<PicBedType>> = get_config_as(&store, "picBed.current");
        assert!(mismatched.is_none());
    }

    #[test]
    fn test_save_config_writes() {
        let mut store = sample_store();
        let partial = json!({"picBed.current": "github"});

        let outcome = save_config(&mut store, partial.as_object().unwrap()).unwrap();

        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(store.get("picBed.current"), Some(&json!("github")));
    }

    #[test]
    fn test_save_config_skips_read_only_store() {
        let mut store = MemoryStore::read_only(json!({}));
        let partial = json!({"picBed.current": "github"});

        let outcome = save_config(&mut store, partial.as_object().unwrap()).unwrap();

        assert_eq!(outcome, SaveOutcome::Skipped);
        assert_eq!(store.get("picBed.current"), None);
    }

    #[test]
    fn test_save_config_skips_empty_partial() {
        let mut store = sample_store();
        let before = store.clone();

        let outcome = save_config(&mut store, &Map::new()).unwrap();

        assert_eq!(outcome, SaveOutcome::Skipped);
        assert_eq!(store, before);
    }

    #[test]
    fn test_save_config_propagates_store_error() {
        let mut store = sample_store();
        let partial = json!({"picBed..smms": {}});

        assert!(save_config(&mut store, partial.as_object().unwrap()).is_err());
    }
}
