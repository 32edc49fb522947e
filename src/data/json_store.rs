//! JSON 文件配置存储
//!
//! 启动时整体读入内存，每次保存后整体回写：
//! - 文件不存在时视为空配置
//! - 自动创建父目录
//! - Unix 权限设置（0o600）
//!
//! # 使用示例
//!
//! ```rust
//! use picbed_config::{resolve_profiles, JsonFileStore, SystemClock, UuidGenerator};
//!
//! # fn main() -> picbed_config::data::Result<()> {
//! let mut store = JsonFileStore::open_default()?;
//! let item = resolve_profiles(&mut store, "smms", &UuidGenerator, &SystemClock);
//! # Ok(())
//! # }
//! ```

use crate::data::key_path::apply_partial;
use crate::data::store::ConfigStore;
use crate::data::{ConfigError, Result};
use crate::utils::config::default_store_path;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// 基于 JSON 文件的配置存储
pub struct JsonFileStore {
    path: PathBuf,
    tree: Value,
}

impl JsonFileStore {
    /// 打开指定路径的配置文件
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tree = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
            if content.trim().is_empty() {
                Value::Object(Map::new())
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Value::Object(Map::new())
        };

        if !tree.is_object() {
            return Err(ConfigError::UnexpectedRoot(path.display().to_string()));
        }

        tracing::debug!(path = %path.display(), "已加载配置文件");
        Ok(Self { path, tree })
    }

    /// 打开默认位置的配置文件（~/.picgo/data.json）
    pub fn open_default() -> Result<Self> {
        Self::open(default_store_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 重新从磁盘加载（丢弃未保存的内存状态）
    pub fn reload(&mut self) -> Result<()> {
        *self = Self::open(self.path.clone())?;
        Ok(())
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let content = serde_json::to_string_pretty(&self.tree)?;
        fs::write(&self.path, content).map_err(|e| ConfigError::io(&self.path, e))?;

        set_permissions(&self.path)
    }
}

impl ConfigStore for JsonFileStore {
    fn root(&self) -> &Value {
        &self.tree
    }

    fn save(&mut self, partial: &Map<String, Value>) -> Result<()> {
        let mut next = self.tree.clone();
        apply_partial(&mut next, partial)?;

        let previous = std::mem::replace(&mut self.tree, next);
        if let Err(e) = self.write() {
            // 写盘失败时保持内存与磁盘一致
            self.tree = previous;
            return Err(e);
        }
        Ok(())
    }
}

/// 设置文件权限（Unix 平台 0o600）
#[cfg(unix)]
fn set_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = fs::metadata(path).map_err(|e| ConfigError::io(path, e))?;
    let mut perms = metadata.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms).map_err(|e| ConfigError::io(path, e))
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("data.json")).unwrap();

        assert_eq!(store.root(), &json!({}));
    }

    #[test]
    fn test_open_rejects_non_object_root() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("data.json");
        fs::write(&file_path, "[1, 2]").unwrap();

        assert!(matches!(
            JsonFileStore::open(&file_path),
            Err(ConfigError::UnexpectedRoot(_))
        ));
    }

    #[test]
    fn test_open_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("data.json");
        fs::write(&file_path, "{invalid").unwrap();

        assert!(matches!(
            JsonFileStore::open(&file_path),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_save_persists_to_disk() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("data.json");
        fs::create_dir_all(file_path.parent().unwrap()).unwrap();
        fs::write(&file_path, r#"{"picBed": {"smms": {"token": "abc"}}}"#).unwrap();

        let mut store = JsonFileStore::open(&file_path).unwrap();
        let partial = json!({"uploader.smms": {"configList": [], "defaultId": ""}});
        store.save(partial.as_object().unwrap()).unwrap();

        let reopened = JsonFileStore::open(&file_path).unwrap();
        assert_eq!(
            reopened.root(),
            &json!({
                "picBed": {"smms": {"token": "abc"}},
                "uploader": {"smms": {"configList": [], "defaultId": ""}},
            })
        );
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("subdir").join("data.json");

        let mut store = JsonFileStore::open(&file_path).unwrap();
        let partial = json!({"picBed.current": "smms"});
        store.save(partial.as_object().unwrap()).unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn test_reload_discards_memory_state() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("data.json");

        let mut store = JsonFileStore::open(&file_path).unwrap();
        let partial = json!({"picBed.current": "smms"});
        store.save(partial.as_object().unwrap()).unwrap();
        fs::write(&file_path, r#"{"picBed": {"current": "github"}}"#).unwrap();

        store.reload().unwrap();
        assert_eq!(store.get("picBed.current"), Some(&json!("github")));
    }

    #[test]
    #[cfg(unix)]
    fn test_permissions_unix() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("data.json");

        let mut store = JsonFileStore::open(&file_path).unwrap();
        let partial = json!({"picBed.current": "smms"});
        store.save(partial.as_object().unwrap()).unwrap();

        let perms = fs::metadata(&file_path).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
