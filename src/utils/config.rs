use crate::data::{ConfigError, Result};
use std::fs;
use std::path::PathBuf;

/// 覆盖默认配置目录的环境变量
pub const CONFIG_DIR_ENV: &str = "PICGO_CONFIG_DIR";

/// 默认配置文件名
pub const STORE_FILE_NAME: &str = "data.json";

/// PicGo 配置目录（$PICGO_CONFIG_DIR 或 ~/.picgo），若不存在则创建
pub fn config_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => dirs::home_dir()
            .ok_or_else(|| {
                ConfigError::io(
                    "~",
                    std::io::Error::new(std::io::ErrorKind::NotFound, "无法获取用户主目录"),
                )
            })?
            .join(".picgo"),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| ConfigError::io(&dir, e))?;
    }
    Ok(dir)
}

/// 默认配置文件路径
pub fn default_store_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(STORE_FILE_NAME))
}
