//! 配置存储访问层
//!
//! # 模块组织
//!
//! - `error`: 统一错误类型定义
//! - `store`: 存储抽象 `ConfigStore` 与内存实现
//! - `json_store`: JSON 文件存储
//! - `accessor`: 带默认值兜底与写入保护的读写入口
//!
//! # 使用示例
//!
//! ```rust
//! use picbed_config::data::{get_config, save_config, MemoryStore};
//! use serde_json::{json, Map};
//!
//! # fn main() -> picbed_config::data::Result<()> {
//! let mut store = MemoryStore::new(json!({"picBed": {"current": "smms"}}));
//! let current = get_config(&store, Some("picBed.current"), None);
//!
//! let mut partial = Map::new();
//! partial.insert("picBed.current".to_string(), json!("github"));
//! save_config(&mut store, &partial)?;
//! # Ok(())
//! # }
//! ```

pub mod accessor;
pub mod error;
pub mod json_store;
mod key_path;
pub mod store;

pub use accessor::{get_config, get_config_as, save_config, SaveOutcome};
pub use error::{ConfigError, Result};
pub use json_store::JsonFileStore;
pub use store::{ConfigStore, MemoryStore};
