// lib.rs - 图床配置解析，供上传工具宿主使用
//
// 宿主持有配置对象与进程生命周期，本库只负责读写配置树并返回数据结构。

pub mod core;
pub mod data;
pub mod models;
pub mod services;
pub mod utils;

pub use models::*;

pub use data::{get_config, save_config, ConfigError, ConfigStore, JsonFileStore, MemoryStore};

pub use services::meta::{Clock, IdGenerator, SystemClock, UuidGenerator};
pub use services::migration_manager::{create_migration_manager, MigrationManager};
pub use services::picbed::{
    current_uploader, list_providers, needs_upgrade, resolve_default_profile, resolve_profiles,
    upgrade,
};

pub use core::{init_logger, update_log_level};
