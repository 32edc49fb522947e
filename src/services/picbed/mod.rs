//! 图床配置管理
//!
//! - selector: 图床列表与配置解析（读取时按需升级）
//! - upgrader: 旧版单配置 → 多配置列表

mod selector;
mod upgrader;


pub use selector::{
    current_uploader, list_providers, needs_upgrade, resolve_default_profile, resolve_profiles,
};
pub use upgrader::{build_profile, has_profile_id, trim_values, upgrade};

/// 图床描述列表
pub(crate) const PICBED_LIST_KEY: &str = "picBed.list";

/// 旧版配置位置 `picBed.<type>`
pub(crate) fn legacy_key(type_: &str) -> String {
    format!("picBed.{}", type_)
}

/// 新版配置列表位置 `uploader.<type>`
pub(crate) fn uploader_key(type_: &str) -> String {
    format!("uploader.{}", type_)
}
