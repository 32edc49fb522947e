// Migration - 配置迁移接口
//
// 基于版本号驱动的配置迁移，所有迁移同步执行

use crate::data::ConfigStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 迁移接口
pub trait Migration: Send + Sync {
    /// 迁移唯一标识（如 "uploader_profiles"）
    fn id(&self) -> &str;

    /// 迁移名称（用于日志）
    fn name(&self) -> &str;

    /// 目标版本号
    ///
    /// 规则：当前配置版本 < target_version 时执行
    fn target_version(&self) -> &str;

    /// 执行迁移
    fn execute(&self, store: &mut dyn ConfigStore) -> Result<MigrationResult>;
}

/// 迁移结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationResult {
    pub migration_id: String,
    pub success: bool,
    pub message: String,
    /// 迁移的记录数
    pub records_migrated: usize,
    /// 执行时间（秒）
    pub duration_secs: f64,
}

/// 版本比较辅助函数
pub fn compare_versions(v1: &str, v2: &str) -> Ordering {
    use semver::Version;

    match (Version::parse(v1).ok(), Version::parse(v2).ok()) {
        (Some(ver1), Some(ver2)) => ver1.cmp(&ver2),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => v1.cmp(v2),
    }
}
