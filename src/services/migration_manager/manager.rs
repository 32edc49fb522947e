// Migration Manager - 迁移管理器核心
//
// 统一管理配置树中的批量迁移，版本号记录在配置树内

use super::migration_trait::{compare_versions, Migration, MigrationResult};
use crate::data::{get_config_as, save_config, ConfigStore, SaveOutcome};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::sync::Arc;

/// 当前库版本（从 Cargo.toml 读取）
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 配置版本号所在的键路径
pub const CONFIG_VERSION_KEY: &str = "settings.uploaderConfigVersion";

/// 无版本号时视为初始版本
const INITIAL_VERSION: &str = "0.0.0";

/// 迁移管理器
pub struct MigrationManager {
    migrations: Vec<Arc<dyn Migration>>,
}

impl MigrationManager {
    pub fn new() -> Self {
        Self {
            migrations: Vec::new(),
        }
    }

    /// 注册迁移
    pub fn register(&mut self, migration: Arc<dyn Migration>) {
        tracing::debug!(
            "注册迁移: {} (目标版本: {})",
            migration.id(),
            migration.target_version()
        );
        self.migrations.push(migration);
    }

    /// 执行所有需要的迁移
    ///
    /// 流程：
    /// 1. 读取配置版本（`settings.uploaderConfigVersion`）
    /// 2. 筛选 target_version > 当前版本 的迁移，按版本从低到高执行
    /// 3. 每个迁移成功后更新版本为其 target_version，失败则继续后续迁移
    /// 4. 最后将版本更新为当前库版本，失败时仅记录错误，仍返回各迁移结果
    pub fn run_all(&self, store: &mut dyn ConfigStore) -> Result<Vec<MigrationResult>> {
        let current_version = current_version(store);
        tracing::info!(
            "开始执行迁移检查（库版本: {}，配置版本: {}）",
            APP_VERSION,
            current_version
        );

        let mut pending: Vec<_> = self
            .migrations
            .iter()
            .filter(|m| compare_versions(&current_version, m.target_version()) == Ordering::Less)
            .collect();
        pending.sort_by(|a, b| compare_versions(a.target_version(), b.target_version()));

        if pending.is_empty() {
            tracing::info!("无需执行迁移");
        } else {
            tracing::info!("共 {} 个迁移需要执行", pending.len());
        }

        let mut results = Vec::new();
        for migration in pending {
            let start_time = std::time::Instant::now();

            match migration.execute(store) {
                Ok(mut result) => {
                    result.duration_secs = start_time.elapsed().as_secs_f64();
                    tracing::info!(
                        "迁移 {} 成功: {}（耗时 {:.3}s）",
                        migration.name(),
                        result.message,
                        result.duration_secs
                    );

                    if let Err(e) = update_config_version(store, migration.target_version()) {
                        tracing::error!("更新配置版本失败: {}", e);
                    }
                    results.push(result);
                }
                Err(e) => {
                    let result = MigrationResult {
                        migration_id: migration.id().to_string(),
                        success: false,
                        message: format!("迁移失败: {}", e),
                        records_migrated: 0,
                        duration_secs: start_time.elapsed().as_secs_f64(),
                    };
                    tracing::error!("迁移 {} 失败，继续执行后续迁移: {}", migration.name(), e);
                    results.push(result);
                }
            }
        }

        if compare_versions(&current_version, APP_VERSION) == Ordering::Less {
            if let Err(e) = update_config_version(store, APP_VERSION) {
                tracing::error!("更新配置版本到 {} 失败: {}", APP_VERSION, e);
            }
        }

        Ok(results)
    }

    /// 执行单个迁移（忽略版本号，用于手动触发）
    pub fn run_single(
        &self,
        store: &mut dyn ConfigStore,
        migration_id: &str,
    ) -> Result<MigrationResult> {
        let migration = self
            .migrations
            .iter()
            .find(|m| m.id() == migration_id)
            .ok_or_else(|| anyhow::anyhow!("未找到迁移: {}", migration_id))?;

        tracing::info!("手动执行迁移: {}", migration.name());
        migration.execute(store)
    }

    /// 获取所有已注册的迁移
    pub fn list_migrations(&self) -> Vec<MigrationInfo> {
        self.migrations
            .iter()
            .map(|m| MigrationInfo {
                id: m.id().to_string(),
                name: m.name().to_string(),
                target_version: m.target_version().to_string(),
            })
            .collect()
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// 迁移信息（用于列表展示）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationInfo {
    pub id: String,
    pub name: String,
    pub target_version: String,
}

/// 读取配置版本
pub fn current_version(store: &dyn ConfigStore) -> String {
    get_config_as::<String, _>(store, CONFIG_VERSION_KEY)
        .unwrap_or_else(|| INITIAL_VERSION.to_string())
}

fn update_config_version(store: &mut dyn ConfigStore, version: &str) -> Result<()> {
    let mut partial = Map::new();
    partial.insert(
        CONFIG_VERSION_KEY.to_string(),
        Value::String(version.to_string()),
    );

    if save_config(store, &partial)? == SaveOutcome::Saved {
        tracing::info!("配置版本已更新: {}", version);
    }
    Ok(())
}
