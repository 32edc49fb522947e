// Migration Manager Module
//
// 配置树批量迁移：读取时的按需升级之外，宿主可以在启动时一次性升级全部图床

mod manager;
mod migration_trait;
mod migrations;

pub use manager::{current_version, MigrationInfo, MigrationManager, CONFIG_VERSION_KEY};
pub use migration_trait::{compare_versions, Migration, MigrationResult};
pub use migrations::UploaderProfileMigration;

use crate::services::meta::{Clock, IdGenerator};
use std::sync::Arc;

/// 创建并初始化迁移管理器
///
/// 自动注册所有迁移（按版本号执行）：
/// - UploaderProfileMigration (0.7.0) - 旧版单配置 → 多配置列表
pub fn create_migration_manager(
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
) -> MigrationManager {
    let mut manager = MigrationManager::new();

    manager.register(Arc::new(UploaderProfileMigration::new(ids, clock)));

    tracing::debug!(
        "迁移管理器初始化完成，已注册 {} 个迁移",
        manager.list_migrations().len()
    );

    manager
}
