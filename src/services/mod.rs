// 服务层模块
//
// - meta: 配置 ID 与时间戳生成
// - picbed: 图床列表与配置解析、旧版配置升级
// - migration_manager: 版本号驱动的批量迁移

pub mod meta;
pub mod migration_manager;
pub mod picbed;

pub use meta::{Clock, FixedClock, IdGenerator, SequenceIdGenerator, SystemClock, UuidGenerator};
pub use migration_manager::{create_migration_manager, MigrationManager};
pub use picbed::{
    current_uploader, list_providers, needs_upgrade, resolve_default_profile, resolve_profiles,
    upgrade,
};
