//! 图床多配置迁移
//!
//! 批量将 `picBed.list` 中所有带旧版配置的图床升级到 `uploader.<type>`。
//! 没有旧版配置的图床留给读取时按需升级。

use crate::data::ConfigStore;
use crate::services::meta::{Clock, IdGenerator};
use crate::services::migration_manager::migration_trait::{Migration, MigrationResult};
use crate::services::picbed::{self, legacy_key, needs_upgrade};
use anyhow::Result;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

pub struct UploaderProfileMigration {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl UploaderProfileMigration {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }
}

impl Migration for UploaderProfileMigration {
    fn id(&self) -> &str {
        "uploader_profiles"
    }

    fn name(&self) -> &str {
        "图床多配置迁移"
    }

    fn target_version(&self) -> &str {
        "0.7.0"
    }

    fn execute(&self, store: &mut dyn ConfigStore) -> Result<MigrationResult> {
        let listing = picbed::list_providers(&*store);
        let mut seen = HashSet::new();
        let mut migrated = Vec::new();

        for bed in &listing.all {
            if !seen.insert(bed.type_.as_str()) {
                continue;
            }
            let has_legacy = !matches!(store.get(&legacy_key(&bed.type_)), None | Some(Value::Null));
            if !has_legacy || !needs_upgrade(&*store, &bed.type_) {
                continue;
            }

            picbed::upgrade(store, &bed.type_, self.ids.as_ref(), self.clock.as_ref());
            migrated.push(bed.type_.clone());
        }

        tracing::info!(providers = ?migrated, "图床多配置迁移完成");

        Ok(MigrationResult {
            migration_id: self.id().to_string(),
            success: true,
            message: format!("已升级 {} 个图床配置", migrated.len()),
            records_migrated: migrated.len(),
            duration_secs: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryStore;
    use crate::services::meta::{FixedClock, SequenceIdGenerator};
    use serde_json::json;

    fn migration() -> (UploaderProfileMigration, Arc<SequenceIdGenerator>) {
        let ids = Arc::new(SequenceIdGenerator::new("id"));
        let migration = UploaderProfileMigration::new(ids.clone(), Arc::new(FixedClock::new(7)));
        (migration, ids)
    }

    #[test]
    fn test_upgrades_listed_legacy_configs() {
        let existing = json!({"configList": [{"_id": "keep"}], "defaultId": "keep"});
        let mut store = MemoryStore::new(json!({
            "picBed": {
                "list": [
                    {"type": "smms", "visible": true},
                    {"type": "github", "visible": false},
                    {"type": "qiniu", "visible": true},
                    {"type": "tcyun", "visible": true},
                    {"type": "smms", "visible": true},
                ],
                "smms": {"token": "abc"},
                "github": {"repo": "a/b"},
                "tcyun": {"secretId": "x"},
            },
            "uploader": {"tcyun": existing.clone()},
        }));
        let (migration, ids) = migration();

        let result = migration.execute(&mut store).unwrap();

        assert_eq!(result.records_migrated, 2);
        assert_eq!(ids.issued(), 2);
        assert!(store.get("uploader.smms.configList").is_some());
        assert!(store.get("uploader.github.configList").is_some());
        // 没有旧版配置的图床不处理
        assert!(store.get("uploader.qiniu").is_none());
        // 已是新格式的不覆盖
        assert_eq!(store.get("uploader.tcyun"), Some(&existing));
    }

    #[test]
    fn test_empty_store() {
        let mut store = MemoryStore::default();
        let (migration, _ids) = migration();

        let result = migration.execute(&mut store).unwrap();

        assert!(result.success);
        assert_eq!(result.records_migrated, 0);
    }
}
