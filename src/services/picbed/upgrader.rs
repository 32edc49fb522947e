//! 旧版图床配置升级
//!
//! 旧版：`picBed.<type>` 保存单个未带元数据的配置对象。
//! 新版：`uploader.<type>` 保存 `{ configList, defaultId }`，
//! 同时 `picBed.<type>` 镜像默认配置以兼容仍读取旧路径的代码。

use super::{legacy_key, uploader_key};
use crate::data::{save_config, ConfigStore, SaveOutcome};
use crate::models::picbed::is_truthy;
use crate::models::{UploaderConfigItem, UploaderProfile, DEFAULT_CONFIG_NAME};
use crate::services::meta::{Clock, IdGenerator};
use serde_json::{Map, Value};

/// 元数据字段
const META_KEYS: [&str; 4] = ["_id", "_configName", "_createdAt", "_updatedAt"];

/// 规整旧版配置的顶层字符串字段
///
/// 字符串去除首尾空白，空白字符串字段整体移除，其余类型原样保留。
pub fn trim_values(source: &Map<String, Value>) -> Map<String, Value> {
    source
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| (key.clone(), Value::String(trimmed.to_string())))
            }
            other => Some((key.clone(), other.clone())),
        })
        .collect()
}

/// 旧版配置是否已带有可用的 `_id`
///
/// 按真值判断：缺失、`null`、`false`、`0` 与空字符串视为没有 `_id`。
pub fn has_profile_id(legacy: &Map<String, Value>) -> bool {
    legacy.get("_id").is_some_and(is_truthy)
}

/// 为未迁移的旧版配置补全元数据
///
/// 时钟只读取一次，`_createdAt` 与 `_updatedAt` 相同。
pub fn build_profile(
    legacy: &Map<String, Value>,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
) -> UploaderProfile {
    let mut fields = trim_values(legacy);
    let config_name = match fields.remove("_configName") {
        Some(Value::String(name)) => name,
        _ => DEFAULT_CONFIG_NAME.to_string(),
    };
    for key in META_KEYS {
        fields.remove(key);
    }

    let now = clock.now_millis();
    UploaderProfile {
        id: ids.new_id(),
        config_name: Some(config_name),
        created_at: Some(now),
        updated_at: Some(now),
        fields,
    }
}

/// 将 `picBed.<type>` 升级为配置列表并写回
///
/// 已带 `_id` 的旧版配置原样作为唯一配置：写回的 JSON 与读取到的完全一致，
/// 不重新生成元数据。返回值中的元数据按宽松规则读取。
/// 存储不可写或写入失败时仍返回内存中的结果，下次读取会重新尝试升级。
///
/// 同一图床类型的并发升级需要由调用方串行化，否则可能生成两个不同的 `_id`。
pub fn upgrade<S>(
    store: &mut S,
    type_: &str,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
) -> UploaderConfigItem
where
    S: ConfigStore + ?Sized,
{
    if type_.is_empty() {
        return UploaderConfigItem::default();
    }

    let legacy = read_legacy(&*store, type_);
    let (profile, stored) = if has_profile_id(&legacy) {
        match serde_json::from_value::<UploaderProfile>(Value::Object(legacy.clone())) {
            Ok(profile) => (profile, Ok(Value::Object(legacy))),
            Err(e) => {
                tracing::warn!(type_, error = %e, "已有配置元数据无法解析，重新生成");
                let profile = build_profile(&legacy, ids, clock);
                let stored = serde_json::to_value(&profile);
                (profile, stored)
            }
        }
    } else {
        let profile = build_profile(&legacy, ids, clock);
        let stored = serde_json::to_value(&profile);
        (profile, stored)
    };

    let item = UploaderConfigItem {
        default_id: profile.id.clone(),
        config_list: vec![profile],
    };
    match stored {
        Ok(profile_value) => persist(store, type_, profile_value),
        Err(e) => tracing::error!(type_, error = %e, "序列化图床配置失败，跳过保存"),
    }

    tracing::info!(type_, default_id = %item.default_id, "图床配置已升级为多配置格式");
    item
}

fn read_legacy<S>(store: &S, type_: &str) -> Map<String, Value>
where
    S: ConfigStore + ?Sized,
{
    match store.get(&legacy_key(type_)) {
        Some(Value::Object(map)) => map.clone(),
        None | Some(Value::Null) => Map::new(),
        Some(other) => {
            tracing::warn!(type_, value = %other, "旧版图床配置不是对象，按空配置处理");
            Map::new()
        }
    }
}

/// 一次保存同时写入 `uploader.<type>` 与 `picBed.<type>`
///
/// `defaultId` 取配置 JSON 中的 `_id` 原值。
fn persist<S>(store: &mut S, type_: &str, profile_value: Value)
where
    S: ConfigStore + ?Sized,
{
    let default_id = profile_value.get("_id").cloned().unwrap_or_default();
    let mut item_value = Map::new();
    item_value.insert(
        "configList".to_string(),
        Value::Array(vec![profile_value.clone()]),
    );
    item_value.insert("defaultId".to_string(), default_id);

    let mut partial = Map::new();
    partial.insert(uploader_key(type_), Value::Object(item_value));
    partial.insert(legacy_key(type_), profile_value);

    match save_config(store, &partial) {
        Ok(SaveOutcome::Saved) => {}
        Ok(SaveOutcome::Skipped) => {
            tracing::warn!(type_, "配置未持久化，下次读取将重新升级");
        }
        Err(e) => {
            tracing::error!(type_, error = %e, "保存升级后的图床配置失败");
        }
    }
}
