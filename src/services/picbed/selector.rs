//! 图床列表与配置解析

use super::upgrader::upgrade;
use super::{uploader_key, PICBED_LIST_KEY};
use crate::data::{get_config_as, ConfigStore};
use crate::models::picbed::is_truthy;
use crate::models::{
    PicBedType, ProviderListing, UploaderConfigItem, UploaderProfile, PINNED_PICBED_TYPE,
};
use crate::services::meta::{Clock, IdGenerator};
use serde_json::Value;

/// 当前选中图床的键（新版优先，旧版兜底）
const CURRENT_UPLOADER_KEYS: [&str; 2] = ["picBed.uploader", "picBed.current"];

/// 获取可用的图床列表
///
/// `all` 保留每个对象形式的描述（字段宽松读取），非对象条目无法作为描述，记录警告后跳过。
/// 可见列表只包含 `visible` 为真且 `type` 非空的描述，保持 `picBed.list` 中的顺序，
/// 仅将 smms 固定在最前。
pub fn list_providers<S>(store: &S) -> ProviderListing
where
    S: ConfigStore + ?Sized,
{
    let all: Vec<PicBedType> = match store.get(PICBED_LIST_KEY) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match serde_json::from_value(item.clone()) {
                Ok(bed) => Some(bed),
                Err(e) => {
                    tracing::warn!(item = %item, error = %e, "忽略非对象的图床描述");
                    None
                }
            })
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            tracing::warn!(value = %other, "picBed.list 不是数组，按空列表处理");
            Vec::new()
        }
    };

    let mut visible: Vec<PicBedType> = all
        .iter()
        .filter(|bed| bed.visible && !bed.type_.is_empty())
        .cloned()
        .collect();
    // 稳定排序：false < true，smms 排在最前，其余保持原顺序
    visible.sort_by_key(|bed| bed.type_ != PINNED_PICBED_TYPE);

    ProviderListing { all, visible }
}

/// `uploader.<type>` 是否缺少新版配置列表
///
/// 只有 `configList` 缺失或为假值（`null`、空字符串等）时才需要升级。
/// 存在但不是数组的 `configList` 属于损坏数据，由读取路径降级处理，不会被覆盖。
pub fn needs_upgrade<S>(store: &S, type_: &str) -> bool
where
    S: ConfigStore + ?Sized,
{
    if type_.is_empty() {
        return false;
    }
    !store
        .get(&uploader_key(type_))
        .and_then(|item| item.get("configList"))
        .is_some_and(is_truthy)
}

/// 获取图床类型的配置列表
///
/// - `type_` 为空时返回空列表，不访问存储
/// - 已有 `configList` 时原样返回（`defaultId` 不做校验）
/// - `configList` 无法解析时记录警告并返回空列表，不覆盖已有数据
/// - 否则从 `picBed.<type>` 升级并写回
///
/// 连续调用是幂等的：升级成功写入后不会再次生成 `_id`。
/// 同一图床类型的并发调用需要由调用方串行化。
pub fn resolve_profiles<S>(
    store: &mut S,
    type_: &str,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
) -> UploaderConfigItem
where
    S: ConfigStore + ?Sized,
{
    if type_.is_empty() {
        tracing::debug!("图床类型为空，返回空配置列表");
        return UploaderConfigItem::default();
    }

    if needs_upgrade(&*store, type_) {
        tracing::debug!(type_, "未找到多配置列表，执行升级");
        return upgrade(store, type_, ids, clock);
    }

    get_config_as::<UploaderConfigItem, _>(&*store, &uploader_key(type_)).unwrap_or_default()
}

/// 获取图床类型的默认配置
///
/// `defaultId` 为空或失效时回退到第一个配置。
pub fn resolve_default_profile<S>(
    store: &mut S,
    type_: &str,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
) -> Option<UploaderProfile>
where
    S: ConfigStore + ?Sized,
{
    resolve_profiles(store, type_, ids, clock)
        .default_profile()
        .cloned()
}

/// 当前选中的图床类型
pub fn current_uploader<S>(store: &S) -> Option<String>
where
    S: ConfigStore + ?Sized,
{
    CURRENT_UPLOADER_KEYS.iter().find_map(|key| match store.get(key) {
        Some(Value::String(type_)) if !type_.trim().is_empty() => Some(type_.trim().to_string()),
        _ => None,
    })
}
