//! 图床配置数据类型
//!
//! 对应配置树中的三块区域：
//! - `picBed.list`: 图床描述列表（[`PicBedType`]）
//! - `picBed.<type>`: 旧版单配置（未类型化的 JSON 对象）
//! - `uploader.<type>`: 新版多配置列表（[`UploaderConfigItem`]）

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 未设置名称时的默认配置名
pub const DEFAULT_CONFIG_NAME: &str = "Default";

/// 可见列表中固定排在最前的图床类型
pub const PINNED_PICBED_TYPE: &str = "smms";

/// 图床描述
///
/// 字段宽松读取：`type`、`name` 接受数字，`visible` 按真值判断，
/// 其余字段原样保存在 `extra` 中。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicBedType {
    #[serde(rename = "type", default, deserialize_with = "de_lossy_string")]
    pub type_: String,
    #[serde(default, deserialize_with = "de_lossy_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de_truthy")]
    pub visible: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 可用图床列表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderListing {
    /// `picBed.list` 原样内容
    pub all: Vec<PicBedType>,
    /// 可见图床，smms 固定在最前
    pub visible: Vec<PicBedType>,
}

/// 单个图床配置（Profile）
///
/// 元数据字段以下划线开头，其余图床自身字段（token、仓库地址等）原样保存在 `fields` 中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploaderProfile {
    #[serde(rename = "_id", default, deserialize_with = "de_lossy_string")]
    pub id: String,
    #[serde(
        rename = "_configName",
        default,
        deserialize_with = "de_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub config_name: Option<String>,
    #[serde(
        rename = "_createdAt",
        default,
        deserialize_with = "de_opt_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<i64>,
    #[serde(
        rename = "_updatedAt",
        default,
        deserialize_with = "de_opt_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<i64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl UploaderProfile {
    /// 显示名称，未设置时为 "Default"
    pub fn display_name(&self) -> &str {
        self.config_name.as_deref().unwrap_or(DEFAULT_CONFIG_NAME)
    }

    /// 更新修改时间，`_id` 与 `_createdAt` 保持不变
    pub fn touch(&mut self, now_millis: i64) {
        self.updated_at = Some(now_millis);
    }
}

/// 单个图床类型的配置列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploaderConfigItem {
    pub config_list: Vec<UploaderProfile>,
    #[serde(default, deserialize_with = "de_lossy_string")]
    pub default_id: String,
}

impl UploaderConfigItem {
    pub fn is_empty(&self) -> bool {
        self.config_list.is_empty()
    }

    /// 默认配置
    ///
    /// `default_id` 为空或找不到对应配置时回退到第一个配置。
    pub fn default_profile(&self) -> Option<&UploaderProfile> {
        self.config_list
            .iter()
            .find(|p| !self.default_id.is_empty() && p.id == self.default_id)
            .or_else(|| self.config_list.first())
    }
}

/// 配置值的真值判断
///
/// 缺失、`null`、`false`、`0` 与空字符串为假，其余（包括空数组与空对象）为真。
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn de_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

fn de_lossy_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn de_opt_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
