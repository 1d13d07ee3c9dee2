//! 响应形状识别与记录规范化
//!
//! 列表接口可能返回裸数组，也可能把数组包在某个字段里。
//! 所有形状判断都集中在 [`ListPayload::classify`]，调用方只处理三种结果。

use crate::date::{self, ServerTime};
use crate::{Role, StudentRecord, grade_to_level, level_to_grade};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// 按顺序探测的信封字段
pub const ENVELOPE_KEYS: [&str; 4] = ["students", "data", "items", "results"];

// =========================================================
// 错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// 响应既不是数组也不是信封
    UnexpectedShape(String),
    /// 数组中的某个元素无法转换为学生记录
    InvalidRecord { index: usize, reason: String },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::UnexpectedShape(shape) => write!(f, "unexpected response shape: {}", shape),
            NormalizeError::InvalidRecord { index, reason } => {
                write!(f, "record #{} is invalid: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

// =========================================================
// ListPayload
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ListPayload {
    Bare(Vec<Value>),
    Enveloped { key: String, items: Vec<Value> },
    Malformed(String),
}

impl ListPayload {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => ListPayload::Bare(items),
            Value::Object(mut map) => {
                let key = ENVELOPE_KEYS
                    .iter()
                    .map(|k| k.to_string())
                    .find(|k| map.get(k).is_some_and(Value::is_array))
                    .or_else(|| {
                        let mut arrays = map.iter().filter(|(_, v)| v.is_array());
                        match (arrays.next(), arrays.next()) {
                            (Some((k, _)), None) => Some(k.clone()),
                            _ => None,
                        }
                    });

                match key.and_then(|k| map.remove(&k).map(|v| (k, v))) {
                    Some((key, Value::Array(items))) => ListPayload::Enveloped { key, items },
                    _ => {
                        let fields: Vec<&str> = map.keys().map(String::as_str).collect();
                        ListPayload::Malformed(format!(
                            "object without a record list (fields: [{}])",
                            fields.join(", ")
                        ))
                    }
                }
            }
            other => ListPayload::Malformed(format!("expected a list, got {}", kind(&other))),
        }
    }

    /// 规范化所有元素；任何一条失败都视为整体格式错误
    pub fn into_records(self) -> Result<Vec<StudentRecord>, NormalizeError> {
        let items = match self {
            ListPayload::Bare(items) | ListPayload::Enveloped { items, .. } => items,
            ListPayload::Malformed(shape) => return Err(NormalizeError::UnexpectedShape(shape)),
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                normalize_record(item).map_err(|reason| NormalizeError::InvalidRecord { index, reason })
            })
            .collect()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =========================================================
// 单条记录
// =========================================================

#[derive(Deserialize)]
struct RawStudent {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "lenient_id")]
    legacy_id: Option<String>,
    name: String,
    email: String,
    #[serde(default, deserialize_with = "lenient_number")]
    grade: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    grade_level: Option<String>,
    #[serde(deserialize_with = "required_number")]
    age: u32,
    #[serde(default)]
    address: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    role: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_lenient")]
    created_at: Option<ServerTime>,
    #[serde(default, deserialize_with = "date::deserialize_lenient")]
    updated_at: Option<ServerTime>,
}

/// 将一条服务端记录转换为 [`StudentRecord`]
///
/// - `id` 与 `_id` 互为别名，缺失的一方由另一方补齐
/// - `grade_level` 缺失时由 `grade` 推导，反之亦然
pub fn normalize_record(value: Value) -> Result<StudentRecord, String> {
    let raw: RawStudent = serde_json::from_value(value).map_err(|e| e.to_string())?;

    let id = raw.id.or_else(|| raw.legacy_id.clone());
    let legacy_id = raw.legacy_id.or_else(|| id.clone());

    let grade = raw
        .grade
        .or_else(|| raw.grade_level.as_deref().and_then(level_to_grade));
    let grade_level = match raw.grade_level {
        Some(level) => level,
        None => grade.map(grade_to_level).unwrap_or_default(),
    };

    let role = match raw.role.as_deref() {
        None => Role::default(),
        Some(s) => Role::parse(s).ok_or_else(|| format!("unknown role `{}`", s))?,
    };

    Ok(StudentRecord {
        id,
        legacy_id,
        name: raw.name,
        email: raw.email,
        grade,
        grade_level,
        age: raw.age,
        address: raw.address,
        description: raw.description,
        role,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    })
}

// =========================================================
// serde helpers
// =========================================================

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        // MongoDB extended JSON: {"$oid": "..."}
        Some(Value::Object(map)) => map.get("$oid").and_then(Value::as_str).map(str::to_string),
        _ => None,
    })
}

fn number_from(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => level_to_grade(s),
        _ => None,
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(number_from))
}

fn required_number<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(d)?;
    number_from(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a whole number, got {}", kind(&value))))
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
