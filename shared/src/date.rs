//! 时间类型模块
//!
//! 后端返回的 `created_at` / `updated_at` 格式并不统一：
//! - Python `datetime.utcnow().isoformat()`：`2024-03-01T08:30:00.123456`（无时区）
//! - RFC 3339：`2024-03-01T08:30:00Z` / `2024-03-01T08:30:00+08:00`
//!
//! `ServerTime` 统一转换为 UTC 的 `NaiveDateTime`。解析失败时字段视为缺失，
//! 不会让整条记录反序列化失败。

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

// =========================================================
// ServerTime - 服务端时间戳
// =========================================================

/// 服务端时间戳（UTC）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServerTime(NaiveDateTime);

impl ServerTime {
    /// 从字符串解析，依次尝试 RFC 3339 与无时区的 ISO 8601
    ///
    /// 返回 None 如果所有格式都不匹配
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.naive_utc()));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Self)
    }

    #[inline]
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// 列表展示用的短格式
    pub fn display_short(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl From<NaiveDateTime> for ServerTime {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl fmt::Display for ServerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}

impl Serialize for ServerTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 宽松反序列化：任何无法识别的值都变成 `None`
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<ServerTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(ServerTime::parse))
}
