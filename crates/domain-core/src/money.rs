//! 货币值对象

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// 每个整数单位包含的 nanos
pub const NANOS_PER_UNIT: i32 = 1_000_000_000;

/// 每分包含的 nanos
pub const NANOS_PER_CENT: i32 = 10_000_000;

/// 美元货币代码
pub const USD: &str = "USD";

/// 金额错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("currency code must be 3 uppercase letters, got {0:?}")]
    InvalidCurrencyCode(String),
    #[error("nanos out of range: {0}")]
    NanosOutOfRange(i32),
    #[error("units ({units}) and nanos ({nanos}) must have the same sign")]
    SignMismatch { units: i64, nanos: i32 },
}

/// 金额值对象
///
/// 业务规则:
/// - 货币代码为 3 位大写字母（ISO 4217）
/// - nanos 在 -999,999,999..=999,999,999 之间
/// - units 与 nanos 同号（任一为 0 时不受限制）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Money {
    #[serde(default, alias = "currency_code")]
    pub currency_code: String,
    #[serde(default, deserialize_with = "deserialize_units")]
    pub units: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl Money {
    /// 由整数单位和分构造（cents 必须小于 100）
    pub fn from_units_and_cents(
        currency_code: impl Into<String>,
        units: i64,
        cents: u32,
    ) -> Self {
        debug_assert!(cents < 100);
        Self {
            currency_code: currency_code.into(),
            units,
            nanos: cents as i32 * NANOS_PER_CENT,
        }
    }

    /// 校验金额字段
    pub fn validate(&self) -> Result<(), MoneyError> {
        let code = self.currency_code.as_str();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(MoneyError::InvalidCurrencyCode(self.currency_code.clone()));
        }

        if self.nanos <= -NANOS_PER_UNIT || self.nanos >= NANOS_PER_UNIT {
            return Err(MoneyError::NanosOutOfRange(self.nanos));
        }

        if (self.units > 0 && self.nanos < 0) || (self.units < 0 && self.nanos > 0) {
            return Err(MoneyError::SignMismatch {
                units: self.units,
                nanos: self.nanos,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.units < 0 || self.nanos < 0 { "-" } else { "" };
        let cents = (self.nanos / NANOS_PER_CENT).unsigned_abs();
        write!(f, "{}{}.{:02} {}", sign, self.units.unsigned_abs(), cents, self.currency_code)
    }
}

/// int64 在 protobuf JSON 中可以是数字，也可以是字符串
fn deserialize_units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64 {
        Number(i64),
        Text(String),
    }

    match Int64::deserialize(deserializer)? {
        Int64::Number(n) => Ok(n),
        Int64::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
