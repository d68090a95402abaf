use std::fmt;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Whether a catalog listing can still be bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Sold,
    Reserved,
}

impl AvailabilityStatus {
    pub const ALL: [AvailabilityStatus; 3] = [Self::Available, Self::Sold, Self::Reserved];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::Reserved => "reserved",
        }
    }

    pub fn parse(s: &str) -> Option<AvailabilityStatus> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// Physical state of an antique as graded by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    Excellent,
    VeryGood,
    Good,
    Fair,
    NeedsRestoration,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 5] = [
        Self::Excellent,
        Self::VeryGood,
        Self::Good,
        Self::Fair,
        Self::NeedsRestoration,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::VeryGood => "very_good",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsRestoration => "needs_restoration",
        }
    }

    pub fn parse(s: &str) -> Option<ItemCondition> {
        Self::ALL.into_iter().find(|condition| condition.as_str() == s)
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for AvailabilityStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AvailabilityStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Self::parse(text).ok_or_else(|| {
            FromSqlError::Other(format!("unknown availability status '{text}'").into())
        })
    }
}

impl ToSql for ItemCondition {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ItemCondition {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Self::parse(text)
            .ok_or_else(|| FromSqlError::Other(format!("unknown item condition '{text}'").into()))
    }
}
