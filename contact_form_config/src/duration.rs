use std::{ops::Deref, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// A duration written as whitespace separated parts like `"1m 30s"` or
/// `"250ms"`. Supported units are `ms`, `s`, `m`, `h` and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid duration part {0:?}")]
pub struct ParseDurationError(String);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Duration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |total, part| {
                let invalid = || ParseDurationError(part.into());
                let unit_start = part.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
                let (value, unit) = part.split_at(unit_start);
                let value = value.parse::<u64>().map_err(|_| invalid())?;
                let seconds = |factor: u64| {
                    value
                        .checked_mul(factor)
                        .map(std::time::Duration::from_secs)
                };
                let part = match unit {
                    "ms" => Some(std::time::Duration::from_millis(value)),
                    "s" => seconds(1),
                    "m" => seconds(60),
                    "h" => seconds(60 * 60),
                    "d" => seconds(24 * 60 * 60),
                    _ => None,
                };
                part.and_then(|part| total.checked_add(part))
                    .ok_or_else(invalid)
            })
            .map(Self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
