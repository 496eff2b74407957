//! Timeframes the engine analyzes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bar aggregation period.
///
/// Daily feeds the screener's price context, weekly and monthly feed the
/// sequence scanner, and quarterly is a resampled view used only for
/// trend context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
            Timeframe::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Timeframe::Weekly.to_string(), "weekly");
        assert_eq!(Timeframe::Quarterly.to_string(), "quarterly");
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Timeframe::Monthly).unwrap();
        assert_eq!(json, "\"MONTHLY\"");
    }
}
