use serde::{Deserialize, Serialize};

/// Unit in which retention times are recorded in a source table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Milliseconds,
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    /// Parse a unit from common spellings (`s`, `sec`, `min`, `minutes`, ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ms" | "msec" | "millisecond" | "milliseconds" => Some(Self::Milliseconds),
            "s" | "sec" | "secs" | "second" | "seconds" => Some(Self::Seconds),
            "m" | "min" | "mins" | "minute" | "minutes" => Some(Self::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(Self::Hours),
            _ => None,
        }
    }

    /// Number of seconds in one of this unit
    #[must_use]
    pub fn seconds_per_unit(self) -> f64 {
        match self {
            Self::Milliseconds => 0.001,
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 3600.0,
        }
    }

    #[must_use]
    pub fn to_seconds(self, value: f64) -> f64 {
        value * self.seconds_per_unit()
    }

    #[must_use]
    pub fn from_seconds(self, seconds: f64) -> f64 {
        seconds / self.seconds_per_unit()
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown time unit: '{s}'"))
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Milliseconds => write!(f, "ms"),
            Self::Seconds => write!(f, "s"),
            Self::Minutes => write!(f, "min"),
            Self::Hours => write!(f, "h"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spellings() {
        assert_eq!(TimeUnit::parse("min"), Some(TimeUnit::Minutes));
        assert_eq!(TimeUnit::parse(" Minutes "), Some(TimeUnit::Minutes));
        assert_eq!(TimeUnit::parse("sec"), Some(TimeUnit::Seconds));
        assert_eq!(TimeUnit::parse("ms"), Some(TimeUnit::Milliseconds));
        assert_eq!(TimeUnit::parse("hours"), Some(TimeUnit::Hours));
        assert_eq!(TimeUnit::parse("fortnight"), None);
    }

    #[test]
    fn test_conversion() {
        assert!((TimeUnit::Minutes.to_seconds(2.5) - 150.0).abs() < 1e-12);
        assert!((TimeUnit::Milliseconds.to_seconds(1500.0) - 1.5).abs() < 1e-12);
        assert!((TimeUnit::Hours.from_seconds(7200.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_parses_back() {
        for unit in [
            TimeUnit::Milliseconds,
            TimeUnit::Seconds,
            TimeUnit::Minutes,
            TimeUnit::Hours,
        ] {
            assert_eq!(unit.to_string().parse::<TimeUnit>(), Ok(unit));
        }
    }
}
