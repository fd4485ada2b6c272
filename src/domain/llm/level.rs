use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Tier controlling which model profile answers a prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    #[default]
    Low,
    High,
}

impl QualityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            other => Err(DomainError::validation(format!(
                "Unknown quality level '{}', expected 'low' or 'high'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!("low".parse::<QualityLevel>().unwrap(), QualityLevel::Low);
        assert_eq!(" HIGH ".parse::<QualityLevel>().unwrap(), QualityLevel::High);
        assert!("medium".parse::<QualityLevel>().is_err());
    }

    #[test]
    fn test_level_serde_and_display() {
        assert_eq!(QualityLevel::default(), QualityLevel::Low);
        assert_eq!(QualityLevel::High.to_string(), "high");
        assert_eq!(serde_json::to_string(&QualityLevel::High).unwrap(), "\"high\"");
    }
}
