//! News category value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Editorial section a news article belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Politics,
    Economy,
    Sports,
    Technology,
    Science,
    Culture,
    Health,
    World,
}

impl Category {
    /// Returns the storage/wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Politics => "politics",
            Self::Economy => "economy",
            Self::Sports => "sports",
            Self::Technology => "technology",
            Self::Science => "science",
            Self::Culture => "culture",
            Self::Health => "health",
            Self::World => "world",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "politics" => Ok(Self::Politics),
            "economy" => Ok(Self::Economy),
            "sports" => Ok(Self::Sports),
            "technology" => Ok(Self::Technology),
            "science" => Ok(Self::Science),
            "culture" => Ok(Self::Culture),
            "health" => Ok(Self::Health),
            "world" => Ok(Self::World),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("Sports".parse::<Category>().unwrap(), Category::Sports);
        assert_eq!("WORLD".parse::<Category>().unwrap(), Category::World);
        assert!("weather".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display_matches_serde() {
        let json = serde_json::to_string(&Category::Technology).unwrap();
        assert_eq!(json, format!("\"{}\"", Category::Technology));
    }
}
