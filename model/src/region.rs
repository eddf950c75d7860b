use std::{convert::Infallible, fmt, str::FromStr};

use serde_with::DeserializeFromStr;

/// The selected region of a filterable layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, DeserializeFromStr)]
pub enum RegionChoice {
    #[default]
    All,
    Region(String),
}

impl RegionChoice {
    pub const ALL: &'static str = "ALL";

    pub fn matches(&self, region: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Region(x) => region == Some(x.as_str()),
        }
    }
}

impl From<&str> for RegionChoice {
    fn from(s: &str) -> Self {
        match s {
            Self::ALL => Self::All,
            x => Self::Region(x.to_string()),
        }
    }
}

impl FromStr for RegionChoice {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for RegionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Region(x) => f.write_str(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choice() {
        assert_eq!("ALL".parse(), Ok(RegionChoice::All));
        assert_eq!(
            "Scarborough".parse(),
            Ok(RegionChoice::Region("Scarborough".to_string()))
        );
        assert_eq!(RegionChoice::All.to_string(), "ALL");
    }

    #[test]
    fn matches_exactly() {
        let west = RegionChoice::Region("West".to_string());
        assert!(west.matches(Some("West")));
        assert!(!west.matches(Some("west")));
        assert!(!west.matches(None));
        assert!(RegionChoice::All.matches(None));
    }
}
