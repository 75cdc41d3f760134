//! List visibility policy
//!
//! Whether `list` hides inactive rows is an explicit per-entity setting
//! rather than something each service decides on its own.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListFilter {
    /// Return every row (admin view)
    #[default]
    All,
    /// Return only rows whose active flag is set
    ActiveOnly,
}

impl ListFilter {
    /// Whether a row with the given active flag is visible under this policy.
    /// Rows without a flag are always visible.
    pub fn admits(self, active: Option<bool>) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::ActiveOnly => active.unwrap_or(true),
        }
    }
}

impl std::str::FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ListFilter::All),
            "active_only" => Ok(ListFilter::ActiveOnly),
            other => Err(format!("unknown list filter '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits() {
        assert!(ListFilter::All.admits(Some(false)));
        assert!(ListFilter::ActiveOnly.admits(Some(true)));
        assert!(!ListFilter::ActiveOnly.admits(Some(false)));
        assert!(ListFilter::ActiveOnly.admits(None));
    }

    #[test]
    fn test_parse() {
        assert_eq!("ALL".parse::<ListFilter>(), Ok(ListFilter::All));
        assert_eq!("active_only".parse::<ListFilter>(), Ok(ListFilter::ActiveOnly));
        assert!("sometimes".parse::<ListFilter>().is_err());
        assert!("active".parse::<ListFilter>().is_err());
    }
}
