use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown level: {raw} (expected test, easy, normal or hard)")]
pub struct LevelError {
    pub raw: String,
}

/// Difficulty tier chosen before a game starts.
///
/// Each level selects one fixed `GameSettings` bundle:
/// - `Test`: a short round used while developing and demoing
/// - `Easy`, `Normal`, `Hard`: the playable tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Test,
    Easy,
    Normal,
    Hard,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Test, Level::Easy, Level::Normal, Level::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Test => "test",
            Level::Easy => "easy",
            Level::Normal => "normal",
            Level::Hard => "hard",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| LevelError { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("easy".parse::<Level>().unwrap(), Level::Easy);
        assert_eq!(" Hard ".parse::<Level>().unwrap(), Level::Hard);
        assert_eq!("NORMAL".parse::<Level>().unwrap(), Level::Normal);
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "medium".parse::<Level>().unwrap_err();
        assert_eq!(err.raw, "medium");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
    }
}
