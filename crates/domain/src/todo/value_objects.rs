//! Value objects for the todo domain.

use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Priority of a todo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PriorityLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    /// Every priority level, lowest first.
    pub const ALL: [PriorityLevel; 4] = [
        PriorityLevel::None,
        PriorityLevel::Low,
        PriorityLevel::Medium,
        PriorityLevel::High,
    ];

    /// Returns the numeric value of this level.
    pub fn value(&self) -> i32 {
        match self {
            PriorityLevel::None => 0,
            PriorityLevel::Low => 1,
            PriorityLevel::Medium => 2,
            PriorityLevel::High => 3,
        }
    }

    /// Returns the display name of this level.
    pub fn name(&self) -> &'static str {
        match self {
            PriorityLevel::None => "None",
            PriorityLevel::Low => "Low",
            PriorityLevel::Medium => "Medium",
            PriorityLevel::High => "High",
        }
    }
}

impl TryFrom<i32> for PriorityLevel {
    type Error = TodoError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        PriorityLevel::ALL
            .into_iter()
            .find(|level| level.value() == value)
            .ok_or(TodoError::UnknownPriority { value })
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Display colour of a todo list.
///
/// Only the colours in [`Colour::SUPPORTED`] exist; anything else is rejected
/// at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Colour {
    #[default]
    White,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Grey,
}

impl Colour {
    /// Every supported colour.
    pub const SUPPORTED: [Colour; 8] = [
        Colour::White,
        Colour::Red,
        Colour::Orange,
        Colour::Yellow,
        Colour::Green,
        Colour::Blue,
        Colour::Purple,
        Colour::Grey,
    ];

    /// Parses a hex colour code such as `#FF5733`, ignoring case.
    pub fn from_code(code: &str) -> Result<Self, TodoError> {
        Colour::SUPPORTED
            .into_iter()
            .find(|colour| colour.code().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| TodoError::UnsupportedColour {
                code: code.to_string(),
            })
    }

    /// Returns the hex colour code.
    pub fn code(&self) -> &'static str {
        match self {
            Colour::White => "#FFFFFF",
            Colour::Red => "#FF5733",
            Colour::Orange => "#FFC300",
            Colour::Yellow => "#FFFF66",
            Colour::Green => "#CCFF99",
            Colour::Blue => "#6666FF",
            Colour::Purple => "#9966CC",
            Colour::Grey => "#999999",
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Colour {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::from_code(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = TodoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Colour::from_code(&value)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_values() {
        assert_eq!(PriorityLevel::None.value(), 0);
        assert_eq!(PriorityLevel::High.value(), 3);
        assert_eq!(PriorityLevel::try_from(2).unwrap(), PriorityLevel::Medium);
        assert_eq!(
            PriorityLevel::try_from(7),
            Err(TodoError::UnknownPriority { value: 7 })
        );
    }

    #[test]
    fn test_priority_default_is_none() {
        assert_eq!(PriorityLevel::default(), PriorityLevel::None);
    }

    #[test]
    fn test_colour_from_code() {
        assert_eq!(Colour::from_code("#FF5733").unwrap(), Colour::Red);
        assert_eq!(Colour::from_code("#ccff99").unwrap(), Colour::Green);
        assert_eq!("#999999".parse::<Colour>().unwrap(), Colour::Grey);
    }

    #[test]
    fn test_unsupported_colour() {
        assert_eq!(
            Colour::from_code("#123456"),
            Err(TodoError::UnsupportedColour {
                code: "#123456".to_string()
            })
        );
    }

    #[test]
    fn test_colour_default_and_display() {
        assert_eq!(Colour::default(), Colour::White);
        assert_eq!(Colour::Blue.to_string(), "#6666FF");
    }

    #[test]
    fn test_colour_deserialization_validates_code() {
        let colour: Colour = serde_json::from_str("\"#9966CC\"").unwrap();
        assert_eq!(colour, Colour::Purple);
        assert!(serde_json::from_str::<Colour>("\"#000000\"").is_err());
    }
}
