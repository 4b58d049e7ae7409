//! Trade direction and how it is chosen.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SizingError;

/// Side of a leveraged trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }

    /// Infer the direction from price ordering.
    ///
    /// Long when stop < entry < target, short when target < entry < stop.
    /// Anything else (including equal prices or NaN) has no direction.
    pub fn infer(entry: f64, stop: f64, target: f64) -> Option<Self> {
        if stop < entry && target > entry {
            Some(Direction::Long)
        } else if stop > entry && target < entry {
            Some(Direction::Short)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" | "buy" => Ok(Direction::Long),
            "short" | "sell" => Ok(Direction::Short),
            other => Err(format!("unknown direction '{}', expected long or short", other)),
        }
    }
}

/// Whether the direction is picked by the user or inferred from prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionMode {
    #[default]
    Auto,
    Explicit(Direction),
}

impl DirectionMode {
    /// Resolve to a concrete direction, validating the price ordering.
    ///
    /// Explicit and inferred directions go through the same check: the
    /// explicit choice must agree with what the prices imply.
    pub fn resolve(self, entry: f64, stop: f64, target: f64) -> Result<Direction, SizingError> {
        let inferred = Direction::infer(entry, stop, target);

        match (self, inferred) {
            (DirectionMode::Auto, Some(direction)) => Ok(direction),
            (DirectionMode::Explicit(wanted), Some(direction)) if wanted == direction => {
                Ok(direction)
            }
            _ => Err(SizingError::InvalidDirection {
                direction: self,
                entry,
                stop,
                target,
            }),
        }
    }
}

impl From<Direction> for DirectionMode {
    fn from(direction: Direction) -> Self {
        DirectionMode::Explicit(direction)
    }
}

impl fmt::Display for DirectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionMode::Auto => f.write_str("long or short"),
            DirectionMode::Explicit(direction) => direction.fmt(f),
        }
    }
}

impl FromStr for DirectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DirectionMode::Auto),
            other => other.parse::<Direction>().map(DirectionMode::Explicit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_long_and_short() {
        assert_eq!(Direction::infer(2000.0, 1900.0, 2150.0), Some(Direction::Long));
        assert_eq!(Direction::infer(4770.0, 4820.0, 4650.0), Some(Direction::Short));
    }

    #[test]
    fn test_infer_rejects_same_side_and_equal_prices() {
        // Both above entry
        assert_eq!(Direction::infer(2000.0, 2100.0, 2150.0), None);
        // Stop equal to entry is not strictly opposite
        assert_eq!(Direction::infer(2000.0, 2000.0, 2150.0), None);
        assert_eq!(Direction::infer(f64::NAN, 1900.0, 2150.0), None);
    }

    #[test]
    fn test_explicit_must_match_prices() {
        let long = DirectionMode::Explicit(Direction::Long);
        assert_eq!(long.resolve(2000.0, 1900.0, 2150.0), Ok(Direction::Long));

        let short = DirectionMode::Explicit(Direction::Short);
        let err = short.resolve(2000.0, 1900.0, 2150.0).unwrap_err();
        assert!(matches!(err, SizingError::InvalidDirection { .. }));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("auto".parse::<DirectionMode>(), Ok(DirectionMode::Auto));
        assert_eq!(
            "SHORT".parse::<DirectionMode>(),
            Ok(DirectionMode::Explicit(Direction::Short))
        );
        assert!("sideways".parse::<DirectionMode>().is_err());
    }
}
