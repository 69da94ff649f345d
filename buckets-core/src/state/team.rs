//! Teams and button sides

use crate::rgb::Color;

/// Team holding (or configured on) a bucket
///
/// Only `Red` and `Blue` are competing sides. `Green` means nobody holds the
/// point, `Purple` is the result of a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Red,
    Blue,
    #[default]
    Green,
    Purple,
}

impl Team {
    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Team::Red => "Red",
            Team::Blue => "Blue",
            Team::Green => "Green",
            Team::Purple => "Purple",
        }
    }

    /// Whether this is one of the two competing sides
    pub const fn is_side(self) -> bool {
        matches!(self, Team::Red | Team::Blue)
    }

    /// Team that plays next round when sides swap
    ///
    /// Anything that is not Red becomes Red.
    pub const fn swapped(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            _ => Team::Red,
        }
    }

    /// Indicator colour
    pub const fn color(self) -> Color {
        match self {
            Team::Red => Color::Red,
            Team::Blue => Color::Blue,
            Team::Green => Color::Green,
            Team::Purple => Color::Purple,
        }
    }
}

/// One of the two team buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    /// Both sides, red first
    pub const BOTH: [Side; 2] = [Side::Red, Side::Blue];

    /// Team this button claims for
    pub const fn team(self) -> Team {
        match self {
            Side::Red => Team::Red,
            Side::Blue => Team::Blue,
        }
    }

    /// The other button
    pub const fn other(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }
}
