//! Presentation colors.
//!
//! Scripts name colors by string (`print("You hear a click", "DarkYellow")`),
//! so the set is closed and parsing is the only way in from script land.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the sixteen classic console colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl Color {
    /// Every color, in console palette order.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkCyan,
        Color::DarkRed,
        Color::DarkMagenta,
        Color::DarkYellow,
        Color::Gray,
        Color::DarkGray,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
        Color::White,
    ];

    /// Returns the canonical name of this color.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::DarkBlue => "DarkBlue",
            Self::DarkGreen => "DarkGreen",
            Self::DarkCyan => "DarkCyan",
            Self::DarkRed => "DarkRed",
            Self::DarkMagenta => "DarkMagenta",
            Self::DarkYellow => "DarkYellow",
            Self::Gray => "Gray",
            Self::DarkGray => "DarkGray",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Cyan => "Cyan",
            Self::Red => "Red",
            Self::Magenta => "Magenta",
            Self::Yellow => "Yellow",
            Self::White => "White",
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses a color name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::script(format!("unknown color name: {name:?}")))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
