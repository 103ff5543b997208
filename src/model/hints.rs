// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Typed views over the recognised connection hint keys.
//!
//! Hints are stored as free-form strings so unknown keys survive a round trip; these helpers only
//! interpret the ones the renderer understands.

use super::diagram::Connection;

pub const STYLE_KEY: &str = "style";
pub const COLOR_KEY: &str = "color";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl ConnectionStyle {
    pub fn from_hint(value: Option<&str>) -> Self {
        match value {
            Some("dashed") => Self::Dashed,
            Some("dotted") => Self::Dotted,
            Some("double") => Self::Double,
            _ => Self::Solid,
        }
    }

    /// Hint value for this style; `None` for the default (absent key).
    pub fn hint_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("dashed"),
            Self::Dotted => Some("dotted"),
            Self::Double => Some("double"),
        }
    }

    pub fn of(connection: &Connection) -> Self {
        Self::from_hint(connection.hint(STYLE_KEY))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl ConnectionColor {
    pub const ALL: [Self; 6] =
        [Self::Red, Self::Green, Self::Yellow, Self::Blue, Self::Magenta, Self::Cyan];

    pub fn from_hint(value: Option<&str>) -> Option<Self> {
        Self::ALL.into_iter().find(|color| Some(color.hint_value()) == value)
    }

    pub fn hint_value(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
        }
    }

    pub fn of(connection: &Connection) -> Option<Self> {
        Self::from_hint(connection.hint(COLOR_KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConnectionColor, ConnectionStyle};

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        assert_eq!(ConnectionStyle::from_hint(Some("wavy")), ConnectionStyle::Solid);
        assert_eq!(ConnectionStyle::from_hint(None), ConnectionStyle::Solid);
        assert_eq!(ConnectionColor::from_hint(Some("purple")), None);
    }

    #[test]
    fn recognised_values_parse() {
        assert_eq!(ConnectionStyle::from_hint(Some("double")), ConnectionStyle::Double);
        assert_eq!(ConnectionColor::from_hint(Some("cyan")), Some(ConnectionColor::Cyan));
        assert_eq!(ConnectionStyle::Dotted.hint_value(), Some("dotted"));
        assert_eq!(ConnectionStyle::Solid.hint_value(), None);
    }
}
