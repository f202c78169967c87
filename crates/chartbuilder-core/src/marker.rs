// File: crates/chartbuilder-core/src/marker.rs
// Summary: Scatter marker vocabulary keyed by the usual one-character codes.

use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Marker {
    #[default]
    Point,
    Pixel,
    Circle,
    TriangleDown,
    TriangleUp,
    TriangleLeft,
    TriangleRight,
    TriDown,
    TriUp,
    TriLeft,
    TriRight,
    Octagon,
    Square,
    Pentagon,
    PlusFilled,
    Star,
    Hexagon1,
    Hexagon2,
    Plus,
    X,
    XFilled,
    Diamond,
    ThinDiamond,
    VLine,
    HLine,
}

/// Code table; the first entry is the default marker.
pub const CODES: &[(&str, Marker)] = &[
    (".", Marker::Point),
    (",", Marker::Pixel),
    ("o", Marker::Circle),
    ("v", Marker::TriangleDown),
    ("^", Marker::TriangleUp),
    ("<", Marker::TriangleLeft),
    (">", Marker::TriangleRight),
    ("1", Marker::TriDown),
    ("2", Marker::TriUp),
    ("3", Marker::TriLeft),
    ("4", Marker::TriRight),
    ("8", Marker::Octagon),
    ("s", Marker::Square),
    ("p", Marker::Pentagon),
    ("P", Marker::PlusFilled),
    ("*", Marker::Star),
    ("h", Marker::Hexagon1),
    ("H", Marker::Hexagon2),
    ("+", Marker::Plus),
    ("x", Marker::X),
    ("X", Marker::XFilled),
    ("D", Marker::Diamond),
    ("d", Marker::ThinDiamond),
    ("|", Marker::VLine),
    ("_", Marker::HLine),
];

impl Marker {
    pub fn from_code(code: &str) -> Option<Self> {
        CODES.iter().find(|(c, _)| *c == code).map(|(_, m)| *m)
    }

    pub fn code(self) -> &'static str {
        CODES
            .iter()
            .find(|(_, m)| *m == self)
            .map(|(c, _)| *c)
            .unwrap_or(".")
    }

    /// All marker codes, default first.
    pub fn codes() -> impl Iterator<Item = &'static str> {
        CODES.iter().map(|(c, _)| *c)
    }

    /// Glyph size relative to the nominal marker size.
    pub fn scale(self) -> f32 {
        match self {
            Marker::Point => 0.5,
            Marker::Pixel => 0.0,
            Marker::Square | Marker::Diamond => 0.75,
            Marker::ThinDiamond => 0.65,
            _ => 1.0,
        }
    }
}

impl FromStr for Marker {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Marker::from_code(s).ok_or_else(|| ChartError::UnknownMarker(s.to_string()))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in Marker::codes() {
            assert_eq!(Marker::from_code(code).map(Marker::code), Some(code));
        }
    }

    #[test]
    fn default_is_first_code() {
        assert_eq!(Marker::default().code(), ".");
        assert!("q".parse::<Marker>().is_err());
    }
}
