use serde::{Deserialize, Serialize};

/// Inky pHAT palette
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Black,
    Red,
    Yellow,
}

/// Fonts known to the panel driver
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    /// Hanken Grotesk Medium, used for numbers and text
    Text,
    /// Font Awesome 5 Free Solid, used for glyphs
    Icon,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Label {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub font: Font,
    pub size: u32,
    pub color: Color,
}

/// A finished screen, ready to be committed to the panel
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub border: Color,
    pub labels: Vec<Label>,
}
