//! Clock face style: strong color, derived light color and padding

use nannou::color::{srgba, Srgba};

use crate::tokens::LIGHT_COLOR_MASK;

/// Error type for style values coming from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// Color string is not `#RRGGBB` or `#AARRGGBB`
    InvalidColor(String),
}

impl std::fmt::Display for StyleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleError::InvalidColor(s) => {
                write!(f, "Invalid color '{}': expected #RRGGBB or #AARRGGBB", s)
            }
        }
    }
}

impl std::error::Error for StyleError {}

/// Immutable drawing style, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    strong: Srgba<u8>,
    light: Srgba<u8>,
    padding: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self::new(srgba(255, 255, 255, 255), 0.0)
    }
}

impl Style {
    pub fn new(strong: Srgba<u8>, padding: f32) -> Self {
        let light = from_argb(to_argb(strong) & LIGHT_COLOR_MASK);
        Self {
            strong,
            light,
            padding,
        }
    }

    /// Color of the minute hand and the dot
    pub fn strong(&self) -> Srgba<u8> {
        self.strong
    }

    /// Reduced-opacity variant used by the track, indicator, orbit and hour hand
    pub fn light(&self) -> Srgba<u8> {
        self.light
    }

    /// Padding in pixels on each side of the face
    pub fn padding(&self) -> f32 {
        self.padding
    }
}

/// Pack a color as 0xAARRGGBB
pub fn to_argb(color: Srgba<u8>) -> u32 {
    (u32::from(color.alpha) << 24)
        | (u32::from(color.red) << 16)
        | (u32::from(color.green) << 8)
        | u32::from(color.blue)
}

/// Unpack a 0xAARRGGBB color
pub fn from_argb(argb: u32) -> Srgba<u8> {
    srgba(
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
        (argb >> 24) as u8,
    )
}

/// Parse `#RRGGBB` (opaque) or `#AARRGGBB`
pub fn parse_color(s: &str) -> Result<Srgba<u8>, StyleError> {
    let invalid = || StyleError::InvalidColor(s.to_string());
    let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    match hex.len() {
        6 => Ok(from_argb(0xFF00_0000 | value)),
        8 => Ok(from_argb(value)),
        _ => Err(invalid()),
    }
}
