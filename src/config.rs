use bon::Builder;

use crate::error::{CompassError, Result};
use crate::geometry::{CompassLayout, BEZEL_THICKNESS, POINTER_BASE_HALF_WIDTH};

/// Color representation for compass elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    /// Default bezel stroke color.
    pub const SUNSHINE_BLUE: Color = Color::new(0x1e, 0x88, 0xe5);
    /// Default pointer fill color.
    pub const SUNSHINE_RED: Color = Color::new(0xe5, 0x39, 0x35);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(CompassError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CompassError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Immutable style for one compass, set up once and handed to every draw.
#[derive(Debug, Clone, Builder)]
pub struct CompassStyle {
    /// Stroke color of the outer ring.
    #[builder(default = Color::SUNSHINE_BLUE)]
    pub bezel_color: Color,
    /// Fill color of the directional triangle.
    #[builder(default = Color::SUNSHINE_RED)]
    pub pointer_color: Color,
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    /// Clear the frame before drawing. Off when compositing over existing content.
    #[builder(default = true)]
    pub clear_background: bool,
    /// Bezel inset, also its stroke width.
    #[builder(default = BEZEL_THICKNESS)]
    pub bezel_thickness: f64,
    #[builder(default = POINTER_BASE_HALF_WIDTH)]
    pub pointer_base_half_width: f64,
}

impl Default for CompassStyle {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CompassStyle {
    pub fn layout(&self, width: f64, height: f64) -> CompassLayout {
        CompassLayout {
            bounds_width: width,
            bounds_height: height,
            bezel_thickness: self.bezel_thickness,
            pointer_base_half_width: self.pointer_base_half_width,
        }
    }
}

#[derive(Debug, Clone, Builder)]
pub struct CompassConfig {
    #[builder(default = "Wind".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    #[builder(default)]
    pub style: CompassStyle,

    // Initial state, in radians and display units
    #[builder(default = 0.0)]
    pub wind_direction: f64,
    #[builder(default = 0.0)]
    pub wind_speed: f64,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Color::from_hex("#1e88e5").unwrap(), Color::SUNSHINE_BLUE);
        assert_eq!(Color::from_hex("FF0000").unwrap(), Color::new(0xff, 0, 0));
        assert_eq!(Color::from_hex(" #00ff7f ").unwrap(), Color::new(0, 0xff, 0x7f));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["", "#fff", "#12345g", "#1234567", "#ééé"] {
            assert!(
                matches!(Color::from_hex(bad), Err(CompassError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn style_defaults() {
        let style = CompassStyle::default();
        assert_eq!(style.bezel_color, Color::SUNSHINE_BLUE);
        assert_eq!(style.pointer_color, Color::SUNSHINE_RED);
        assert!(style.clear_background);
        assert_eq!(style.bezel_thickness, 15.0);
        assert_eq!(style.pointer_base_half_width, 10.0);
    }

    #[test]
    fn style_layout_carries_sizes() {
        let style = CompassStyle::builder()
            .bezel_thickness(4.0)
            .pointer_base_half_width(2.5)
            .build();
        let layout = style.layout(64.0, 48.0);
        assert_eq!(layout.bounds_width, 64.0);
        assert_eq!(layout.bounds_height, 48.0);
        assert_eq!(layout.bezel_thickness, 4.0);
        assert_eq!(layout.pointer_base_half_width, 2.5);
    }

    #[test]
    fn config_builder_overrides() {
        let config = CompassConfig::builder()
            .title("Harbor".to_string())
            .window_width(420)
            .wind_direction(1.25)
            .build();
        assert_eq!(config.title, "Harbor");
        assert_eq!(config.window_width, 420);
        assert_eq!(config.window_height, 300);
        assert_eq!(config.wind_direction, 1.25);
        assert_eq!(config.wind_speed, 0.0);
    }
}
