//! Color system for the three-lane dark theme.
//!
//! Provides:
//! - RGB color representation with HSL and hex conversions
//! - Semantic theme constants for the three lanes and the jam bar
//! - Integration with owo-colors and ratatui

use owo_colors::OwoColorize;
use ratatui::style::Color as RatatuiColor;
use std::fmt::{self, Display};

/// Represents an RGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Create a new RGB color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from HSL values
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h % 360.0;
        let s = s.clamp(0.0, 100.0) / 100.0;
        let l = l.clamp(0.0, 100.0) / 100.0;

        if s == 0.0 {
            let v = (l * 255.0) as u8;
            return Self::rgb(v, v, v);
        }

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0..=59 => (c, x, 0.0),
            60..=119 => (x, c, 0.0),
            120..=179 => (0.0, c, x),
            180..=239 => (0.0, x, c),
            240..=299 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::rgb(
            ((r + m) * 255.0) as u8,
            ((g + m) * 255.0) as u8,
            ((b + m) * 255.0) as u8,
        )
    }

    /// Convert to HSL values
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let mut h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        if h < 0.0 {
            h += 360.0;
        }

        let l = (max + min) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };

        (h, s * 100.0, l * 100.0)
    }

    /// Create a color from a hexadecimal string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Convert to hexadecimal string representation
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Lightens the color by a percentage (0-100)
    pub fn lighten(&self, amount: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, (l + amount).min(100.0))
    }

    /// Darkens the color by a percentage (0-100)
    pub fn darken(&self, amount: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, (l - amount).max(0.0))
    }

    /// Mix with another color by a specified amount (0.0-1.0)
    pub fn mix(&self, other: &Color, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let r = ((self.r as f32 * (1.0 - amount) + other.r as f32 * amount).round()) as u8;
        let g = ((self.g as f32 * (1.0 - amount) + other.g as f32 * amount).round()) as u8;
        let b = ((self.b as f32 * (1.0 - amount) + other.b as f32 * amount).round()) as u8;
        Self::rgb(r, g, b)
    }

    /// Convert to owo-colors RGB type
    pub fn to_owo_rgb(&self) -> owo_colors::Rgb {
        owo_colors::Rgb(self.r, self.g, self.b)
    }

    /// Convert to ratatui Color
    pub fn to_ratatui(&self) -> RatatuiColor {
        RatatuiColor::Rgb(self.r, self.g, self.b)
    }

    /// Get the RGB components
    pub fn rgb_components(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

// Implement conversion to owo-colors RGB
impl From<Color> for owo_colors::Rgb {
    fn from(color: Color) -> Self {
        color.to_owo_rgb()
    }
}

// Implement conversion to ratatui Color
impl From<Color> for RatatuiColor {
    fn from(color: Color) -> Self {
        color.to_ratatui()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Theme color constants and semantic color groupings
pub mod theme {
    use super::Color;

    /// Background elevation
    pub mod background {
        use super::Color;

        pub const BASE: Color = Color::rgb(15, 18, 20); // #0F1214
        pub const PANEL: Color = Color::rgb(22, 27, 30); // #161B1E
        pub const TRACK: Color = Color::rgb(29, 36, 40); // #1D2428
    }

    /// Accent per scheduling lane
    pub mod lane {
        use super::Color;

        pub const MAIN: Color = Color::rgb(255, 46, 95); // #FF2E5F
        pub const FRAME: Color = Color::rgb(0, 228, 154); // #00E49A
        pub const WORKER: Color = Color::rgb(184, 110, 255); // #B86EFF

        /// Dimmed variant for a lane whose domain is stalled
        pub fn stalled(base: Color) -> Color {
            base.darken(25.0)
        }
    }

    /// Text hierarchy
    pub mod text {
        use super::Color;

        pub const PRIMARY: Color = Color::rgb(230, 237, 243); // #E6EDF3
        pub const SECONDARY: Color = Color::rgb(139, 148, 158); // #8B949E
        pub const DISABLED: Color = Color::rgb(106, 115, 125); // #6A737D
    }

    /// Jam bar states
    pub mod jam {
        use super::Color;

        pub const ARMED: Color = Color::rgb(255, 46, 95); // #FF2E5F
        pub const FROZEN: Color = Color::rgb(106, 115, 125); // #6A737D
        pub const LABEL: Color = Color::rgb(15, 18, 20); // #0F1214
    }
}

/// Extension trait for applying theme colors to strings with owo-colors
pub trait ThemeColorize: OwoColorize {
    /// Apply primary text color
    #[inline]
    fn primary(self) -> impl fmt::Display
    where
        Self: Sized + Display,
    {
        let (r, g, b) = theme::text::PRIMARY.rgb_components();
        format!("{}", self.truecolor(r, g, b))
    }

    /// Apply secondary text color
    #[inline]
    fn secondary(self) -> impl fmt::Display
    where
        Self: Sized + Display,
    {
        let (r, g, b) = theme::text::SECONDARY.rgb_components();
        format!("{}", self.truecolor(r, g, b))
    }

    /// Apply the main-lane accent
    #[inline]
    fn main_lane(self) -> impl fmt::Display
    where
        Self: Sized + Display,
    {
        let (r, g, b) = theme::lane::MAIN.rgb_components();
        format!("{}", self.truecolor(r, g, b))
    }

    /// Apply the frame-lane accent
    #[inline]
    fn frame_lane(self) -> impl fmt::Display
    where
        Self: Sized + Display,
    {
        let (r, g, b) = theme::lane::FRAME.rgb_components();
        format!("{}", self.truecolor(r, g, b))
    }

    /// Apply the worker-lane accent
    #[inline]
    fn worker_lane(self) -> impl fmt::Display
    where
        Self: Sized + Display,
    {
        let (r, g, b) = theme::lane::WORKER.rgb_components();
        format!("{}", self.truecolor(r, g, b))
    }
}

// Implement ThemeColorize for all types that implement OwoColorize
impl<T: OwoColorize + Display> ThemeColorize for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hex_round_trip() {
        let color = Color::from_hex("#ff2e5f").unwrap();
        assert_eq!(color, theme::lane::MAIN);
        assert_eq!(color.to_hex(), "#ff2e5f");
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert_eq!(Color::from_hex("#ff2e"), None);
        assert_eq!(Color::from_hex("not a color"), None);
    }

    #[test]
    fn test_hsl_round_trip_is_close() {
        let color = Color::rgb(0, 228, 154);
        let (h, s, l) = color.to_hsl();
        let back = Color::from_hsl(h, s, l);
        let (r, g, b) = back.rgb_components();

        assert!((r as i16).abs_diff(0) <= 2);
        assert!((g as i16).abs_diff(228) <= 2);
        assert!((b as i16).abs_diff(154) <= 2);
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(255, 255, 255);
        assert_eq!(a.mix(&b, 0.0), a);
        assert_eq!(a.mix(&b, 1.0), b);
        assert_eq!(a.mix(&b, 0.5), Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_lighten_darken_move_lightness() {
        let base = theme::lane::WORKER;
        let (_, _, l) = base.to_hsl();
        let (_, _, lighter) = base.lighten(10.0).to_hsl();
        let (_, _, darker) = base.darken(10.0).to_hsl();

        assert!(lighter > l);
        assert!(darker < l);
    }

    #[test]
    fn test_stalled_variant_is_darker() {
        let (_, _, l) = theme::lane::MAIN.to_hsl();
        let (_, _, stalled) = theme::lane::stalled(theme::lane::MAIN).to_hsl();
        assert!(stalled < l);
    }

    #[test]
    fn test_ratatui_conversion() {
        let color = Color::rgb(12, 34, 56);
        assert_eq!(color.to_ratatui(), RatatuiColor::Rgb(12, 34, 56));
    }
}
