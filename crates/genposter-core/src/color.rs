//! Color types and the fixed poster palette.

use ratatui::style::Color;

/// An RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Attach an alpha channel.
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Scale every channel by `factor`, clamped to the valid range.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(
            (self.r * factor).clamp(0.0, 1.0),
            (self.g * factor).clamp(0.0, 1.0),
            (self.b * factor).clamp(0.0, 1.0),
        )
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// 8-bit channels, rounded.
    pub fn to_u8(self) -> (u8, u8, u8) {
        (channel(self.r), channel(self.g), channel(self.b))
    }

    /// Terminal color for this RGB value.
    pub fn to_terminal(self) -> Color {
        let (r, g, b) = self.to_u8();
        Color::Rgb(r, g, b)
    }
}

/// An RGB color with alpha, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// 8-bit channels, rounded.
    pub fn to_u8(self) -> (u8, u8, u8, u8) {
        (channel(self.r), channel(self.g), channel(self.b), channel(self.a))
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

/// Poster palette: three blues, an orange accent and a dark gray.
pub const PALETTE: [Rgb; 5] = [
    Rgb::new(0.1, 0.3, 0.6),
    Rgb::new(0.5, 0.7, 0.9),
    Rgb::new(0.8, 0.9, 1.0),
    Rgb::new(1.0, 0.5, 0.2),
    Rgb::new(0.3, 0.3, 0.3),
];
