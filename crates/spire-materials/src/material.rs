//! Core surface types: [`Color`] and [`SurfaceDescriptor`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGB color with components in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Packs the color back into `0xRRGGBB`, rounding each channel.
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Linear interpolation; `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: crate::blending::lerp(self.r, other.r, t),
            g: crate::blending::lerp(self.g, other.g, t),
            b: crate::blending::lerp(self.b, other.b, t),
        }
    }

    /// Hue, saturation, lightness, each in `[0.0, 1.0]`.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, lightness);
        }

        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        let hue = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };

        (hue / 6.0, saturation, lightness)
    }

    /// Inverse of [`Color::to_hsl`].
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
        let hue = hue.rem_euclid(1.0);
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);

        if saturation == 0.0 {
            return Color::rgb(lightness, lightness, lightness);
        }

        let q = if lightness <= 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;

        Color::rgb(
            hue_to_rgb(p, q, hue + 1.0 / 3.0),
            hue_to_rgb(p, q, hue),
            hue_to_rgb(p, q, hue - 1.0 / 3.0),
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

// ---------------------------------------------------------------------------
// SurfaceDescriptor
// ---------------------------------------------------------------------------

/// Appearance of a drawable, handed to the rendering collaborator.
///
/// Every consumer gets its own clone, so mutating one never touches the
/// provider's cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    /// Base color.
    pub color: Color,

    /// Roughness factor: 0.0 = mirror-smooth, 1.0 = fully rough.
    pub roughness: f32,

    /// Metalness factor: 0.0 = dielectric, 1.0 = pure metal.
    pub metalness: f32,

    /// Opacity: 1.0 = fully opaque, 0.0 = fully transparent.
    pub opacity: f32,

    /// Environment reflection strength. Must be >= 0.0.
    pub env_map_intensity: f32,

    /// Render with alpha blending.
    pub transparent: bool,

    /// Render both faces (flat decorations such as leaves).
    pub double_sided: bool,
}

impl Default for SurfaceDescriptor {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            roughness: 0.7,
            metalness: 0.1,
            opacity: 1.0,
            env_map_intensity: 1.0,
            transparent: false,
            double_sided: false,
        }
    }
}

impl SurfaceDescriptor {
    /// Clamps every factor to its legal range.
    pub fn validated(mut self) -> Self {
        for c in [&mut self.color.r, &mut self.color.g, &mut self.color.b] {
            *c = c.clamp(0.0, 1.0);
        }
        self.roughness = self.roughness.clamp(0.0, 1.0);
        self.metalness = self.metalness.clamp(0.0, 1.0);
        self.opacity = self.opacity.clamp(0.0, 1.0);
        self.env_map_intensity = self.env_map_intensity.max(0.0);
        self
    }

    /// Sets the opacity and flags the surface transparent when below 1.0.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = self.opacity < 1.0;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
