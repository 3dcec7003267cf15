use palette::{FromColor, LinSrgba, Srgba};

use crate::scene::ColorLinPremul;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    #[error("color `{0}` must have 6 or 8 hex digits")]
    BadLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

// sRGB → Linear premultiplied conversions, kept out of scene.rs for separation of concerns.
impl ColorLinPremul {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    /// Straight-alpha sRGB bytes.
    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Create from sRGB u8 RGBA array (premultiplied in linear space).
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        let s = Srgba::new(
            c[0] as f32 / 255.0,
            c[1] as f32 / 255.0,
            c[2] as f32 / 255.0,
            c[3] as f32 / 255.0,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (sRGB, straight alpha).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        let mut c = [0xffu8; 4];
        for (i, slot) in c.iter_mut().enumerate().take(digits.len() / 2) {
            let pair = digits
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| ColorParseError::BadDigit(s.to_string()))?;
            *slot = u8::from_str_radix(pair, 16)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))?;
        }
        Ok(Self::from_srgba_u8(c))
    }

    /// Scale the whole premultiplied color by `opacity` (clamped to 0..1).
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self {
            r: self.r * o,
            g: self.g * o,
            b: self.b * o,
            a: self.a * o,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert for use as a `wgpu` clear color.
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    /// Convert back to sRGB u8 RGBA array (unpremultiplied).
    #[inline]
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        // Unpremultiply
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };

        let lin = LinSrgba::new(r, g, b, self.a);
        let srgb: Srgba = Srgba::from_color(lin);

        [
            (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_linear_space() {
        let red = ColorLinPremul::from_hex("#ff0000").unwrap();
        assert_eq!(red.to_srgba_u8(), [255, 0, 0, 255]);
        let half = ColorLinPremul::from_hex("#00ff0080").unwrap();
        assert_eq!(half.to_srgba_u8(), [0, 255, 0, 128]);
    }

    #[test]
    fn hex_rejects_malformed_input() {
        assert_eq!(
            ColorLinPremul::from_hex("ff0000"),
            Err(ColorParseError::MissingHash("ff0000".into()))
        );
        assert!(matches!(ColorLinPremul::from_hex("#fff"), Err(ColorParseError::BadLength(_))));
        assert!(matches!(ColorLinPremul::from_hex("#gg0000"), Err(ColorParseError::BadDigit(_))));
    }

    #[test]
    fn opacity_scales_premultiplied_channels() {
        let c = ColorLinPremul::WHITE.with_opacity(0.25);
        assert_eq!(c.to_array(), [0.25, 0.25, 0.25, 0.25]);
        assert_eq!(ColorLinPremul::WHITE.with_opacity(2.0), ColorLinPremul::WHITE);
    }
}
