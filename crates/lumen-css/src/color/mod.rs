//! [CSS Color Module Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! Parsed color values and their conversion to opaque sRGB.
//!
//! A declared color keeps the notation it was written in ([`Color`]) so that
//! findings can echo it back, while every comparison happens on the opaque
//! [`Rgb`] the color renders to.

mod convert;
/// Named color keywords.
pub mod named;

use std::fmt;

use thiserror::Error;

pub use convert::{composite, hsl_to_rgb, hsv_to_rgb, rgb_to_hsl, rgb_to_hsv};

use convert::channel_to_u8;

/// An opaque sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// `black`
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// `white`
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// `yellow`, the default `<mark>` highlight.
    pub const YELLOW: Self = Self::new(255, 255, 0);
    /// `blue`, the default link color.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_packed(packed: u32) -> Self {
        Self::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }

    /// Channels on the 0.0-1.0 scale.
    #[must_use]
    pub fn normalized(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }

    /// Convert to a hex string like `"#RRGGBB"`.
    #[must_use]
    pub fn to_hex_string(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to `(hue°, saturation %, lightness %)`.
    #[must_use]
    pub fn to_hsl(self) -> (f64, f64, f64) {
        rgb_to_hsl(self)
    }

    /// Convert to `(hue°, saturation %, value %)`.
    #[must_use]
    pub fn to_hsv(self) -> (f64, f64, f64) {
        rgb_to_hsv(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

/// Errors from [`parse_color`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value was empty or only whitespace.
    #[error("empty color value")]
    Empty,
    /// A `#` color without exactly 3 or 6 digits.
    #[error("hex color '{0}' must have 3 or 6 digits")]
    HexLength(String),
    /// A `#` color containing something other than hex digits.
    #[error("hex color '{0}' contains a non-hex digit")]
    HexDigit(String),
    /// A bare word that is not a named color.
    #[error("unknown color name '{0}'")]
    UnknownName(String),
    /// An unsupported function, or bad arguments to a supported one.
    #[error("malformed color function '{0}'")]
    MalformedFunction(String),
}

/// [§ 4 Representing Colors](https://www.w3.org/TR/css-color-4/#color-type)
///
/// A color as written by the author. Functional components are clamped to
/// their valid ranges on construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    Named {
        /// Canonical lower-case keyword
        name: &'static str,
        /// Value the keyword stands for
        rgb: Rgb,
    },
    /// [§ 5.2 The RGB Hexadecimal Notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    Hex(Rgb),
    /// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    Rgb {
        /// Red, 0-255
        r: f64,
        /// Green, 0-255
        g: f64,
        /// Blue, 0-255
        b: f64,
    },
    /// `rgba()`, or `rgb()` with a slash alpha.
    Rgba {
        /// Red, 0-255
        r: f64,
        /// Green, 0-255
        g: f64,
        /// Blue, 0-255
        b: f64,
        /// Alpha, 0-1
        a: f64,
    },
    /// [§ 7 HSL Colors](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
    Hsl {
        /// Hue in degrees, 0-360
        h: f64,
        /// Saturation, 0-100
        s: f64,
        /// Lightness, 0-100
        l: f64,
    },
    /// `hsla()`, or `hsl()` with a slash alpha.
    Hsla {
        /// Hue in degrees, 0-360
        h: f64,
        /// Saturation, 0-100
        s: f64,
        /// Lightness, 0-100
        l: f64,
        /// Alpha, 0-1
        a: f64,
    },
    /// Hue/saturation/value. Not a CSS notation; only constructed directly.
    Hsv {
        /// Hue in degrees, 0-360
        h: f64,
        /// Saturation, 0-100
        s: f64,
        /// Value, 0-100
        v: f64,
    },
}

fn clamp_channel(value: f64) -> f64 {
    value.clamp(0.0, 255.0)
}

fn clamp_alpha(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

impl Color {
    /// `rgb(r, g, b)` with channels clamped to 0-255.
    #[must_use]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::Rgb {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// `rgba(r, g, b, a)` with channels clamped to 0-255 and alpha to 0-1.
    #[must_use]
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::Rgba {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_alpha(a),
        }
    }

    /// `hsl(h, s%, l%)` with components clamped.
    #[must_use]
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::Hsl {
            h: h.clamp(0.0, 360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// `hsla(h, s%, l%, a)` with components clamped.
    #[must_use]
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self::Hsla {
            h: h.clamp(0.0, 360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
            a: clamp_alpha(a),
        }
    }

    /// HSV with components clamped.
    #[must_use]
    pub fn hsv(h: f64, s: f64, v: f64) -> Self {
        Self::Hsv {
            h: h.clamp(0.0, 360.0),
            s: s.clamp(0.0, 100.0),
            v: v.clamp(0.0, 100.0),
        }
    }

    /// `rgba(0, 0, 0, 0)`, the value of `transparent`.
    #[must_use]
    pub const fn transparent() -> Self {
        Self::Rgba {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.0,
        }
    }

    /// The alpha component, for notations that carry one.
    #[must_use]
    pub const fn alpha(&self) -> Option<f64> {
        match self {
            Self::Rgba { a, .. } | Self::Hsla { a, .. } => Some(*a),
            _ => None,
        }
    }

    /// Whether this color still has to be composited against whatever ends up
    /// beneath it (alpha strictly below 1).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.alpha().is_some_and(|a| a < 1.0)
    }

    /// Channels on the 0-255 scale before rounding.
    #[must_use]
    pub fn channels(&self) -> [f64; 3] {
        match *self {
            Self::Rgb { r, g, b } | Self::Rgba { r, g, b, .. } => [r, g, b],
            _ => {
                let rgb = self.to_rgb();
                [f64::from(rgb.r), f64::from(rgb.g), f64::from(rgb.b)]
            }
        }
    }

    /// The color's sRGB value with any alpha ignored.
    #[must_use]
    pub fn to_rgb(&self) -> Rgb {
        match *self {
            Self::Named { rgb, .. } | Self::Hex(rgb) => rgb,
            Self::Rgb { r, g, b } | Self::Rgba { r, g, b, .. } => {
                Rgb::new(channel_to_u8(r), channel_to_u8(g), channel_to_u8(b))
            }
            Self::Hsl { h, s, l } | Self::Hsla { h, s, l, .. } => hsl_to_rgb(h, s, l),
            Self::Hsv { h, s, v } => hsv_to_rgb(h, s, v),
        }
    }

    /// The opaque color seen when this color is painted over `bg`.
    #[must_use]
    pub fn render_over(&self, bg: Rgb) -> Rgb {
        if self.alpha().is_some() {
            composite(self, bg)
        } else {
            self.to_rgb()
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Hex(rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, .. } => f.write_str(name),
            Self::Hex(rgb) => write!(f, "{rgb}"),
            Self::Rgb { r, g, b } => write!(f, "rgb({r}, {g}, {b})"),
            Self::Rgba { r, g, b, a } => write!(f, "rgba({r}, {g}, {b}, {a})"),
            Self::Hsl { h, s, l } => write!(f, "hsl({h}, {s}%, {l}%)"),
            Self::Hsla { h, s, l, a } => write!(f, "hsla({h}, {s}%, {l}%, {a})"),
            Self::Hsv { h, s, v } => write!(f, "hsv({h}, {s}%, {v}%)"),
        }
    }
}

/// [§ 4.1 The `<color>` syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
///
/// Parse a CSS color value: a named color, `#rgb`/`#rrggbb`, or one of the
/// `rgb()`, `rgba()`, `hsl()`, `hsla()` functions in either the comma or the
/// space-and-slash syntax. Matching is ASCII case-insensitive.
///
/// The CSS-wide keywords (`inherit`, `initial`, ...) and `transparent` are
/// handled by the cascade, not here.
///
/// # Errors
///
/// Returns a [`ColorError`] describing why the value is not a color.
pub fn parse_color(value: &str) -> Result<Color, ColorError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ColorError::Empty);
    }
    if let Some(digits) = value.strip_prefix('#') {
        return parse_hex(value, digits).map(Color::Hex);
    }
    if let Some((name, rest)) = value.split_once('(') {
        return parse_function(value, &name.trim().to_ascii_lowercase(), rest);
    }
    named::lookup(value)
        .map(|(name, rgb)| Color::Named { name, rgb })
        .ok_or_else(|| ColorError::UnknownName(value.to_string()))
}

/// [§ 5.2 The RGB Hexadecimal Notations](https://www.w3.org/TR/css-color-4/#hex-notation)
///
/// "The three-digit RGB notation (#RGB) is converted into six-digit form
/// (#RRGGBB) by replicating digits, not by adding zeros."
fn parse_hex(value: &str, digits: &str) -> Result<Rgb, ColorError> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::HexDigit(value.to_string()));
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).unwrap_or_default();
    match digits.len() {
        3 => Ok(Rgb::new(nibble(0) * 17, nibble(1) * 17, nibble(2) * 17)),
        6 => {
            let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or_default();
            Ok(Rgb::new(byte(0), byte(2), byte(4)))
        }
        _ => Err(ColorError::HexLength(value.to_string())),
    }
}

/// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions),
/// [§ 7.1 The HSL notation](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// Arguments may be separated by commas or whitespace. Alpha follows a `/`,
/// or is the fourth argument of `rgba()`/`hsla()`. A legacy fourth argument
/// to `rgb()`/`hsl()` is ignored.
fn parse_function(value: &str, name: &str, rest: &str) -> Result<Color, ColorError> {
    let malformed = || ColorError::MalformedFunction(value.to_string());

    let inner = rest.trim_end().strip_suffix(')').ok_or_else(malformed)?;
    let (channels, slash_alpha) = match inner.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (inner, None),
    };
    let tokens: Vec<&str> = channels
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    let (components, alpha_token) = match (tokens.as_slice(), slash_alpha) {
        ([a, b, c], alpha) => ([*a, *b, *c], alpha),
        ([a, b, c, d], None) => ([*a, *b, *c], Some(*d)),
        _ => return Err(malformed()),
    };
    let alpha = alpha_token
        .map(|token| parse_alpha(token).ok_or_else(malformed))
        .transpose()?;

    match name {
        "rgb" | "rgba" => {
            let mut rgb = [0.0; 3];
            for (slot, token) in rgb.iter_mut().zip(components) {
                *slot = parse_rgb_channel(token).ok_or_else(malformed)?;
            }
            let [r, g, b] = rgb;
            Ok(match (name, alpha) {
                ("rgba", a) => Color::rgba(r, g, b, a.unwrap_or(1.0)),
                (_, Some(a)) if slash_alpha.is_some() => Color::rgba(r, g, b, a),
                _ => Color::rgb(r, g, b),
            })
        }
        "hsl" | "hsla" => {
            let h = parse_hue(components[0]).ok_or_else(malformed)?;
            let s = parse_percentage(components[1]).ok_or_else(malformed)?;
            let l = parse_percentage(components[2]).ok_or_else(malformed)?;
            Ok(match (name, alpha) {
                ("hsla", a) => Color::hsla(h, s, l, a.unwrap_or(1.0)),
                (_, Some(a)) if slash_alpha.is_some() => Color::hsla(h, s, l, a),
                _ => Color::hsl(h, s, l),
            })
        }
        _ => Err(malformed()),
    }
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `<number>` on 0-255, or `<percentage>` of 255.
fn parse_rgb_channel(token: &str) -> Option<f64> {
    match token.strip_suffix('%') {
        Some(percent) => parse_number(percent).map(|p| p * 255.0 / 100.0),
        None => parse_number(token),
    }
}

/// `<number>` on 0-1, or `<percentage>`.
fn parse_alpha(token: &str) -> Option<f64> {
    match token.strip_suffix('%') {
        Some(percent) => parse_number(percent).map(|p| p / 100.0),
        None => parse_number(token),
    }
}

/// `<hue>`: a bare number or `deg`.
fn parse_hue(token: &str) -> Option<f64> {
    parse_number(token.strip_suffix("deg").unwrap_or(token))
}

/// HSL saturation and lightness; the `%` sign is optional.
fn parse_percentage(token: &str) -> Option<f64> {
    parse_number(token.strip_suffix('%').unwrap_or(token))
}
