//! Conversions between color spaces, and alpha compositing.

use super::{Color, Rgb};

/// Round and clamp a channel that is already on the 0-255 scale.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn channel_to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// [§ 7.1 Converting HSL Colors to sRGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
///
/// - hue: degrees, clamped to 0-360
/// - saturation, lightness: percentages, clamped to 0-100
///
/// Channels are scaled by 255 and rounded.
#[must_use]
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let h = hue.clamp(0.0, 360.0) / 360.0;
    let s = saturation.clamp(0.0, 100.0) / 100.0;
    let l = lightness.clamp(0.0, 100.0) / 100.0;

    let (r, g, b) = if s <= 0.0 {
        // achromatic
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    Rgb::new(
        channel_to_u8(r * 255.0),
        channel_to_u8(g * 255.0),
        channel_to_u8(b * 255.0),
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// HSV (a.k.a. HSB) to sRGB using the hue-sector formula.
///
/// - hue: degrees, clamped to 0-360
/// - saturation, value: percentages, clamped to 0-100
///
/// NOTE: channels are scaled by 256 and then clamped to 255, matching the
/// contrast calculators this checker is compared against. Grey values such as
/// `v = 75` therefore land on 192, not 191.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let h = hue.clamp(0.0, 360.0);
    let s = saturation.clamp(0.0, 100.0) / 100.0;
    let v = value.clamp(0.0, 100.0) / 100.0;

    let sector = (h / 60.0) % 6.0;
    let index = sector.floor();
    let f = sector - index;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match index as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(
        channel_to_u8(r * 256.0),
        channel_to_u8(g * 256.0),
        channel_to_u8(b * 256.0),
    )
}

/// Hue in degrees plus the chroma inputs shared by HSL and HSV.
fn hue_and_extremes(rgb: Rgb) -> (f64, f64, f64) {
    let [r, g, b] = rgb.normalized();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta <= 0.0 {
        0.0
    } else if (max - r).abs() < f64::EPSILON {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if (max - g).abs() < f64::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    (hue, max, min)
}

/// sRGB to HSL, as `(degrees, saturation %, lightness %)`.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> (f64, f64, f64) {
    let (hue, max, min) = hue_and_extremes(rgb);
    let lightness = (max + min) / 2.0;
    let delta = max - min;
    let saturation = if delta <= 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * lightness - 1.0).abs())
    };
    (hue, saturation * 100.0, lightness * 100.0)
}

/// sRGB to HSV, as `(degrees, saturation %, value %)`.
#[must_use]
pub fn rgb_to_hsv(rgb: Rgb) -> (f64, f64, f64) {
    let (hue, max, min) = hue_and_extremes(rgb);
    let saturation = if max <= 0.0 { 0.0 } else { (max - min) / max };
    (hue, saturation * 100.0, max * 100.0)
}

/// [§ 5.2 Simple alpha compositing](https://www.w3.org/TR/compositing-1/#simplealphacompositing)
///
/// Paint `fg` over the opaque `bg` and return the displayed color:
/// `bg - (bg - fg) * alpha` per channel, rounded to the nearest integer.
/// Opaque colors (no alpha component) come back unchanged.
#[must_use]
pub fn composite(fg: &Color, bg: Rgb) -> Rgb {
    let alpha = fg.alpha().unwrap_or(1.0);
    let [fr, fgreen, fb] = fg.channels();
    let blend = |under: u8, over: f64| {
        let under = f64::from(under);
        channel_to_u8(under - (under - over) * alpha)
    };
    Rgb::new(blend(bg.r, fr), blend(bg.g, fgreen), blend(bg.b, fb))
}
