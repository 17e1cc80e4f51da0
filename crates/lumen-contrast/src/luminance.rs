//! [WCAG 2.1 § 1.4.3 Contrast (Minimum)](https://www.w3.org/TR/WCAG21/#contrast-minimum)
//! and [§ 1.4.6 Contrast (Enhanced)](https://www.w3.org/TR/WCAG21/#contrast-enhanced)
//!
//! Relative luminance, contrast ratio and the pass/fail thresholds.

use std::str::FromStr;

use lumen_css::Rgb;
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// WCAG conformance level to check against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum WcagLevel {
    /// Level AA: 4.5:1, or 3:1 for large text
    #[default]
    #[strum(serialize = "AA")]
    #[serde(rename = "AA")]
    Aa,
    /// Level AAA: 7:1, or 4.5:1 for large text
    #[strum(serialize = "AAA")]
    #[serde(rename = "AAA")]
    Aaa,
}

impl WcagLevel {
    /// Parse `"AA"` or `"AAA"` in any case, falling back to AA for anything
    /// else.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        Self::from_str(value.trim()).unwrap_or_default()
    }

    /// The lowest contrast ratio that passes at this level.
    #[must_use]
    pub const fn minimum_ratio(self, large_text: bool) -> f64 {
        match (self, large_text) {
            (Self::Aa, false) | (Self::Aaa, true) => 4.5,
            (Self::Aa, true) => 3.0,
            (Self::Aaa, false) => 7.0,
        }
    }
}

/// [Relative luminance](https://www.w3.org/TR/WCAG21/#dfn-relative-luminance)
///
/// "the relative brightness of any point in a colorspace, normalized to 0 for
/// darkest black and 1 for lightest white"
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let [r, g, b] = rgb.normalized().map(|c| {
        if c < 0.039_28 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// [Contrast ratio](https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio)
///
/// "(L1 + 0.05) / (L2 + 0.05), where L1 is the relative luminance of the
/// lighter of the colors, and L2 is the relative luminance of the darker of
/// the colors."
///
/// The result is rounded to two decimals, and thresholds are compared against
/// the rounded value.
#[must_use]
pub fn contrast_ratio(luminance_a: f64, luminance_b: f64) -> f64 {
    let (lighter, darker) = if luminance_a >= luminance_b {
        (luminance_a, luminance_b)
    } else {
        (luminance_b, luminance_a)
    };
    let ratio = (lighter + 0.05) / (darker + 0.05);
    (ratio * 100.0).round() / 100.0
}

/// [Large scale (text)](https://www.w3.org/TR/WCAG21/#dfn-large-scale)
///
/// "with at least 18 point or 14 point bold or font size that would yield
/// equivalent size"
#[must_use]
pub fn is_large_text(size_pt: f64, bold: bool) -> bool {
    size_pt >= 18.0 || (size_pt >= 14.0 && bold)
}

/// Contrast of one foreground/background pair at every threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastEvaluation {
    /// Contrast ratio, rounded to two decimals
    pub ratio: f64,
    /// Normal text at AA
    pub passes_aa: bool,
    /// Large text at AA
    pub passes_aa_large: bool,
    /// Normal text at AAA
    pub passes_aaa: bool,
    /// Large text at AAA
    pub passes_aaa_large: bool,
}

impl ContrastEvaluation {
    /// Whether text of the given size class passes at `level`.
    #[must_use]
    pub const fn passes(&self, level: WcagLevel, large_text: bool) -> bool {
        match (level, large_text) {
            (WcagLevel::Aa, false) => self.passes_aa,
            (WcagLevel::Aa, true) => self.passes_aa_large,
            (WcagLevel::Aaa, false) => self.passes_aaa,
            (WcagLevel::Aaa, true) => self.passes_aaa_large,
        }
    }

    /// The ratio as reported in findings, e.g. `"4.12"`.
    #[must_use]
    pub fn ratio_string(&self) -> String {
        format!("{:.2}", self.ratio)
    }
}

/// Evaluate the contrast of text color `fg` on background `bg`.
#[must_use]
pub fn evaluate(fg: Rgb, bg: Rgb) -> ContrastEvaluation {
    let ratio = contrast_ratio(relative_luminance(fg), relative_luminance(bg));
    let passes = |level: WcagLevel, large: bool| ratio >= level.minimum_ratio(large);
    ContrastEvaluation {
        ratio,
        passes_aa: passes(WcagLevel::Aa, false),
        passes_aa_large: passes(WcagLevel::Aa, true),
        passes_aaa: passes(WcagLevel::Aaa, false),
        passes_aaa_large: passes(WcagLevel::Aaa, true),
    }
}
