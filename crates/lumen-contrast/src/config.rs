//! Checker configuration.

use lumen_css::Rgb;
use lumen_dom::TextMode;

use crate::luminance::WcagLevel;

/// Settings for a [`ColorContrastChecker`](crate::ColorContrastChecker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Conformance level to check against
    pub level: WcagLevel,
    /// Background of the document root
    pub background: Rgb,
    /// Text color of the document root
    pub foreground: Rgb,
    /// Stop descending into an element once it has produced a finding
    pub fast_fail: bool,
    /// How element text is quoted in findings
    pub text_mode: TextMode,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            level: WcagLevel::Aa,
            background: Rgb::WHITE,
            foreground: Rgb::BLACK,
            fast_fail: false,
            text_mode: TextMode::Flattened,
        }
    }
}

impl CheckerConfig {
    /// Set the conformance level.
    #[must_use]
    pub const fn with_level(mut self, level: WcagLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the root background color.
    #[must_use]
    pub const fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Set the root text color.
    #[must_use]
    pub const fn with_foreground(mut self, foreground: Rgb) -> Self {
        self.foreground = foreground;
        self
    }

    /// Enable or disable fast fail.
    #[must_use]
    pub const fn with_fast_fail(mut self, fast_fail: bool) -> Self {
        self.fast_fail = fast_fail;
        self
    }

    /// Set how element text is quoted.
    #[must_use]
    pub const fn with_text_mode(mut self, text_mode: TextMode) -> Self {
        self.text_mode = text_mode;
        self
    }
}
