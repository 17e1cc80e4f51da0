//! WCAG contrast checking for HTML documents.
//!
//! # Scope
//!
//! This crate implements:
//! - **Contrast** ([WCAG 2.1 § 1.4.3](https://www.w3.org/TR/WCAG21/#contrast-minimum),
//!   [§ 1.4.6](https://www.w3.org/TR/WCAG21/#contrast-enhanced))
//!   - Relative luminance and contrast ratio
//!   - Large-text classification
//!   - AA and AAA thresholds
//!
//! - **Document walk**
//!   - Depth-first from `<body>`, resolving inline styles with
//!     [`lumen_css::StyleResolver`]
//!   - Optional fast fail below an offending element
//!
//! - **Report**
//!   - Contrast and style findings in document order
//!   - JSON output via `serde`
//!
//! ```
//! use lumen_contrast::ColorContrastChecker;
//! use lumen_dom::parse_html;
//!
//! let tree = parse_html(r#"<p style="color: white;">white text</p>"#);
//! let report = ColorContrastChecker::default().evaluate(&tree);
//! assert!(!report.passed);
//! ```

pub mod checker;
pub mod config;
pub mod finding;
pub mod luminance;

pub use checker::{Audit, ColorContrastChecker};
pub use config::CheckerConfig;
pub use finding::{ContrastFinding, Finding, FindingKind, FindingLog, Report, StyleFinding};
pub use luminance::{
    ContrastEvaluation, WcagLevel, contrast_ratio, evaluate, is_large_text, relative_luminance,
};
