//! Findings and the report returned by an evaluation.
//!
//! The serialized form is the report format consumers already parse: a
//! `passed` flag and a flat `errors` list whose entries are told apart by
//! their `type` field.

use lumen_css::{IssueKind, StyleIssue};
use serde::Serialize;
use strum_macros::Display;

use crate::luminance::WcagLevel;

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum FindingKind {
    /// Text contrast below the threshold for its size.
    #[strum(serialize = "low contrast")]
    #[serde(rename = "low contrast")]
    LowContrast,
    /// `color` or `background-color` could not be parsed.
    #[strum(serialize = "invalid color")]
    #[serde(rename = "invalid color")]
    InvalidColor,
    /// `font-size` could not be parsed.
    #[strum(serialize = "invalid size")]
    #[serde(rename = "invalid size")]
    InvalidSize,
    /// `font-weight` could not be parsed.
    #[strum(serialize = "invalid weight")]
    #[serde(rename = "invalid weight")]
    InvalidWeight,
}

impl From<IssueKind> for FindingKind {
    fn from(kind: IssueKind) -> Self {
        match kind {
            IssueKind::InvalidColor => Self::InvalidColor,
            IssueKind::InvalidSize => Self::InvalidSize,
            IssueKind::InvalidWeight => Self::InvalidWeight,
        }
    }
}

/// A declaration that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleFinding {
    /// One of the `invalid ...` kinds
    #[serde(rename = "type")]
    pub kind: FindingKind,
    /// The offending property
    pub property: String,
    /// Tag name of the element
    pub tag: String,
    /// Visible text of the element
    pub text: String,
    /// Source markup of the element
    pub html: String,
    /// What to do about it
    pub recommendation: String,
}

impl StyleFinding {
    /// Build a finding for `issue` on an element.
    #[must_use]
    pub fn from_issue(issue: &StyleIssue, tag: &str, text: &str, html: &str) -> Self {
        Self {
            kind: issue.kind.into(),
            property: issue.property.clone(),
            tag: tag.to_string(),
            text: text.to_string(),
            html: html.to_string(),
            recommendation: format!("Fix the invalid {}.", issue.property),
        }
    }
}

/// Text whose contrast is too low.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContrastFinding {
    /// Always [`FindingKind::LowContrast`]
    #[serde(rename = "type")]
    pub kind: FindingKind,
    /// Level the element was checked against
    pub mode: WcagLevel,
    /// Tag name of the element
    pub tag: String,
    /// Visible text of the element
    pub text: String,
    /// Source markup of the element
    pub html: String,
    /// Whether the large-text threshold applied
    pub text_is_large: bool,
    /// Ratio with two decimals, e.g. `"1.00"`
    pub contrast_ratio: String,
    /// What to do about it
    pub recommendation: String,
}

impl ContrastFinding {
    /// Build a low-contrast finding for an element.
    #[must_use]
    pub fn new(
        mode: WcagLevel,
        tag: &str,
        text: &str,
        html: &str,
        text_is_large: bool,
        contrast_ratio: String,
    ) -> Self {
        let threshold = mode.minimum_ratio(text_is_large);
        Self {
            kind: FindingKind::LowContrast,
            mode,
            tag: tag.to_string(),
            text: text.to_string(),
            html: html.to_string(),
            text_is_large,
            contrast_ratio,
            recommendation: format!("Contrast Ratio for this element must be at least {threshold:.1}"),
        }
    }
}

/// Any finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Finding {
    /// A declaration problem
    Style(StyleFinding),
    /// A contrast problem
    Contrast(ContrastFinding),
}

impl Finding {
    /// The finding's kind.
    #[must_use]
    pub const fn kind(&self) -> FindingKind {
        match self {
            Self::Style(finding) => finding.kind,
            Self::Contrast(finding) => finding.kind,
        }
    }

    /// Tag name of the element the finding is about.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Style(finding) => &finding.tag,
            Self::Contrast(finding) => &finding.tag,
        }
    }

    /// Visible text of the element the finding is about.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Style(finding) => &finding.text,
            Self::Contrast(finding) => &finding.text,
        }
    }
}

impl From<StyleFinding> for Finding {
    fn from(finding: StyleFinding) -> Self {
        Self::Style(finding)
    }
}

impl From<ContrastFinding> for Finding {
    fn from(finding: ContrastFinding) -> Self {
        Self::Contrast(finding)
    }
}

/// Findings of one evaluation, in the order they were found.
#[derive(Debug, Clone, Default)]
pub struct FindingLog {
    findings: Vec<Finding>,
}

impl FindingLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            findings: Vec::new(),
        }
    }

    /// Append a finding.
    pub fn record(&mut self, finding: impl Into<Finding>) {
        self.findings.push(finding.into());
    }

    /// Number of findings so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Whether nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Finish the evaluation.
    #[must_use]
    pub fn into_report(self) -> Report {
        Report {
            passed: self.findings.is_empty(),
            errors: self.findings,
        }
    }
}

/// Result of evaluating a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// `true` iff `errors` is empty
    pub passed: bool,
    /// Every finding, in document order
    pub errors: Vec<Finding>,
}

impl Report {
    /// A passing report with no findings.
    #[must_use]
    pub const fn passing() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
        }
    }

    /// Findings of one kind.
    pub fn findings_of(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> + '_ {
        self.errors.iter().filter(move |finding| finding.kind() == kind)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::passing()
    }
}
