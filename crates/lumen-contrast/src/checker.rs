//! Walks a document and records findings for every text-bearing element.

use lumen_common::warning::Warnings;
use lumen_css::{StyleContext, StyleResolver};
use lumen_dom::{DomTree, NodeId, visible_text};
use tracing::debug;

use crate::config::CheckerConfig;
use crate::finding::{ContrastFinding, FindingLog, Report, StyleFinding};
use crate::luminance::{evaluate, is_large_text};

/// A check that can be run over a document.
pub trait Audit {
    /// Short name of the check, used in logs and output.
    fn name(&self) -> &str;

    /// Run the check over `tree`.
    fn evaluate(&self, tree: &DomTree) -> Report;
}

/// Checks text against the WCAG contrast thresholds.
///
/// The checker only holds configuration. Every evaluation gets its own
/// resolver, warning set and finding log, so one checker can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct ColorContrastChecker {
    config: CheckerConfig,
}

impl ColorContrastChecker {
    /// Create a checker with `config`.
    #[must_use]
    pub const fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// The configuration used by [`Self::evaluate`].
    #[must_use]
    pub const fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Evaluate `tree` with the checker's configuration.
    #[must_use]
    pub fn evaluate(&self, tree: &DomTree) -> Report {
        self.evaluate_with(tree, &self.config)
    }

    /// Evaluate `tree` with `config` instead of the checker's own.
    #[must_use]
    pub fn evaluate_with(&self, tree: &DomTree, config: &CheckerConfig) -> Report {
        debug!(
            audit = self.name(),
            level = %config.level,
            fast_fail = config.fast_fail,
            "evaluating document"
        );
        let Some(body) = tree.body() else {
            debug!("document has no body");
            return Report::passing();
        };

        let mut session = Session {
            tree,
            config,
            resolver: StyleResolver::new(config.background, config.foreground),
            warnings: Warnings::new(),
            log: FindingLog::new(),
        };
        let root = session.resolver.root().clone();
        session.visit(body, &root);
        session.log.into_report()
    }
}

impl Audit for ColorContrastChecker {
    fn name(&self) -> &str {
        "color-contrast"
    }

    fn evaluate(&self, tree: &DomTree) -> Report {
        Self::evaluate(self, tree)
    }
}

/// State of one evaluation.
struct Session<'a> {
    tree: &'a DomTree,
    config: &'a CheckerConfig,
    resolver: StyleResolver,
    warnings: Warnings,
    log: FindingLog,
}

impl Session<'_> {
    fn visit(&mut self, id: NodeId, parent: &StyleContext) {
        let tree = self.tree;
        let Some(element) = tree.as_element(id) else {
            return;
        };
        let tag = element.tag_name.as_str();
        // raw text and line breaks carry no text of their own
        if matches!(tag, "style" | "script" | "br") {
            return;
        }

        let text = visible_text(tree, id, self.config.text_mode);
        let resolution = self.resolver.resolve(tag, element.style(), parent);
        let found_before = self.log.len();

        for property in &resolution.unsupported {
            let _ = self
                .warnings
                .warn_once("CSS", &format!("unsupported property '{property}' ignored"));
        }

        for issue in &resolution.issues {
            self.log
                .record(StyleFinding::from_issue(issue, tag, &text, &element.source));
        }

        let context = resolution.context;
        let contrast = evaluate(context.font_color, context.background_color);
        let large = is_large_text(context.font_size_pt, context.font_is_bold);
        debug!(tag, ratio = contrast.ratio, large, "evaluated element");

        if !contrast.passes(self.config.level, large) {
            self.log.record(ContrastFinding::new(
                self.config.level,
                tag,
                &text,
                &element.source,
                large,
                contrast.ratio_string(),
            ));
        }

        if self.config.fast_fail && self.log.len() > found_before {
            return;
        }

        for child in tree.element_children(id) {
            self.visit(child, &context);
        }
    }
}
