//! Tests for the report shape, the audit seam and shared checkers.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use lumen_contrast::{
    Audit, CheckerConfig, ColorContrastChecker, FindingKind, FindingLog, Report, WcagLevel,
};
use lumen_css::Rgb;
use lumen_dom::{DomTree, ElementData, NodeId, TextMode, parse_html};
use serde_json::{Value, json};

/// Log output written by a test subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a WARN-level subscriber and return what it logged.
fn capture_warnings(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.contents()
}

#[test]
fn test_json_shape_of_contrast_finding() {
    let tree = parse_html(r#"<p style="color: white;">white text</p>"#);
    let report = ColorContrastChecker::default().evaluate(&tree);
    let value: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(
        value,
        json!({
            "passed": false,
            "errors": [{
                "type": "low contrast",
                "mode": "AA",
                "tag": "p",
                "text": "white text",
                "html": "<p style=\"color: white;\">white text</p>",
                "text_is_large": false,
                "contrast_ratio": "1.00",
                "recommendation": "Contrast Ratio for this element must be at least 4.5",
            }],
        })
    );
}

#[test]
fn test_json_shape_of_style_finding() {
    let tree = parse_html(r#"<p style="font-weight: ppppp">bad weight</p>"#);
    let report = ColorContrastChecker::default().evaluate(&tree);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value["errors"][0],
        json!({
            "type": "invalid weight",
            "property": "font-weight",
            "tag": "p",
            "text": "bad weight",
            "html": "<p style=\"font-weight: ppppp\">bad weight</p>",
            "recommendation": "Fix the invalid font-weight.",
        })
    );
}

#[test]
fn test_passing_report_json() {
    let value = serde_json::to_value(Report::default()).unwrap();
    assert_eq!(value, json!({ "passed": true, "errors": [] }));
}

#[test]
fn test_document_without_body_passes() {
    let mut tree = DomTree::new();
    let _ = tree.append_element(NodeId::ROOT, ElementData::new("html"));
    let report = ColorContrastChecker::default().evaluate(&tree);
    assert_eq!(report, Report::passing());
}

#[test]
fn test_hand_built_tree() {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let p = tree.append_element(
        body,
        ElementData::new("p")
            .with_style("color: #FFFF00")
            .with_source("<p>hand built</p>"),
    );
    let _ = tree.append_text(p, "hand built");

    let report = ColorContrastChecker::default().evaluate(&tree);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].tag(), "p");
    assert_eq!(report.errors[0].text(), "hand built");
}

#[test]
fn test_body_is_evaluated() {
    let tree = parse_html(r#"<body style="color: white;">invisible</body>"#);
    let report = ColorContrastChecker::default().evaluate(&tree);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].tag(), "body");
}

#[test]
fn test_root_colors_from_config() {
    let tree = parse_html("<p>plain</p>");
    let config = CheckerConfig::default().with_background(Rgb::BLACK);
    let report = ColorContrastChecker::new(config).evaluate(&tree);
    let tags: Vec<_> = report.errors.iter().map(|f| f.tag().to_string()).collect();
    assert_eq!(tags, ["body", "p"]);

    let config = config_with_white_text();
    assert!(ColorContrastChecker::new(config).evaluate(&tree).passed);
}

fn config_with_white_text() -> CheckerConfig {
    CheckerConfig::default()
        .with_background(Rgb::BLACK)
        .with_foreground(Rgb::WHITE)
}

#[test]
fn test_evaluate_with_overrides_config() {
    let tree = parse_html(r#"<p style="color: #6E6E6E;">grey</p>"#);
    let checker = ColorContrastChecker::default();
    assert!(checker.evaluate(&tree).passed);

    let strict = checker.config().clone().with_level(WcagLevel::Aaa);
    assert!(!checker.evaluate_with(&tree, &strict).passed);
    assert_eq!(checker.config().level, WcagLevel::Aa);
}

#[test]
fn test_placeholder_text_mode() {
    let markup = "<div style=\"color: white;\">\n  This is\n  <div>I'm wrapped</div>\n  some text\n</div>";
    let config = CheckerConfig::default()
        .with_text_mode(TextMode::Placeholder)
        .with_fast_fail(true);
    let report = ColorContrastChecker::new(config).evaluate(&parse_html(markup));
    assert_eq!(report.errors[0].text(), "This is<div>...</div>some text");
}

#[test]
fn test_audit_trait_object() {
    let audits: Vec<Box<dyn Audit>> = vec![Box::new(ColorContrastChecker::default())];
    let tree = parse_html(r#"<p style="color: white;">white text</p>"#);
    for audit in &audits {
        assert_eq!(audit.name(), "color-contrast");
        assert!(!audit.evaluate(&tree).passed);
    }
}

#[test]
fn test_finding_log() {
    let mut log = FindingLog::new();
    assert!(log.is_empty());
    assert!(log.clone().into_report().passed);

    let tree = parse_html(r#"<p style="color: white;">white text</p>"#);
    for finding in ColorContrastChecker::default().evaluate(&tree).errors {
        log.record(finding);
    }
    assert_eq!(log.len(), 1);
    let report = log.into_report();
    assert!(!report.passed);
    assert_eq!(report.findings_of(FindingKind::LowContrast).count(), 1);
    assert_eq!(report.findings_of(FindingKind::InvalidColor).count(), 0);
}

#[test]
fn test_finding_kind_names() {
    assert_eq!(FindingKind::LowContrast.to_string(), "low contrast");
    assert_eq!(FindingKind::InvalidColor.to_string(), "invalid color");
    assert_eq!(FindingKind::InvalidSize.to_string(), "invalid size");
    assert_eq!(FindingKind::InvalidWeight.to_string(), "invalid weight");
}

#[test]
fn test_unsupported_property_is_warned_not_reported() {
    let tree = parse_html(r#"<p style="opacity: 0.1">faded</p><p style="opacity: 0.2">faded</p>"#);
    let mut passed = false;
    let logged = capture_warnings(|| passed = ColorContrastChecker::default().evaluate(&tree).passed);
    assert!(passed);
    assert_eq!(logged.matches("unsupported property 'opacity' ignored").count(), 1);
}

#[test]
fn test_each_evaluation_warns_again() {
    let checker = ColorContrastChecker::default();
    let tree = parse_html(r#"<p style="font: 12px serif">text</p>"#);
    let logged = capture_warnings(|| {
        let _ = checker.evaluate(&tree);
        let _ = checker.evaluate(&tree);
    });
    assert_eq!(logged.matches("unsupported property 'font' ignored").count(), 2);
}

#[test]
fn test_evaluations_are_independent() {
    // a translucent color in one document must not leak into the next
    let checker = ColorContrastChecker::default();
    let first = parse_html(r#"<p style="color: rgba(0, 0, 0, .1)">faint</p>"#);
    let second = parse_html("<p>plain</p>");
    assert!(!checker.evaluate(&first).passed);
    assert!(checker.evaluate(&second).passed);
    assert_eq!(checker.evaluate(&first), checker.evaluate(&first));
}

#[test]
fn test_shared_checker_across_threads() {
    let checker = ColorContrastChecker::default();
    let documents = [
        r#"<p style="color: white;">white text</p>"#,
        "<p>plain</p>",
        r#"<p style="color:yellow">yellow text</p>"#,
        r#"<p style="font-size: 12ppp">bad size</p>"#,
    ];
    let expected: Vec<_> = documents
        .iter()
        .map(|markup| checker.evaluate(&parse_html(markup)))
        .collect();

    let actual: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = documents
            .iter()
            .map(|markup| {
                let checker = &checker;
                scope.spawn(move || checker.evaluate(&parse_html(markup)))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    assert_eq!(actual, expected);
}
