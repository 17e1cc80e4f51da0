//! De-duplicated warnings for unsupported input.
//!
//! Inline styles in real pages repeat the same unsupported declarations on
//! hundreds of elements. A [`Warnings`] set emits each distinct message once
//! through `tracing`. Owners decide the scope: the contrast checker keeps one
//! per evaluated document.

use std::collections::HashSet;

/// Set of warnings already emitted in one scope.
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    emitted: HashSet<String>,
}

impl Warnings {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn about an unsupported feature, once per unique message.
    /// Returns whether the warning was emitted.
    ///
    /// # Example
    /// ```
    /// use lumen_common::warning::Warnings;
    ///
    /// let mut warnings = Warnings::new();
    /// assert!(warnings.warn_once("CSS", "unsupported property 'opacity' ignored"));
    /// assert!(!warnings.warn_once("CSS", "unsupported property 'opacity' ignored"));
    /// ```
    pub fn warn_once(&mut self, component: &str, message: &str) -> bool {
        let emitted = self.emitted.insert(Self::key(component, message));
        if emitted {
            tracing::warn!(component, "{message}");
        }
        emitted
    }

    /// Returns true if this exact message has been emitted.
    #[must_use]
    pub fn was_warned(&self, component: &str, message: &str) -> bool {
        self.emitted.contains(&Self::key(component, message))
    }

    /// Number of distinct warnings emitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    /// Whether nothing was emitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }

    fn key(component: &str, message: &str) -> String {
        format!("[{component}] {message}")
    }
}
