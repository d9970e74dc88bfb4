//! Presentation-support helpers for the evaluation diff.
//!
//! Pure mappings from match kinds to visual tokens, and per-item disclosure
//! state. None of this touches classification or metrics.

use std::collections::HashSet;

use crate::types::document::Category;

/// Icon token for a match kind's wire string.
///
/// Any unrecognized kind maps to a neutral fallback rather than failing.
pub fn icon_for(kind: &str) -> &'static str {
    match kind {
        "exact" => "✅",
        "partial" => "⚠️",
        "extra" => "➕",
        "missing" => "➖",
        _ => "❓",
    }
}

/// Color class token for a match kind's wire string.
///
/// Any unrecognized kind maps to a neutral fallback rather than failing.
pub fn color_class_for(kind: &str) -> &'static str {
    match kind {
        "exact" => "match-exact",
        "partial" => "match-partial",
        "extra" => "match-extra",
        "missing" => "match-missing",
        _ => "match-unknown",
    }
}

/// Per-item disclosure toggles, keyed by `(category, index)`.
///
/// A set of opened keys: no ordering or iteration is ever needed, only
/// membership. Independent of the diff data itself.
#[derive(Debug, Default, Clone)]
pub struct DisclosureState {
    open: HashSet<(Category, usize)>,
}

impl DisclosureState {
    /// Create with everything collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the disclosure state of one item.
    pub fn toggle(&mut self, category: Category, index: usize) {
        let key = (category, index);
        if !self.open.remove(&key) {
            self.open.insert(key);
        }
    }

    /// Whether one item is currently expanded.
    pub fn is_expanded(&self, category: Category, index: usize) -> bool {
        self.open.contains(&(category, index))
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        self.open.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::evaluation::MatchKind;

    #[test]
    fn test_known_kinds_have_distinct_tokens() {
        let kinds = [
            MatchKind::Exact,
            MatchKind::Partial,
            MatchKind::Extra,
            MatchKind::Missing,
        ];
        let icons: HashSet<_> = kinds.iter().map(|k| icon_for(k.as_str())).collect();
        let classes: HashSet<_> = kinds.iter().map(|k| color_class_for(k.as_str())).collect();
        assert_eq!(icons.len(), kinds.len());
        assert_eq!(classes.len(), kinds.len());
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        assert_eq!(icon_for("garbled"), "❓");
        assert_eq!(color_class_for(""), "match-unknown");
    }

    #[test]
    fn test_toggle_is_independent_per_key() {
        let mut state = DisclosureState::new();
        state.toggle(Category::Goals, 0);
        state.toggle(Category::Goals, 1);

        assert!(state.is_expanded(Category::Goals, 0));
        assert!(state.is_expanded(Category::Goals, 1));
        assert!(!state.is_expanded(Category::Contacts, 0));

        state.toggle(Category::Goals, 0);
        assert!(!state.is_expanded(Category::Goals, 0));
        assert!(state.is_expanded(Category::Goals, 1));

        state.collapse_all();
        assert!(!state.is_expanded(Category::Goals, 1));
    }
}
