use crate::color::DEFAULT_TAG;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One named unit of status-bar content.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: String,
    /// Primary text, rendered before the bar.
    pub text: String,
    /// Text rendered after the bar (e.g. `"59%"`).
    pub suffix: Option<String>,
    pub icon: Option<String>,
    /// Symbolic color tag resolved by the theme.
    pub color: Option<String>,
    /// Progress value; out-of-range values are clamped when drawn.
    pub bar: Option<f64>,
}

impl Segment {
    /// `true` when there is nothing to draw: no text, no suffix and no bar.
    ///
    /// An icon on its own does not make a segment visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.suffix.as_deref().map_or(true, str::is_empty) && self.bar.is_none()
    }

    /// Color tag to draw this segment with.
    #[must_use]
    pub fn color_tag(&self) -> &str {
        match self.color.as_deref() {
            Some(tag) if !tag.is_empty() => tag,
            _ => DEFAULT_TAG,
        }
    }
}

/// Payload of a `powerbar:update` event.
///
/// Leaving out both `text` and `bar` asks for the segment to be removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentUpdate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<f64>,
}

impl SegmentUpdate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// An update that removes the segment `id`.
    pub fn clear(id: impl Into<String>) -> Self {
        Self::new(id)
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn bar(mut self, value: f64) -> Self {
        self.bar = Some(value);
        self
    }

    /// `true` when this update signals "no longer applicable".
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty) && self.bar.is_none()
    }
}

/// What [`SegmentStore::apply`] did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// The segment was inserted or replaced.
    Set,
    /// The segment was removed.
    Removed,
    /// Nothing changed (missing id, or removal of an unknown segment).
    Unchanged,
}

/// Current display state of every active segment, keyed by id.
///
/// The map is private: the only way in is [`SegmentStore::apply`], which
/// keeps removals and replacements consistent with the update contract.
#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    segments: HashMap<String, Segment>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one producer update.
    pub fn apply(&mut self, update: &SegmentUpdate) -> StoreChange {
        if update.id.is_empty() {
            return StoreChange::Unchanged;
        }

        if update.is_removal() {
            return match self.segments.remove(&update.id) {
                Some(_) => StoreChange::Removed,
                None => StoreChange::Unchanged,
            };
        }

        self.segments.insert(
            update.id.clone(),
            Segment {
                id: update.id.clone(),
                text: update.text.clone().unwrap_or_default(),
                suffix: update.suffix.clone(),
                icon: update.icon.clone(),
                color: update.color.clone(),
                bar: update.bar,
            },
        );
        StoreChange::Set
    }

    pub fn get(&self, id: &str) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// Drop every segment (session boundary).
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_inserts_and_replaces() {
        let mut store = SegmentStore::new();
        assert_eq!(store.apply(&SegmentUpdate::new("model").text("gpt-5")), StoreChange::Set);
        assert_eq!(store.apply(&SegmentUpdate::new("model").text("o3").color("dim")), StoreChange::Set);

        let seg = store.get("model").unwrap();
        assert_eq!(seg.text, "o3");
        assert_eq!(seg.color.as_deref(), Some("dim"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_without_text_or_bar_removes() {
        let mut store = SegmentStore::new();
        store.apply(&SegmentUpdate::new("git-branch").text("main").icon("⎇"));

        // Suffix and icon alone are not enough to keep a segment alive.
        let removal = SegmentUpdate::new("git-branch").suffix("x").icon("⎇");
        assert_eq!(store.apply(&removal), StoreChange::Removed);
        assert!(store.get("git-branch").is_none());
        assert_eq!(store.apply(&removal), StoreChange::Unchanged);
    }

    #[test]
    fn empty_text_with_bar_is_kept() {
        let mut store = SegmentStore::new();
        let update = SegmentUpdate::new("context-usage").text("").suffix("42%").bar(42.0);
        assert_eq!(store.apply(&update), StoreChange::Set);
        assert!(!store.get("context-usage").unwrap().is_empty());
    }

    #[test]
    fn missing_id_is_ignored() {
        let mut store = SegmentStore::new();
        assert_eq!(store.apply(&SegmentUpdate::new("").text("orphan")), StoreChange::Unchanged);
        assert!(store.is_empty());
    }

    #[test]
    fn emptiness_and_default_color() {
        let seg = Segment {
            id: "x".into(),
            text: String::new(),
            suffix: Some(String::new()),
            icon: Some("★".into()),
            color: Some(String::new()),
            bar: None,
        };
        assert!(seg.is_empty());
        assert_eq!(seg.color_tag(), DEFAULT_TAG);
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = SegmentStore::new();
        store.apply(&SegmentUpdate::new("a").text("1"));
        store.apply(&SegmentUpdate::new("b").bar(10.0));
        store.clear();
        assert!(store.is_empty());
    }
}
