use crate::schema::{
    PowerbarConfig, DEFAULT_BAR_WIDTH, DEFAULT_LEFT, DEFAULT_PLACEMENT, DEFAULT_RIGHT,
    DEFAULT_SEPARATOR,
};
use powerbar_core::SegmentRegistration;
use serde::Serialize;

/// Name under which the settings are published to configuration surfaces.
pub const EXTENSION_NAME: &str = "powerbar";

pub const MIN_BAR_WIDTH: usize = 4;
pub const MAX_BAR_WIDTH: usize = 24;

/// Where the bar sits relative to the host's editor.  Passed through to the
/// display surface untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    AboveEditor,
    #[default]
    BelowEditor,
}

impl Placement {
    /// Anything other than `"aboveEditor"` means below.
    pub fn parse(raw: &str) -> Self {
        if raw == "aboveEditor" {
            Self::AboveEditor
        } else {
            Self::BelowEditor
        }
    }
}

/// Normalised settings used for every render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub left:      Vec<String>,
    pub right:     Vec<String>,
    pub separator: String,
    pub placement: Placement,
    /// Progress-bar width, always within `[MIN_BAR_WIDTH, MAX_BAR_WIDTH]`.
    pub bar_width: usize,
}

impl Settings {
    pub fn from_config(cfg: &PowerbarConfig) -> Self {
        let bar_width = cfg
            .bar_width
            .requested()
            .unwrap_or(DEFAULT_BAR_WIDTH as i64)
            .clamp(MIN_BAR_WIDTH as i64, MAX_BAR_WIDTH as i64) as usize;

        Self {
            left:      split_ids(&cfg.left),
            right:     split_ids(&cfg.right),
            separator: cfg.separator.clone(),
            placement: Placement::parse(&cfg.placement),
            bar_width,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&PowerbarConfig::default())
    }
}

/// Split a comma-separated id list, trimming entries and dropping empty ones.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One entry of an ordered-list setting (a known segment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentOption {
    pub id:    String,
    pub label: String,
}

impl From<&SegmentRegistration> for SegmentOption {
    fn from(reg: &SegmentRegistration) -> Self {
        Self {
            id:    reg.id.clone(),
            label: reg.label.clone(),
        }
    }
}

/// Describes one user-facing setting for external configuration surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDefinition {
    pub id:            &'static str,
    pub label:         &'static str,
    pub description:   &'static str,
    pub default_value: String,
    /// Allowed values for enumerated settings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values:        Vec<&'static str>,
    /// Known segments for the left/right ordered lists.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options:       Vec<SegmentOption>,
}

/// Full settings manifest.  `segments` is the catalog of registered
/// segments, offered as options of the left/right lists.
pub fn definitions(segments: &[SegmentOption]) -> Vec<SettingDefinition> {
    vec![
        SettingDefinition {
            id:            "left",
            label:         "Left segments",
            description:   "Comma-separated segment IDs for the left side",
            default_value: DEFAULT_LEFT.to_string(),
            values:        Vec::new(),
            options:       segments.to_vec(),
        },
        SettingDefinition {
            id:            "right",
            label:         "Right segments",
            description:   "Comma-separated segment IDs for the right side",
            default_value: DEFAULT_RIGHT.to_string(),
            values:        Vec::new(),
            options:       segments.to_vec(),
        },
        SettingDefinition {
            id:            "separator",
            label:         "Separator",
            description:   "Separator between segments",
            default_value: DEFAULT_SEPARATOR.to_string(),
            values:        vec![" │ ", " ┃ ", " | ", " · ", "  "],
            options:       Vec::new(),
        },
        SettingDefinition {
            id:            "placement",
            label:         "Placement",
            description:   "Where the powerbar appears",
            default_value: DEFAULT_PLACEMENT.to_string(),
            values:        vec!["belowEditor", "aboveEditor"],
            options:       Vec::new(),
        },
        SettingDefinition {
            id:            "bar-width",
            label:         "Bar width",
            description:   "Width of progress bars in characters",
            default_value: DEFAULT_BAR_WIDTH.to_string(),
            values:        vec!["6", "8", "10", "12", "16"],
            options:       Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BarWidth;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.left, vec!["git-branch", "tokens", "context-usage"]);
        assert_eq!(s.right, vec!["model", "sub-hourly", "sub-weekly"]);
        assert_eq!(s.separator, " │ ");
        assert_eq!(s.placement, Placement::BelowEditor);
        assert_eq!(s.bar_width, 10);
    }

    #[test]
    fn id_lists_are_trimmed_and_compacted() {
        assert_eq!(split_ids(" model , ,tokens,, "), vec!["model", "tokens"]);
        assert!(split_ids("").is_empty());
        assert!(split_ids(" , ").is_empty());
    }

    #[test]
    fn bar_width_is_clamped() {
        let with = |bar_width| {
            Settings::from_config(&PowerbarConfig {
                bar_width,
                ..PowerbarConfig::default()
            })
            .bar_width
        };
        assert_eq!(with(BarWidth::Number(2)), MIN_BAR_WIDTH);
        assert_eq!(with(BarWidth::Number(-7)), MIN_BAR_WIDTH);
        assert_eq!(with(BarWidth::Number(100)), MAX_BAR_WIDTH);
        assert_eq!(with(BarWidth::Text("12".into())), 12);
        assert_eq!(with(BarWidth::Text("12px".into())), 12);
        assert_eq!(with(BarWidth::Text("nope".into())), DEFAULT_BAR_WIDTH);
        assert_eq!(with(BarWidth::Number(0)), DEFAULT_BAR_WIDTH);
    }

    #[test]
    fn unknown_placement_falls_back_to_below() {
        assert_eq!(Placement::parse("aboveEditor"), Placement::AboveEditor);
        assert_eq!(Placement::parse("sideways"), Placement::BelowEditor);
        assert_eq!(Placement::parse(""), Placement::BelowEditor);
    }

    #[test]
    fn definitions_offer_registered_segments() {
        let catalog = vec![SegmentOption::from(&SegmentRegistration::new("model", "Model"))];
        let defs = definitions(&catalog);

        let ids: Vec<_> = defs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["left", "right", "separator", "placement", "bar-width"]);
        assert_eq!(defs[0].options, catalog);
        assert_eq!(defs[1].options, catalog);
        assert!(defs[2].options.is_empty());
        assert_eq!(defs[4].default_value, "10");
    }
}
