use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_LEFT: &str = "git-branch,tokens,context-usage";
pub const DEFAULT_RIGHT: &str = "model,sub-hourly,sub-weekly";
pub const DEFAULT_SEPARATOR: &str = " │ ";
pub const DEFAULT_PLACEMENT: &str = "belowEditor";
pub const DEFAULT_BAR_WIDTH: usize = 10;

/// Root configuration structure parsed from `powerbar.toml`.
///
/// Values are kept as written; [`Settings`](crate::Settings) does the
/// normalisation (list splitting, clamping, enum fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PowerbarConfig {
    /// Comma-separated segment ids for the left side.
    pub left: String,
    /// Comma-separated segment ids for the right side.
    pub right: String,
    /// Separator drawn between segments of the same side.
    pub separator: String,
    /// `"belowEditor"` or `"aboveEditor"`.
    pub placement: String,
    /// Width of progress bars in columns.
    pub bar_width: BarWidth,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

impl Default for PowerbarConfig {
    fn default() -> Self {
        Self {
            left:      DEFAULT_LEFT.to_string(),
            right:     DEFAULT_RIGHT.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            placement: DEFAULT_PLACEMENT.to_string(),
            bar_width: BarWidth::Number(DEFAULT_BAR_WIDTH as i64),
            theme:     ThemeConfig::default(),
        }
    }
}

/// Bar width as written in the file: `bar-width = 12`, `bar-width = 12.5`
/// and `bar-width = "12px"` are all accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarWidth {
    Number(i64),
    Float(f64),
    Text(String),
}

impl BarWidth {
    /// Requested width, `None` when unparsable or zero.  Only the integer
    /// part counts; text is read up to its first non-digit.
    pub fn requested(&self) -> Option<i64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Float(f) if f.is_finite() => f.trunc() as i64,
            Self::Float(_) => return None,
            Self::Text(s) => leading_integer(s)?,
        };
        (value != 0).then_some(value)
    }
}

/// Signed integer at the start of `raw` (after whitespace), ignoring
/// whatever follows the digits.  Saturates instead of overflowing.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }

    let magnitude = unsigned[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Theme / styling configuration.  One hex color per symbolic tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// `false` disables all escape sequences.
    pub enabled: bool,
    pub text:    String,
    pub accent:  String,
    pub muted:   String,
    pub dim:     String,
    pub success: String,
    pub warning: String,
    pub error:   String,
    /// Extra tags, e.g. `palette.git = "#f38ba8"`.
    pub palette: HashMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text:    "#cdd6f4".to_string(), // Catppuccin Mocha text
            accent:  "#cba6f7".to_string(), // Catppuccin Mocha mauve
            muted:   "#a6adc8".to_string(), // Catppuccin Mocha subtext0
            dim:     "#6c7086".to_string(), // Catppuccin Mocha overlay0
            success: "#a6e3a1".to_string(), // Catppuccin Mocha green
            warning: "#f9e2af".to_string(), // Catppuccin Mocha yellow
            error:   "#f38ba8".to_string(), // Catppuccin Mocha red
            palette: HashMap::new(),
        }
    }
}
