use crate::state::SegmentUpdate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Event names ───────────────────────────────────────────────────────────────

pub const UPDATE: &str = "powerbar:update";
pub const REGISTER_SEGMENT: &str = "powerbar:register-segment";
pub const SESSION_START: &str = "session_start";
pub const SESSION_SWITCH: &str = "session_switch";
pub const SESSION_SHUTDOWN: &str = "session_shutdown";
pub const TURN_START: &str = "turn_start";
pub const TURN_END: &str = "turn_end";
pub const MODEL_SELECT: &str = "model_select";
pub const TOOL_RESULT: &str = "tool_result";
pub const SUB_CORE_READY: &str = "sub-core:ready";
pub const SUB_CORE_UPDATE_CURRENT: &str = "sub-core:update-current";
pub const SUB_CORE_UPDATE_ALL: &str = "sub-core:update-all";
pub const RESIZE: &str = "resize";
pub const CONFIG_RELOADED: &str = "config_reloaded";
pub const UNKNOWN: &str = "unknown";

/// Everything that can flow over the event bus.
///
/// Sources:
/// - the host application (stdin)  → session, turn, model and tool events
/// - sub-core usage tracker         → `SubCore*`
/// - producers                      → `Update`, `RegisterSegment`
/// - config watcher task            → `ConfigReloaded`
///
/// On the wire every event is a JSON object tagged by its `event` name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    // ── Powerbar ──────────────────────────────────────────────────────────────
    /// Insert, replace or remove a segment.
    #[serde(rename = "powerbar:update")]
    Update(SegmentUpdate),
    /// A producer announces a segment id with a human-readable label.
    #[serde(rename = "powerbar:register-segment")]
    RegisterSegment(SegmentRegistration),

    // ── Host lifecycle ────────────────────────────────────────────────────────
    #[serde(rename = "session_start")]
    SessionStart(HostContext),
    #[serde(rename = "session_switch")]
    SessionSwitch(HostContext),
    #[serde(rename = "session_shutdown")]
    SessionShutdown,
    #[serde(rename = "turn_start")]
    TurnStart(HostContext),
    #[serde(rename = "turn_end")]
    TurnEnd(HostContext),
    #[serde(rename = "model_select")]
    ModelSelect(HostContext),
    #[serde(rename = "tool_result")]
    ToolResult(ToolResult),

    // ── Subscription usage ────────────────────────────────────────────────────
    #[serde(rename = "sub-core:ready")]
    SubCoreReady(SubCorePayload),
    #[serde(rename = "sub-core:update-current")]
    SubCoreUpdateCurrent(SubCorePayload),
    #[serde(rename = "sub-core:update-all")]
    SubCoreUpdateAll(SubCoreAllPayload),

    // ── Display ───────────────────────────────────────────────────────────────
    /// The display surface changed size.
    #[serde(rename = "resize")]
    Resize { columns: usize },

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Config file changed on disk.
    #[serde(skip)]
    ConfigReloaded,
    /// A line we could not decode; carries the raw text for debugging.
    #[serde(skip)]
    Unknown(String),
}

impl Event {
    /// Name handlers subscribe to on the [`EventBus`](crate::bus::EventBus).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Update(_) => UPDATE,
            Self::RegisterSegment(_) => REGISTER_SEGMENT,
            Self::SessionStart(_) => SESSION_START,
            Self::SessionSwitch(_) => SESSION_SWITCH,
            Self::SessionShutdown => SESSION_SHUTDOWN,
            Self::TurnStart(_) => TURN_START,
            Self::TurnEnd(_) => TURN_END,
            Self::ModelSelect(_) => MODEL_SELECT,
            Self::ToolResult(_) => TOOL_RESULT,
            Self::SubCoreReady(_) => SUB_CORE_READY,
            Self::SubCoreUpdateCurrent(_) => SUB_CORE_UPDATE_CURRENT,
            Self::SubCoreUpdateAll(_) => SUB_CORE_UPDATE_ALL,
            Self::Resize { .. } => RESIZE,
            Self::ConfigReloaded => CONFIG_RELOADED,
            Self::Unknown(_) => UNKNOWN,
        }
    }
}

/// `(id, label)` pair used by configuration surfaces to list segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRegistration {
    pub id: String,
    pub label: String,
}

impl SegmentRegistration {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Snapshot of the host application attached to lifecycle events.
///
/// Every field is optional; producers pick what they need.  Payload keys are
/// camelCase as the host sends them; snake_case spellings are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostContext {
    /// Working directory of the session.
    pub cwd: Option<PathBuf>,
    /// Currently selected model.
    pub model: Option<ModelInfo>,
    /// Thinking level of reasoning models (`"off"`, `"low"`, `"high"`, …).
    #[serde(alias = "thinking_level")]
    pub thinking_level: Option<String>,
    /// Token usage of the assistant messages of the finished turn.
    pub usage: Option<TokenUsage>,
    /// Context window fill after the finished turn.
    pub context: Option<ContextUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: String,
    pub provider: String,
    /// Whether the model supports a thinking level.
    pub reasoning: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
    /// Total cost in dollars.
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextUsage {
    pub tokens: u64,
    #[serde(alias = "context_window")]
    pub context_window: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolResult {
    #[serde(alias = "tool_name")]
    pub tool_name: String,
    pub cwd: Option<PathBuf>,
}

/// One rate-limit window reported by the subscription tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RateWindow {
    pub label: Option<String>,
    #[serde(alias = "used_percent")]
    pub used_percent: f64,
    #[serde(alias = "reset_description")]
    pub reset_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub windows: Vec<RateWindow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubCoreState {
    pub usage: Option<UsageSnapshot>,
}

/// Payload of `sub-core:ready` / `sub-core:update-current`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubCorePayload {
    pub state: Option<SubCoreState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderUsage {
    pub provider: String,
    pub usage: Option<UsageSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubCoreAllState {
    /// Provider currently in use, if known.
    pub provider: Option<String>,
    pub entries: Vec<ProviderUsage>,
}

/// Payload of `sub-core:update-all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubCoreAllPayload {
    pub state: Option<SubCoreAllState>,
}

impl SubCoreAllState {
    /// Usage of the current provider, or of the first entry when no provider
    /// is selected.
    pub fn current_usage(&self) -> Option<&UsageSnapshot> {
        let entry = match self.provider.as_deref() {
            Some(provider) => self.entries.iter().find(|e| e.provider == provider),
            None => self.entries.first(),
        };
        entry.and_then(|e| e.usage.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_event_from_json() {
        let event: Event =
            serde_json::from_str(r#"{"event":"powerbar:update","id":"model","text":"gpt-5","color":"dim"}"#)
                .unwrap();
        assert_eq!(event, Event::Update(SegmentUpdate::new("model").text("gpt-5").color("dim")));
        assert_eq!(event.name(), UPDATE);
    }

    #[test]
    fn unit_and_struct_variants_from_json() {
        let shutdown: Event = serde_json::from_str(r#"{"event":"session_shutdown"}"#).unwrap();
        assert_eq!(shutdown, Event::SessionShutdown);

        let resize: Event = serde_json::from_str(r#"{"event":"resize","columns":120}"#).unwrap();
        assert_eq!(resize, Event::Resize { columns: 120 });
    }

    #[test]
    fn context_fields_are_optional() {
        let event: Event = serde_json::from_str(r#"{"event":"turn_end"}"#).unwrap();
        assert_eq!(event, Event::TurnEnd(HostContext::default()));
    }

    #[test]
    fn payloads_use_host_key_names() {
        let event: Event = serde_json::from_str(
            r#"{"event":"sub-core:ready","state":{"usage":{"windows":[{"label":"5h","usedPercent":90,"resetDescription":"1h"}]}}}"#,
        )
        .unwrap();
        let Event::SubCoreReady(SubCorePayload { state: Some(SubCoreState { usage: Some(usage) }) }) = event else {
            panic!("wrong shape: {event:?}");
        };
        assert_eq!(usage.windows[0].used_percent, 90.0);
        assert_eq!(usage.windows[0].reset_description.as_deref(), Some("1h"));

        let event: Event =
            serde_json::from_str(r#"{"event":"turn_end","context":{"tokens":500,"contextWindow":1000}}"#).unwrap();
        let Event::TurnEnd(ctx) = event else { panic!("wrong variant") };
        assert_eq!(ctx.context, Some(ContextUsage { tokens: 500, context_window: 1000 }));

        let event: Event =
            serde_json::from_str(r#"{"event":"tool_result","toolName":"bash","cwd":"/tmp"}"#).unwrap();
        let Event::ToolResult(result) = event else { panic!("wrong variant") };
        assert_eq!(result.tool_name, "bash");

        let event: Event = serde_json::from_str(r#"{"event":"model_select","thinkingLevel":"high"}"#).unwrap();
        let Event::ModelSelect(ctx) = event else { panic!("wrong variant") };
        assert_eq!(ctx.thinking_level.as_deref(), Some("high"));
    }

    #[test]
    fn snake_case_keys_are_still_accepted() {
        let event: Event =
            serde_json::from_str(r#"{"event":"tool_result","tool_name":"bash"}"#).unwrap();
        assert_eq!(event, Event::ToolResult(ToolResult { tool_name: "bash".into(), cwd: None }));
    }

    #[test]
    fn current_usage_prefers_selected_provider() {
        let snapshot = |pct: f64| UsageSnapshot {
            windows: vec![RateWindow {
                used_percent: pct,
                ..RateWindow::default()
            }],
        };
        let mut state = SubCoreAllState {
            provider: Some("openai".into()),
            entries: vec![
                ProviderUsage { provider: "anthropic".into(), usage: Some(snapshot(10.0)) },
                ProviderUsage { provider: "openai".into(), usage: Some(snapshot(70.0)) },
            ],
        };
        assert_eq!(state.current_usage().unwrap().windows[0].used_percent, 70.0);

        state.provider = None;
        assert_eq!(state.current_usage().unwrap().windows[0].used_percent, 10.0);

        state.provider = Some("gemini".into());
        assert!(state.current_usage().is_none());
    }
}
