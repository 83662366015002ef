use powerbar_core::{
    event::{self, SegmentRegistration, TokenUsage},
    Emitter, Event, Producer, SegmentUpdate,
};

pub const SEGMENT_ID: &str = "tokens";

/// Shows cumulative token counts and cost for the session, e.g.
/// `↑1.2k ↓300 $0.05`.
#[derive(Debug, Default)]
pub struct TokensProducer {
    totals: TokenUsage,
}

impl TokensProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self) -> TokenUsage {
        self.totals
    }
}

impl Producer for TokensProducer {
    fn id(&self) -> &str {
        "tokens"
    }

    fn registrations(&self) -> Vec<SegmentRegistration> {
        vec![SegmentRegistration::new(SEGMENT_ID, "Tokens")]
    }

    fn subscriptions(&self) -> &'static [&'static str] {
        &[event::SESSION_START, event::SESSION_SWITCH, event::TURN_END]
    }

    fn handle(&mut self, event: &Event, out: &mut Emitter<Event>) {
        match event {
            Event::SessionStart(_) | Event::SessionSwitch(_) => {
                self.totals = TokenUsage::default();
                out.emit(Event::Update(SegmentUpdate::clear(SEGMENT_ID)));
            }
            Event::TurnEnd(ctx) => {
                if let Some(usage) = ctx.usage {
                    self.totals.input += usage.input;
                    self.totals.output += usage.output;
                    self.totals.cost += usage.cost;
                }
                if let Some(text) = summary(&self.totals) {
                    out.emit(Event::Update(SegmentUpdate::new(SEGMENT_ID).text(text).color("dim")));
                }
            }
            _ => {}
        }
    }
}

/// `↑in ↓out [$cost]`, or `None` before any tokens were used.
fn summary(totals: &TokenUsage) -> Option<String> {
    if totals.input == 0 && totals.output == 0 {
        return None;
    }

    let mut parts = vec![
        format!("↑{}", format_tokens(totals.input)),
        format!("↓{}", format_tokens(totals.output)),
    ];
    if totals.cost > 0.0 {
        parts.push(format!("${:.2}", totals.cost));
    }
    Some(parts.join(" "))
}

/// Compact token count: `999`, `1.2k`, `12k`, `1.2M`, `12M`.
pub fn format_tokens(count: u64) -> String {
    let n = count as f64;
    match count {
        0..=999 => count.to_string(),
        1_000..=9_999 => format!("{:.1}k", n / 1e3),
        10_000..=999_999 => format!("{}k", (n / 1e3).round()),
        1_000_000..=9_999_999 => format!("{:.1}M", n / 1e6),
        _ => format!("{}M", (n / 1e6).round()),
    }
}
