use crate::severity_color;
use powerbar_core::{
    event::{self, SegmentRegistration},
    Emitter, Event, Producer, SegmentUpdate,
};

pub const SEGMENT_ID: &str = "context-usage";

/// Shows context window usage as a progress bar with a percentage.
#[derive(Debug, Default)]
pub struct ContextProducer;

impl ContextProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for ContextProducer {
    fn id(&self) -> &str {
        "context"
    }

    fn registrations(&self) -> Vec<SegmentRegistration> {
        vec![SegmentRegistration::new(SEGMENT_ID, "Context Usage")]
    }

    fn subscriptions(&self) -> &'static [&'static str] {
        &[event::TURN_END]
    }

    fn handle(&mut self, event: &Event, out: &mut Emitter<Event>) {
        let Event::TurnEnd(ctx) = event else {
            return;
        };
        let Some(usage) = ctx.context.filter(|u| u.context_window > 0) else {
            return;
        };

        let pct = (usage.tokens as f64 / usage.context_window as f64 * 100.0).round();
        out.emit(Event::Update(
            SegmentUpdate::new(SEGMENT_ID)
                .text("")
                .suffix(format!("{pct}%"))
                .bar(pct)
                .color(severity_color(pct, "accent")),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::updates;
    use powerbar_core::event::{ContextUsage, HostContext};

    fn turn(tokens: u64, context_window: u64) -> Event {
        Event::TurnEnd(HostContext {
            context: Some(ContextUsage { tokens, context_window }),
            ..HostContext::default()
        })
    }

    #[test]
    fn reports_rounded_percentage() {
        let emitted = updates(&mut ContextProducer::new(), turn(59_400, 100_000));
        assert_eq!(
            emitted,
            vec![SegmentUpdate::new(SEGMENT_ID).text("").suffix("59%").bar(59.0).color("accent")]
        );
    }

    #[test]
    fn color_follows_severity() {
        let color = |tokens| updates(&mut ContextProducer::new(), turn(tokens, 1_000))[0].color.clone();
        assert_eq!(color(600).as_deref(), Some("accent"));
        assert_eq!(color(700).as_deref(), Some("warning"));
        assert_eq!(color(950).as_deref(), Some("error"));
    }

    #[test]
    fn ignores_turns_without_context() {
        assert!(updates(&mut ContextProducer::new(), Event::TurnEnd(HostContext::default())).is_empty());
        assert!(updates(&mut ContextProducer::new(), turn(10, 0)).is_empty());
    }
}
