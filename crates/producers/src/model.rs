use powerbar_core::{
    event::{self, HostContext, SegmentRegistration},
    Emitter, Event, Producer, SegmentUpdate,
};

pub const SEGMENT_ID: &str = "model";

/// Shows the active model, with its thinking level for reasoning models:
/// `claude-sonnet · high`.
#[derive(Debug, Default)]
pub struct ModelProducer;

impl ModelProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for ModelProducer {
    fn id(&self) -> &str {
        "model"
    }

    fn registrations(&self) -> Vec<SegmentRegistration> {
        vec![SegmentRegistration::new(SEGMENT_ID, "Model")]
    }

    fn subscriptions(&self) -> &'static [&'static str] {
        &[
            event::SESSION_START,
            event::SESSION_SWITCH,
            event::MODEL_SELECT,
            event::TURN_START,
        ]
    }

    fn handle(&mut self, event: &Event, out: &mut Emitter<Event>) {
        let ctx = match event {
            Event::SessionStart(ctx)
            | Event::SessionSwitch(ctx)
            | Event::ModelSelect(ctx)
            | Event::TurnStart(ctx) => ctx,
            _ => return,
        };
        if let Some(text) = model_label(ctx) {
            out.emit(Event::Update(SegmentUpdate::new(SEGMENT_ID).text(text).color("dim")));
        }
    }
}

fn model_label(ctx: &HostContext) -> Option<String> {
    let model = ctx.model.as_ref()?;
    if !model.reasoning {
        return Some(model.id.clone());
    }
    let level = ctx.thinking_level.as_deref().unwrap_or("off");
    Some(format!("{} · {level}", model.id))
}
