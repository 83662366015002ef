use powerbar_core::{
    event::{self, SegmentRegistration},
    Emitter, Event, Producer, SegmentUpdate,
};

pub const SEGMENT_ID: &str = "provider";

/// Shows the provider of the active model.
#[derive(Debug, Default)]
pub struct ProviderProducer;

impl ProviderProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for ProviderProducer {
    fn id(&self) -> &str {
        "provider"
    }

    fn registrations(&self) -> Vec<SegmentRegistration> {
        vec![SegmentRegistration::new(SEGMENT_ID, "Provider")]
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
        let (Event::SessionStart(ctx)
        | Event::SessionSwitch(ctx)
        | Event::ModelSelect(ctx)
        | Event::TurnStart(ctx)) = event
        else {
            return;
        };
        if let Some(model) = &ctx.model {
            out.emit(Event::Update(
                SegmentUpdate::new(SEGMENT_ID).text(model.provider.as_str()).color("dim"),
            ));
        }
    }
}
