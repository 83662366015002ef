use crate::severity_color;
use powerbar_core::{
    event::{self, RateWindow, SegmentRegistration, UsageSnapshot},
    Emitter, Event, Producer, SegmentUpdate,
};

pub const HOURLY_ID: &str = "sub-hourly";
pub const WEEKLY_ID: &str = "sub-weekly";

/// Shows subscription rate-limit windows reported by the usage tracker.
///
/// The first window goes to `sub-hourly`, the second to `sub-weekly`.
#[derive(Debug, Default)]
pub struct SubProducer;

impl SubProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for SubProducer {
    fn id(&self) -> &str {
        "sub"
    }

    fn registrations(&self) -> Vec<SegmentRegistration> {
        vec![
            SegmentRegistration::new(HOURLY_ID, "Sub Hourly"),
            SegmentRegistration::new(WEEKLY_ID, "Sub Weekly"),
        ]
    }

    fn subscriptions(&self) -> &'static [&'static str] {
        &[
            event::SUB_CORE_READY,
            event::SUB_CORE_UPDATE_CURRENT,
            event::SUB_CORE_UPDATE_ALL,
        ]
    }

    fn handle(&mut self, event: &Event, out: &mut Emitter<Event>) {
        let usage = match event {
            Event::SubCoreReady(payload) | Event::SubCoreUpdateCurrent(payload) => {
                payload.state.as_ref().and_then(|s| s.usage.as_ref())
            }
            Event::SubCoreUpdateAll(payload) => {
                payload.state.as_ref().and_then(|s| s.current_usage())
            }
            _ => return,
        };
        emit_windows(usage, out);
    }
}

fn emit_windows(usage: Option<&UsageSnapshot>, out: &mut Emitter<Event>) {
    let windows = usage.map_or(&[][..], |u| u.windows.as_slice());
    for (index, id) in [HOURLY_ID, WEEKLY_ID].into_iter().enumerate() {
        let update = match windows.get(index) {
            Some(window) => window_update(id, window),
            None => SegmentUpdate::clear(id),
        };
        out.emit(Event::Update(update));
    }
}

fn window_update(id: &str, window: &RateWindow) -> SegmentUpdate {
    let text = [window.label.as_deref(), window.reset_description.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let pct = window.used_percent.round();

    SegmentUpdate::new(id)
        .text(text)
        .suffix(format!("{pct}%"))
        .bar(pct)
        .color(severity_color(pct, "muted"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::updates;
    use powerbar_core::event::{
        ProviderUsage, SubCoreAllPayload, SubCoreAllState, SubCorePayload, SubCoreState,
    };

    fn window(label: &str, pct: f64, reset: &str) -> RateWindow {
        RateWindow {
            label: Some(label.into()),
            used_percent: pct,
            reset_description: Some(reset.into()),
        }
    }

    fn ready(windows: Vec<RateWindow>) -> Event {
        Event::SubCoreReady(SubCorePayload {
            state: Some(SubCoreState {
                usage: Some(UsageSnapshot { windows }),
            }),
        })
    }

    #[test]
    fn two_windows_fill_both_segments() {
        let emitted = updates(
            &mut SubProducer::new(),
            ready(vec![window("5h", 42.0, "2h10m"), window("7d", 85.0, "3d")]),
        );
        assert_eq!(
            emitted,
            vec![
                SegmentUpdate::new(HOURLY_ID).text("5h 2h10m").suffix("42%").bar(42.0).color("muted"),
                SegmentUpdate::new(WEEKLY_ID).text("7d 3d").suffix("85%").bar(85.0).color("error"),
            ]
        );
    }

    #[test]
    fn missing_window_clears_its_segment() {
        let emitted = updates(&mut SubProducer::new(), ready(vec![window("5h", 65.0, "")]));
        assert_eq!(emitted[0].text.as_deref(), Some("5h"));
        assert_eq!(emitted[0].color.as_deref(), Some("warning"));
        assert_eq!(emitted[1], SegmentUpdate::clear(WEEKLY_ID));
    }

    #[test]
    fn percentage_is_rounded_before_bar_and_color() {
        let emitted = updates(&mut SubProducer::new(), ready(vec![window("5h", 80.4, "1h")]));
        assert_eq!(emitted[0].suffix.as_deref(), Some("80%"));
        assert_eq!(emitted[0].bar, Some(80.0));
        assert_eq!(emitted[0].color.as_deref(), Some("warning"));

        let emitted = updates(&mut SubProducer::new(), ready(vec![window("5h", 80.6, "1h")]));
        assert_eq!(emitted[0].suffix.as_deref(), Some("81%"));
        assert_eq!(emitted[0].color.as_deref(), Some("error"));
    }

    #[test]
    fn no_usage_clears_both() {
        let cleared = vec![SegmentUpdate::clear(HOURLY_ID), SegmentUpdate::clear(WEEKLY_ID)];
        assert_eq!(updates(&mut SubProducer::new(), ready(Vec::new())), cleared);

        let empty = Event::SubCoreUpdateCurrent(SubCorePayload::default());
        assert_eq!(updates(&mut SubProducer::new(), empty), cleared);
    }

    #[test]
    fn update_all_uses_current_provider() {
        let entry = |provider: &str, pct| ProviderUsage {
            provider: provider.into(),
            usage: Some(UsageSnapshot {
                windows: vec![window("5h", pct, "1h")],
            }),
        };
        let event = Event::SubCoreUpdateAll(SubCoreAllPayload {
            state: Some(SubCoreAllState {
                provider: Some("openai".into()),
                entries: vec![entry("anthropic", 10.0), entry("openai", 30.0)],
            }),
        });

        let emitted = updates(&mut SubProducer::new(), event);
        assert_eq!(emitted[0].bar, Some(30.0));
        assert_eq!(emitted[1], SegmentUpdate::clear(WEEKLY_ID));
    }
}
