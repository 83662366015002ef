use crate::{
    bus::{Emitter, EventBus, HandlerId},
    event::{Event, SegmentRegistration},
};
use std::cell::RefCell;
use std::rc::Rc;

/// Every segment producer (and the host that consumes their updates)
/// implements this trait.
///
/// Producers are purely reactive: they receive events from the bus and may
/// emit follow-up events, usually `powerbar:update`.  They never read the
/// segment store back.
pub trait Producer {
    /// Short identifier used in logs, e.g. `"git"`.
    fn id(&self) -> &str;

    /// Segments this producer fills in, announced once on installation.
    fn registrations(&self) -> Vec<SegmentRegistration> {
        Vec::new()
    }

    /// Event names this producer wants to receive.
    fn subscriptions(&self) -> &'static [&'static str];

    fn handle(&mut self, event: &Event, out: &mut Emitter<Event>);
}

/// Subscribe `producer` to its events and announce its segments.
///
/// The producer is shared with the bus through `Rc<RefCell<_>>`; dispatch
/// never re-enters a handler, so the borrow is never contended.
pub fn install<P>(bus: &mut EventBus<Event>, producer: Rc<RefCell<P>>) -> Vec<HandlerId>
where
    P: Producer + 'static,
{
    let (name, subscriptions, registrations) = {
        let p = producer.borrow();
        (p.id().to_string(), p.subscriptions(), p.registrations())
    };

    let handles = subscriptions
        .iter()
        .map(|event| {
            let producer = Rc::clone(&producer);
            bus.on(*event, move |e: &Event, out: &mut Emitter<Event>| {
                producer.borrow_mut().handle(e, out);
            })
        })
        .collect();

    tracing::debug!("installed producer '{name}' ({} subscriptions)", subscriptions.len());

    for registration in registrations {
        bus.emit(Event::RegisterSegment(registration));
    }

    handles
}
