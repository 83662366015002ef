use crate::event::Event;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Upper bound on events dispatched by a single [`EventBus::emit`] call,
/// follow-ups included.  Stops handlers that keep re-emitting each other.
const MAX_DISPATCH: usize = 10_000;

/// Anything that can travel over an [`EventBus`].
pub trait BusEvent {
    fn name(&self) -> &str;
}

impl BusEvent for Event {
    fn name(&self) -> &str {
        Event::name(self)
    }
}

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Collects events emitted from inside a handler.
///
/// They are dispatched once every handler of the current event has run.
#[derive(Debug)]
pub struct Emitter<E> {
    queue: VecDeque<E>,
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<E> Emitter<E> {
    pub fn emit(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Events emitted so far, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

type Handler<E> = Box<dyn FnMut(&E, &mut Emitter<E>)>;

/// Synchronous publish/subscribe dispatcher.
///
/// Handlers subscribe to an event name and run in registration order.  All
/// dispatch happens on the caller's thread; nothing is buffered between
/// calls to [`emit`](Self::emit).
pub struct EventBus<E> {
    handlers: HashMap<String, Vec<(HandlerId, Handler<E>)>>,
    next_id: u64,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.iter().map(|(k, v)| (k.as_str(), v.len())).collect();
        names.sort_unstable();
        f.debug_struct("EventBus").field("handlers", &names).finish()
    }
}

impl<E: BusEvent> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to events called `name`.
    pub fn on<F>(&mut self, name: impl Into<String>, handler: F) -> HandlerId
    where
        F: FnMut(&E, &mut Emitter<E>) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(name.into())
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove a handler.  Returns `false` if it was not subscribed.
    pub fn off(&mut self, id: HandlerId) -> bool {
        for list in self.handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(h, _)| *h == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn handler_count(&self, name: &str) -> usize {
        self.handlers.get(name).map_or(0, Vec::len)
    }

    /// Dispatch `event` and everything its handlers emit, breadth-first.
    ///
    /// Returns the number of events dispatched.
    pub fn emit(&mut self, event: E) -> usize {
        let mut queue = VecDeque::from([event]);
        let mut dispatched = 0;

        while let Some(event) = queue.pop_front() {
            if dispatched == MAX_DISPATCH {
                tracing::warn!(
                    "event bus dropped {} queued event(s) after {MAX_DISPATCH} dispatches",
                    queue.len() + 1
                );
                break;
            }
            dispatched += 1;

            let Some(list) = self.handlers.get_mut(event.name()) else {
                tracing::trace!("no handlers for '{}'", event.name());
                continue;
            };

            let mut out = Emitter::default();
            for (_, handler) in list.iter_mut() {
                handler(&event, &mut out);
            }
            queue.extend(out.drain());
        }

        dispatched
    }
}
