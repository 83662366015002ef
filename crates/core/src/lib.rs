pub mod bus;
pub mod color;
pub mod error;
pub mod event;
pub mod producer;
pub mod state;

pub use bus::{Emitter, EventBus, HandlerId};
pub use color::{ColorResolver, Plain};
pub use error::{PowerbarError, Result};
pub use event::{Event, SegmentRegistration};
pub use producer::{install, Producer};
pub use state::{Segment, SegmentStore, SegmentUpdate, StoreChange};
