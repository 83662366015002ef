//! Terminal host for powerbar.
//!
//! Wires the event bus, the segment producers and the config watcher into a
//! single dispatch loop:
//! - host events are read as JSON lines from stdin
//! - config file changes arrive as `config_reloaded`
//! - every store change is rendered as one line on stdout

pub mod host;
pub mod surface;

pub use host::{HostOptions, Powerbar};
pub use surface::{terminal_width, LineSurface, Surface};

use powerbar_config::ConfigWatcher;
use powerbar_core::{install, Event, EventBus, PowerbarError, Result};
use powerbar_ipc::spawn_listener;
use powerbar_producers::{
    ContextProducer, GitProducer, ModelProducer, ProviderProducer, SubProducer, TokensProducer,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// Install the host, then every built-in producer, on `bus`.
///
/// The host goes first so it sees each session event before the producers
/// publish their updates for it.
pub fn install_all<S>(bus: &mut EventBus<Event>, host: Rc<RefCell<Powerbar<S>>>)
where
    S: Surface + 'static,
{
    install(bus, host);
    install(bus, Rc::new(RefCell::new(GitProducer::new())));
    install(bus, Rc::new(RefCell::new(TokensProducer::new())));
    install(bus, Rc::new(RefCell::new(ContextProducer::new())));
    install(bus, Rc::new(RefCell::new(ModelProducer::new())));
    install(bus, Rc::new(RefCell::new(ProviderProducer::new())));
    install(bus, Rc::new(RefCell::new(SubProducer::new())));
}

/// Settings definitions, with the built-in segment catalog, as pretty JSON.
pub fn settings_json(options: HostOptions) -> Result<String> {
    let mut bus = EventBus::new();
    let host = Rc::new(RefCell::new(Powerbar::new(LineSurface::stdout(), options)));
    install_all(&mut bus, Rc::clone(&host));

    let definitions = host.borrow().settings_definitions();
    serde_json::to_string_pretty(&definitions)
        .map_err(|e| PowerbarError::Protocol(format!("cannot encode settings: {e}")))
}

/// Run until stdin closes.  Must be called from within a Tokio runtime.
pub async fn run(options: HostOptions) -> Result<()> {
    let mut bus = EventBus::new();
    let host = Rc::new(RefCell::new(Powerbar::new(LineSurface::stdout(), options.clone())));
    install_all(&mut bus, host);

    let mut events = spawn_listener(tokio::io::stdin());
    let (_watcher, mut config_changes) = match &options.config_path {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::spawn(path);
            (Some(watcher), rx)
        }
        None => (None, tokio::sync::mpsc::channel::<()>(1).1),
    };

    info!("Waiting for host events on stdin");
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(Event::Unknown(_)) => {}
                Some(event) => {
                    bus.emit(event);
                }
                None => break,
            },
            Some(()) = config_changes.recv() => {
                bus.emit(Event::ConfigReloaded);
            }
        }
    }

    info!("Host event stream closed; exiting");
    Ok(())
}
