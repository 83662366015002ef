use crate::surface::Surface;
use powerbar_config::{definitions, load as load_config, SegmentOption, SettingDefinition, Settings};
use powerbar_core::{
    event::{self, SegmentRegistration},
    Emitter, Event, Producer, SegmentStore, SegmentUpdate, StoreChange,
};
use powerbar_renderer::{render_bar, BarLayout};
use powerbar_theme::Theme;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// How the host is set up from the command line.
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    /// Config file; `None` keeps the built-in defaults.
    pub config_path: Option<PathBuf>,
    /// Fixed width, overriding resize events and the surface.
    pub width: Option<usize>,
    /// Never emit color escapes.
    pub no_color: bool,
}

/// Owns the segment store and draws it onto a [`Surface`].
///
/// Consumes `powerbar:update` and `powerbar:register-segment` from the
/// producers and re-renders after every change while a session is active.
pub struct Powerbar<S> {
    surface:  S,
    options:  HostOptions,
    store:    SegmentStore,
    catalog:  Vec<SegmentOption>,
    settings: Settings,
    layout:   BarLayout,
    theme:    Theme,
    /// Width from the last `resize` event.
    resized:  Option<usize>,
    /// Between `session_start` and `session_shutdown`.
    attached: bool,
}

impl<S: Surface> Powerbar<S> {
    pub fn new(surface: S, options: HostOptions) -> Self {
        let settings = Settings::default();
        let mut host = Self {
            surface,
            layout: BarLayout::from_settings(&settings),
            settings,
            theme: Theme::plain(),
            options,
            store: SegmentStore::new(),
            catalog: Vec::new(),
            resized: None,
            attached: false,
        };
        host.apply_theme(Theme::default());
        host.reload_settings();
        host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Registered segments, in first-registration order.
    pub fn catalog(&self) -> &[SegmentOption] {
        &self.catalog
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Settings manifest for configuration surfaces.
    pub fn settings_definitions(&self) -> Vec<SettingDefinition> {
        definitions(&self.catalog)
    }

    /// Columns the next render will fill.
    pub fn width(&self) -> usize {
        self.options
            .width
            .or(self.resized)
            .unwrap_or_else(|| self.surface.width())
    }

    /// Render the store and show it, if a session is active.
    pub fn refresh(&mut self) {
        if !self.attached {
            return;
        }
        let line = render_bar(&self.store, &self.layout, &self.theme, self.width());
        if let Err(e) = self.surface.show(&line, self.settings.placement) {
            warn!("Cannot draw bar: {e}");
        }
    }

    /// Re-read the config file.  A file that fails to load leaves the
    /// current settings in place.
    pub fn reload_settings(&mut self) {
        let Some(path) = self.options.config_path.clone() else {
            return;
        };
        match load_config(&path) {
            Ok(cfg) => {
                self.settings = Settings::from_config(&cfg);
                self.layout = BarLayout::from_settings(&self.settings);
                self.apply_theme(Theme::from_config(&cfg.theme));
                debug!("Settings loaded from '{}'", path.display());
            }
            Err(e) => warn!("Keeping previous settings: {e}"),
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = if self.options.no_color { theme.disabled() } else { theme };
    }

    fn register(&mut self, registration: &SegmentRegistration) {
        debug!("Segment registered: {} ({})", registration.id, registration.label);
        match self.catalog.iter_mut().find(|o| o.id == registration.id) {
            Some(option) => option.label.clone_from(&registration.label),
            None => self.catalog.push(SegmentOption::from(registration)),
        }
    }

    fn update(&mut self, update: &SegmentUpdate) {
        match self.store.apply(update) {
            StoreChange::Set => debug!("Segment set: {}", update.id),
            StoreChange::Removed => debug!("Segment removed: {}", update.id),
            StoreChange::Unchanged => return,
        }
        self.refresh();
    }

    fn shutdown(&mut self) {
        info!("Session ended");
        if let Err(e) = self.surface.clear() {
            warn!("Cannot clear bar: {e}");
        }
        self.store.clear();
        self.attached = false;
    }
}

impl<S: Surface> Producer for Powerbar<S> {
    fn id(&self) -> &str {
        "host"
    }

    fn subscriptions(&self) -> &'static [&'static str] {
        &[
            event::UPDATE,
            event::REGISTER_SEGMENT,
            event::SESSION_START,
            event::SESSION_SWITCH,
            event::SESSION_SHUTDOWN,
            event::RESIZE,
            event::CONFIG_RELOADED,
        ]
    }

    fn handle(&mut self, event: &Event, _out: &mut Emitter<Event>) {
        match event {
            Event::Update(update) => self.update(update),
            Event::RegisterSegment(registration) => self.register(registration),
            Event::SessionStart(_) | Event::SessionSwitch(_) => {
                info!("Session {}", if self.attached { "switched" } else { "started" });
                self.reload_settings();
                self.attached = true;
                self.refresh();
            }
            Event::SessionShutdown => self.shutdown(),
            Event::Resize { columns } => {
                self.resized = Some(*columns);
                self.refresh();
            }
            Event::ConfigReloaded => {
                info!("Config reloaded");
                self.reload_settings();
                self.refresh();
            }
            _ => {}
        }
    }
}
