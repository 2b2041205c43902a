//! NavController: single owner of the navbar state.
//!
//! Holds the registry, the rendered surfaces, the menu state and the host
//! document. Components receive what they need as explicit arguments; there
//! is no module-level state.

use crate::config::NavConfig;
use crate::error::NavError;
use crate::host::{DocumentHost, NavEvent, ScrollRequest};
use crate::menu::{MenuController, MenuState};
use crate::navigator::ScrollNavigator;
use crate::registry::SectionRegistry;
use crate::surface::{EntryAction, NavBuilder, NavEntry, NavSurface, SurfaceKind};
use crate::tracker::{ActiveTracker, RefreshReport};
use log::{error, info, warn};
use serde::Serialize;

// =============================================================================
// Reports
// =============================================================================

/// What `init()` managed to build
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitReport {
    pub sections: usize,
    pub surfaces_built: Vec<SurfaceKind>,
    /// Surfaces that could not be built, with the reason
    pub surfaces_failed: Vec<(SurfaceKind, String)>,
    pub menu_bound: bool,
}

/// Serializable view of the current navbar state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSnapshot {
    pub menu_open: bool,
    pub sections: Vec<String>,
    pub active: Vec<String>,
    pub surfaces: Vec<NavSurface>,
}

// =============================================================================
// NavController
// =============================================================================

pub struct NavController<H: DocumentHost> {
    config: NavConfig,
    host: H,
    registry: Option<SectionRegistry>,
    surfaces: Vec<NavSurface>,
    /// Set once the host routes scroll events; survives a failed `init()`
    scroll_bound: bool,
    menu: MenuController,
    tracker: ActiveTracker,
    navigator: ScrollNavigator,
}

impl<H: DocumentHost> NavController<H> {
    pub fn new(config: NavConfig, host: H) -> Result<Self, NavError> {
        config.validate()?;
        let menu = MenuController::new(
            config.overlay_id.clone(),
            config.show_class.clone(),
            config.hidden_class.clone(),
        );
        let tracker = ActiveTracker::new(config.tolerance, config.active_class.clone());
        let navigator = ScrollNavigator::new(config.scroll_mode());
        Ok(Self {
            config,
            host,
            registry: None,
            surfaces: Vec::new(),
            scroll_bound: false,
            menu,
            tracker,
            navigator,
        })
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_initialized(&self) -> bool {
        self.registry.is_some()
    }

    pub fn registry(&self) -> Option<&SectionRegistry> {
        self.registry.as_ref()
    }

    pub fn surfaces(&self) -> &[NavSurface] {
        &self.surfaces
    }

    pub fn surface(&self, kind: SurfaceKind) -> Option<&NavSurface> {
        self.surfaces.iter().find(|s| s.kind == kind)
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    /// Capture the sections, start listening for scrolls and render both nav
    /// surfaces.
    ///
    /// An empty document is fatal, and so is losing every surface: the first
    /// container error is returned. A single missing container only loses its
    /// own surface; missing menu triggers only lose the overlay wiring.
    /// Nothing is marked initialized on failure, so the call can be retried.
    pub fn init(&mut self) -> Result<InitReport, NavError> {
        if self.registry.is_some() {
            return Err(NavError::AlreadyInitialized);
        }

        let registry = SectionRegistry::discover(&self.host, &self.config.section_selector)?;
        if !self.scroll_bound {
            self.host.bind_scroll(self.config.batch_scroll)?;
            self.scroll_bound = true;
        }

        let mut report = InitReport {
            sections: registry.len(),
            ..InitReport::default()
        };
        let mut first_error = None;

        for kind in SurfaceKind::ALL {
            let container_id = self.config.container_id(kind).to_string();
            match NavBuilder::build_surface(&registry, &container_id, kind, &mut self.host) {
                Ok(surface) => {
                    self.surfaces.push(surface);
                    report.surfaces_built.push(kind);
                }
                Err(e) => {
                    error!("[NavController] Skipping {} surface: {}", kind, e);
                    report.surfaces_failed.push((kind, e.to_string()));
                    first_error.get_or_insert(e);
                }
            }
        }

        if report.surfaces_built.is_empty() {
            if let Some(e) = first_error {
                return Err(e);
            }
        }

        match self
            .host
            .bind_menu_triggers(&self.config.menu_open_selector, &self.config.menu_close_id)
        {
            Ok(()) => report.menu_bound = true,
            Err(e) => warn!("[NavController] Mobile menu disabled: {}", e),
        }

        self.registry = Some(registry);
        if self.config.refresh_on_init {
            self.refresh()?;
        }

        info!(
            "[NavController] Ready: {} sections, surfaces {:?}",
            report.sections, report.surfaces_built
        );
        Ok(report)
    }

    /// Re-evaluate active entries against the current viewport
    pub fn refresh(&mut self) -> Result<RefreshReport, NavError> {
        let registry = self.registry.as_ref().ok_or(NavError::NotInitialized)?;
        Ok(self.tracker.refresh(registry, &mut self.surfaces, &mut self.host))
    }

    pub fn navigate_to(&mut self, section_id: &str) -> Result<ScrollRequest, NavError> {
        let registry = self.registry.as_ref().ok_or(NavError::NotInitialized)?;
        self.navigator.navigate_to(registry, &mut self.host, section_id)
    }

    pub fn open_menu(&mut self) -> Result<bool, NavError> {
        self.menu.open(&mut self.host)
    }

    pub fn close_menu(&mut self) -> Result<bool, NavError> {
        self.menu.close(&mut self.host)
    }

    /// Dispatch one browser event. Failures are logged and returned; they
    /// never leak into later events.
    pub fn handle(&mut self, event: NavEvent) -> Result<(), NavError> {
        let result = match event {
            NavEvent::Scroll => self.refresh().map(|_| ()),
            NavEvent::EntryClicked { surface, section_id } => self.click_entry(surface, &section_id),
            NavEvent::MenuOpen => self.open_menu().map(|_| ()),
            NavEvent::MenuClose => self.close_menu().map(|_| ()),
        };
        if let Err(e) = &result {
            warn!("[NavController] Event failed: {}", e);
        }
        result
    }

    /// Run the clicked entry's actions in order. Each action runs regardless
    /// of how the previous one went; the first failure is reported.
    fn click_entry(&mut self, surface: SurfaceKind, section_id: &str) -> Result<(), NavError> {
        let actions = self
            .surface(surface)
            .and_then(|s| s.entry(section_id))
            .map(|entry| entry.actions.clone())
            .ok_or_else(|| NavError::UnknownSection(section_id.to_string()))?;

        let mut first_err = None;
        for action in actions {
            let outcome = match action {
                EntryAction::Navigate => self.navigate_to(section_id).map(|_| ()),
                EntryAction::CloseMenu => self.close_menu().map(|_| ()),
            };
            if let Err(e) = outcome {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn active_sections(&self) -> Vec<String> {
        let Some(registry) = &self.registry else {
            return Vec::new();
        };
        registry
            .iter()
            .filter(|section| {
                self.surfaces
                    .iter()
                    .filter_map(|s| s.entry(&section.id))
                    .any(|e: &NavEntry| e.active)
            })
            .map(|section| section.id.clone())
            .collect()
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            menu_open: self.menu.is_open(),
            sections: self
                .registry
                .as_ref()
                .map(|r| r.iter().map(|s| s.id.clone()).collect())
                .unwrap_or_default(),
            active: self.active_sections(),
            surfaces: self.surfaces.clone(),
        }
    }
}
