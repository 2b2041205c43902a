//! MenuController: the mobile overlay's open/closed state.

use crate::error::NavError;
use crate::host::DocumentHost;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MenuState {
    pub open: bool,
}

#[derive(Debug, Clone)]
pub struct MenuController {
    state: MenuState,
    overlay_id: String,
    show_class: String,
    hidden_class: String,
}

impl MenuController {
    pub fn new(
        overlay_id: impl Into<String>,
        show_class: impl Into<String>,
        hidden_class: impl Into<String>,
    ) -> Self {
        Self {
            state: MenuState::default(),
            overlay_id: overlay_id.into(),
            show_class: show_class.into(),
            hidden_class: hidden_class.into(),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Show the overlay. Returns `false` if it was already open.
    pub fn open<H: DocumentHost + ?Sized>(&mut self, host: &mut H) -> Result<bool, NavError> {
        self.transition(host, true)
    }

    /// Hide the overlay. Returns `false` if it was already closed.
    pub fn close<H: DocumentHost + ?Sized>(&mut self, host: &mut H) -> Result<bool, NavError> {
        self.transition(host, false)
    }

    fn transition<H: DocumentHost + ?Sized>(&mut self, host: &mut H, open: bool) -> Result<bool, NavError> {
        if self.state.open == open {
            return Ok(false);
        }
        if !host.has_element(&self.overlay_id) {
            return Err(NavError::MissingElement(format!("#{}", self.overlay_id)));
        }

        host.set_class(&self.overlay_id, &self.hidden_class, !open)?;
        host.set_class(&self.overlay_id, &self.show_class, open)?;
        self.state.open = open;
        debug!("[MenuController] Overlay {}", if open { "opened" } else { "closed" });
        Ok(true)
    }
}
