//! Configuration types and defaults for SectionNav
//!
//! Defaults match the stock page markup: `#navbar-list`, `#mobile-list`,
//! `#mobile-window`, `.mobile-menu` and `#close-icon`.

use crate::error::NavError;
use crate::geometry::Tolerance;
use crate::host::ScrollMode;
use crate::surface::SurfaceKind;
use serde::{Deserialize, Serialize};

/// SectionNav configuration. Every field may be omitted when loading from
/// JS or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavConfig {
    /// Selector for content sections. Default: `section`
    pub section_selector: String,
    /// Container id of the desktop nav list. Default: `navbar-list`
    pub desktop_container: String,
    /// Container id of the mobile nav list. Default: `mobile-list`
    pub mobile_container: String,
    /// Mobile overlay id. Default: `mobile-window`
    pub overlay_id: String,
    /// Selector of the hamburger trigger. Default: `.mobile-menu`
    pub menu_open_selector: String,
    /// Id of the overlay's close trigger. Default: `close-icon`
    pub menu_close_id: String,
    /// Class marking the active entry. Default: `nav-active`
    pub active_class: String,
    /// Overlay class while open. Default: `show`
    pub show_class: String,
    /// Overlay class while closed. Default: `remove`
    pub hidden_class: String,
    pub tolerance: Tolerance,
    /// Animate scrolls. Default: true
    pub smooth_scroll: bool,
    /// Run one refresh right after the navbar is built. Default: true
    pub refresh_on_init: bool,
    /// Coalesce scroll events to one refresh per animation frame. Default: false
    pub batch_scroll: bool,
    /// Console log level (`off`, `error`, `warn`, `info`, `debug`, `trace`). Default: `warn`
    pub log_level: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            section_selector: "section".to_string(),
            desktop_container: "navbar-list".to_string(),
            mobile_container: "mobile-list".to_string(),
            overlay_id: "mobile-window".to_string(),
            menu_open_selector: ".mobile-menu".to_string(),
            menu_close_id: "close-icon".to_string(),
            active_class: "nav-active".to_string(),
            show_class: "show".to_string(),
            hidden_class: "remove".to_string(),
            tolerance: Tolerance::strict(),
            smooth_scroll: true,
            refresh_on_init: true,
            batch_scroll: false,
            log_level: "warn".to_string(),
        }
    }
}

impl NavConfig {
    /// Sections stay active until they have scrolled 30px past the top
    pub fn lenient() -> Self {
        Self {
            tolerance: Tolerance::lenient(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, NavError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| NavError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn container_id(&self, kind: SurfaceKind) -> &str {
        match kind {
            SurfaceKind::Desktop => &self.desktop_container,
            SurfaceKind::Mobile => &self.mobile_container,
        }
    }

    pub fn scroll_mode(&self) -> ScrollMode {
        if self.smooth_scroll {
            ScrollMode::Smooth
        } else {
            ScrollMode::Instant
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }

    pub fn validate(&self) -> Result<(), NavError> {
        let required = [
            ("sectionSelector", &self.section_selector),
            ("desktopContainer", &self.desktop_container),
            ("mobileContainer", &self.mobile_container),
            ("overlayId", &self.overlay_id),
            ("menuOpenSelector", &self.menu_open_selector),
            ("menuCloseId", &self.menu_close_id),
            ("activeClass", &self.active_class),
            ("showClass", &self.show_class),
            ("hiddenClass", &self.hidden_class),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(NavError::InvalidConfig(format!("{} must not be empty", name)));
        }
        if self.desktop_container == self.mobile_container {
            return Err(NavError::InvalidConfig(
                "desktopContainer and mobileContainer must differ".to_string(),
            ));
        }
        if self.show_class == self.hidden_class {
            return Err(NavError::InvalidConfig(
                "showClass and hiddenClass must differ".to_string(),
            ));
        }
        if !self.tolerance.top_min.is_finite() {
            return Err(NavError::InvalidConfig("tolerance.topMin must be finite".to_string()));
        }
        Ok(())
    }
}
