//! DocumentHost: the seam between navbar logic and the rendered document.
//!
//! The browser implementation lives in `dom.rs`; tests drive the same
//! components through an in-memory document.

use crate::error::NavError;
use crate::geometry::{Rect, Viewport};
use crate::surface::{NavEntry, SurfaceKind};
use serde::{Deserialize, Serialize};

/// How the environment should animate a scroll request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollMode {
    Smooth,
    Instant,
}

/// Absolute document offset to scroll to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub mode: ScrollMode,
}

/// Events delivered by the browsing environment
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    Scroll,
    EntryClicked {
        surface: SurfaceKind,
        section_id: String,
    },
    MenuOpen,
    MenuClose,
}

/// Operations the navbar needs from the rendered document.
///
/// Geometry methods must answer live; implementations never cache rects.
pub trait DocumentHost {
    /// Ids of elements matching `selector`, in document order
    fn section_ids(&self, selector: &str) -> Vec<String>;

    /// Current viewport-relative rect of the element with `id`
    fn element_rect(&self, id: &str) -> Option<Rect>;

    fn viewport(&self) -> Viewport;

    /// Current vertical scroll offset of the document
    fn scroll_y(&self) -> f64;

    fn has_element(&self, id: &str) -> bool;

    /// Render `entry` as the last child of `container_id` and route its
    /// clicks back as [`NavEvent::EntryClicked`]
    fn append_entry(&mut self, container_id: &str, entry: &NavEntry) -> Result<(), NavError>;

    fn set_class(&mut self, element_id: &str, class: &str, enabled: bool) -> Result<(), NavError>;

    fn scroll_to(&mut self, request: ScrollRequest) -> Result<(), NavError>;

    /// Route clicks on the open trigger (`open_selector`) and close trigger
    /// (`close_id`) back as [`NavEvent::MenuOpen`] / [`NavEvent::MenuClose`]
    fn bind_menu_triggers(&mut self, open_selector: &str, close_id: &str) -> Result<(), NavError>;

    /// Route document scrolling back as [`NavEvent::Scroll`]. With `batched`,
    /// at most one event is delivered per animation frame.
    fn bind_scroll(&mut self, batched: bool) -> Result<(), NavError>;
}
