//! Error taxonomy for navbar construction and event handling.
//!
//! Every failure is local to the handler that raised it. Nothing here is
//! retried: the next scroll or click starts from a clean slate.

use crate::surface::SurfaceKind;
use wasm_bindgen::JsValue;

/// Errors raised by the navbar components
#[derive(Debug, Clone, PartialEq)]
pub enum NavError {
    /// No addressable sections were found at startup
    EmptyRegistry,
    /// A navigation target does not map to a registered section
    UnknownSection(String),
    /// The container element for a nav surface is absent
    MissingSurfaceContainer {
        surface: SurfaceKind,
        container_id: String,
    },
    /// A required element (overlay, trigger) is absent
    MissingElement(String),
    /// A generated entry id is already taken in the document
    EntryIdCollision(String),
    AlreadyInitialized,
    NotInitialized,
    InvalidConfig(String),
    /// The browsing environment rejected a DOM operation
    Dom(String),
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavError::EmptyRegistry => write!(f, "No sections found in document"),
            NavError::UnknownSection(id) => write!(f, "Unknown section: {}", id),
            NavError::MissingSurfaceContainer { surface, container_id } => write!(
                f,
                "Missing container #{} for {} surface",
                container_id, surface
            ),
            NavError::MissingElement(selector) => write!(f, "Missing element: {}", selector),
            NavError::EntryIdCollision(id) => write!(f, "Entry id already in use: {}", id),
            NavError::AlreadyInitialized => write!(f, "Navigation already initialized"),
            NavError::NotInitialized => write!(f, "Navigation not initialized"),
            NavError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            NavError::Dom(msg) => write!(f, "DOM error: {}", msg),
        }
    }
}

impl std::error::Error for NavError {}

impl From<NavError> for JsValue {
    fn from(err: NavError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
