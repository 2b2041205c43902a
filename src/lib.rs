//! SectionNav: section-driven navbar with scroll-spy highlighting
//!
//! Builds a desktop and a mobile navigation list from the page's `<section>`
//! elements, marks the entry of the section in view, smooth-scrolls on click
//! and toggles the mobile overlay.
//!
//! # Architecture
//! - `geometry.rs` - Rect/viewport visibility test
//! - `registry.rs` - SectionRegistry: sections captured once at startup
//! - `surface.rs` - NavBuilder, NavSurface and NavEntry
//! - `tracker.rs` - ActiveTracker: active-class sync on scroll
//! - `menu.rs` - MenuController: mobile overlay state
//! - `navigator.rs` - ScrollNavigator: section id -> scroll request
//! - `controller.rs` - NavController: owns all of the above plus the host
//! - `host.rs` - DocumentHost trait and NavEvent
//! - `dom.rs` - WebDocument: DocumentHost over web-sys
//! - `logging.rs` - `log` backend writing to the browser console
//! - `wasm.rs` - SectionNav JS bindings, `mount`/`unmount`
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { mount } from 'sectionnav';
//!
//! await init();
//! const nav = mount({ activeClass: 'nav-active' });
//! ```

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod menu;
pub mod navigator;
pub mod registry;
pub mod surface;
pub mod tracker;
pub mod wasm;

#[cfg(test)]
mod tests;

pub use config::*;
pub use controller::*;
pub use dom::*;
pub use error::*;
pub use geometry::*;
pub use host::*;
pub use menu::*;
pub use navigator::*;
pub use registry::*;
pub use surface::*;
pub use tracker::*;
pub use wasm::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("sectionnav v{}", env!("CARGO_PKG_VERSION"))
}
