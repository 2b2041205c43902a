//! SectionNav JS bindings.
//!
//! A `SectionNav` built with `new SectionNav()` owns its listeners: once the
//! JS object is garbage collected (or freed) the controller is dropped and
//! every listener is removed, so callers must keep the handle. Navbars built
//! with `mount()` stay registered until `unmount()`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::NavConfig;
use crate::controller::NavController;
use crate::dom::{EventSink, WebDocument};
use crate::error::NavError;
use crate::host::NavEvent;
use crate::logging::init_logging;

type Shared = Rc<RefCell<Option<NavController<WebDocument>>>>;

thread_local! {
    /// Controllers kept alive independently of their JS handles
    static MOUNTED: RefCell<Vec<Shared>> = const { RefCell::new(Vec::new()) };
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Route a DOM event into the controller.
///
/// Events that arrive while another handler holds the controller are dropped.
fn dispatch(weak: &Weak<RefCell<Option<NavController<WebDocument>>>>, event: NavEvent) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut guard) = shared.try_borrow_mut() else {
        warn!("[SectionNav] Dropped {:?} during another handler", event);
        return;
    };
    if let Some(nav) = guard.as_mut() {
        // Failures are logged by the controller and stay local to this event
        let _ = nav.handle(event);
    }
}

/// Browser-facing navbar handle. Keep a reference for as long as the navbar
/// should stay live.
///
/// ```javascript,ignore
/// import init, { SectionNav } from 'sectionnav';
///
/// await init();
/// const nav = new SectionNav({ tolerance: { topMin: -30 }, batchScroll: true });
/// nav.init();             // builds #navbar-list and #mobile-list
/// nav.navigateTo('about');
/// console.log(nav.snapshot().active);
/// ```
#[wasm_bindgen]
pub struct SectionNav {
    inner: Shared,
}

#[wasm_bindgen]
impl SectionNav {
    /// `config` may be `undefined` or a partial `NavConfig` object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SectionNav, JsValue> {
        let config: NavConfig = if config.is_undefined() || config.is_null() {
            NavConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Ok(Self::with_config(config)?)
    }

    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<SectionNav, JsValue> {
        let config = NavConfig::from_json(json)?;
        Ok(Self::with_config(config)?)
    }

    /// Build the nav surfaces and start listening for scroll and menu events.
    /// Returns `{ sections, surfacesBuilt, surfacesFailed, menuBound }`.
    #[wasm_bindgen]
    pub fn init(&self) -> Result<JsValue, JsValue> {
        let report = self.with_controller(|nav| nav.init())?;
        to_js(&report)
    }

    /// Re-evaluate active entries now. Returns `{ visible, toggled }`.
    #[wasm_bindgen]
    pub fn refresh(&self) -> Result<JsValue, JsValue> {
        let report = self.with_controller(|nav| nav.refresh())?;
        to_js(&report)
    }

    /// Scroll to a section; returns the requested document offset
    #[wasm_bindgen(js_name = navigateTo)]
    pub fn navigate_to(&self, section_id: &str) -> Result<f64, JsValue> {
        let request = self.with_controller(|nav| nav.navigate_to(section_id))?;
        Ok(request.top)
    }

    #[wasm_bindgen(js_name = openMenu)]
    pub fn open_menu(&self) -> Result<bool, JsValue> {
        self.with_controller(|nav| nav.open_menu())
    }

    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&self) -> Result<bool, JsValue> {
        self.with_controller(|nav| nav.close_menu())
    }

    #[wasm_bindgen(js_name = isMenuOpen)]
    pub fn is_menu_open(&self) -> bool {
        self.inner
            .try_borrow()
            .ok()
            .and_then(|guard| guard.as_ref().map(|nav| nav.menu_state().open))
            .unwrap_or(false)
    }

    /// Current state as `{ menuOpen, sections, active, surfaces }`
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.with_controller(|nav| Ok(nav.snapshot()))?;
        to_js(&snapshot)
    }
}

impl SectionNav {
    fn with_config(config: NavConfig) -> Result<Self, NavError> {
        config.validate()?;
        init_logging(config.log_level());

        let inner: Shared = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&inner);
        let sink: EventSink = Rc::new(move |event: NavEvent| dispatch(&weak, event));
        let controller = NavController::new(config, WebDocument::new(sink)?)?;
        *inner.borrow_mut() = Some(controller);
        Ok(Self { inner })
    }

    fn with_controller<T>(
        &self,
        f: impl FnOnce(&mut NavController<WebDocument>) -> Result<T, NavError>,
    ) -> Result<T, JsValue> {
        let mut guard = self
            .inner
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("SectionNav is busy"))?;
        let nav = guard.as_mut().ok_or(NavError::NotInitialized)?;
        f(nav).map_err(JsValue::from)
    }
}

/// Create a navbar and build it in one call.
///
/// The navbar keeps working after the returned handle is discarded.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<SectionNav, JsValue> {
    let nav = SectionNav::new(config)?;
    nav.init()?;
    MOUNTED.with(|mounted| mounted.borrow_mut().push(nav.inner.clone()));
    Ok(nav)
}

/// Release every navbar created by `mount()`. Those whose handles are gone
/// remove their listeners now; the rest do when their handle is freed.
#[wasm_bindgen]
pub fn unmount() {
    let released = MOUNTED.with(|mounted| std::mem::take(&mut *mounted.borrow_mut()));
    if !released.is_empty() {
        debug!("[SectionNav] Released {} mounted navbar(s)", released.len());
    }
}
