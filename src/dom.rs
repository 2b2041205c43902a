//! WebDocument: `DocumentHost` backed by the live browser DOM.
//!
//! Every listener it registers forwards a [`NavEvent`] to the sink it was
//! created with. Listeners are removed again, and a scheduled scroll frame
//! cancelled, when the document is dropped.

use std::cell::Cell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, ScrollBehavior, ScrollToOptions, Window};

use crate::error::NavError;
use crate::geometry::{Rect, Viewport};
use crate::host::{DocumentHost, NavEvent, ScrollMode, ScrollRequest};
use crate::surface::NavEntry;

/// Receives events raised by DOM listeners
pub type EventSink = Rc<dyn Fn(NavEvent)>;

/// Attribute carrying the section id on rendered entries
pub const SECTION_ATTR: &str = "data-section";

struct Listener {
    target: EventTarget,
    event_type: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

pub struct WebDocument {
    window: Window,
    document: Document,
    sink: EventSink,
    listeners: Vec<Listener>,
    /// Animation frame requested by a batched scroll and not yet run
    frame_id: Rc<Cell<Option<i32>>>,
}

fn js_err(err: JsValue) -> NavError {
    NavError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl WebDocument {
    pub fn new(sink: EventSink) -> Result<Self, NavError> {
        let window = web_sys::window().ok_or_else(|| NavError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| NavError::Dom("no document".to_string()))?;
        Ok(Self {
            window,
            document,
            sink,
            listeners: Vec::new(),
            frame_id: Rc::new(Cell::new(None)),
        })
    }

    fn listen(&mut self, target: EventTarget, event_type: &'static str, event: NavEvent) -> Result<(), NavError> {
        let sink = self.sink.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |_e: Event| sink(event.clone()));
        self.register(target, event_type, closure)
    }

    fn register(
        &mut self,
        target: EventTarget,
        event_type: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Result<(), NavError> {
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        target
            .add_event_listener_with_callback(event_type, callback)
            .map_err(js_err)?;
        self.listeners.push(Listener {
            target,
            event_type,
            closure,
        });
        Ok(())
    }

    fn element(&self, id: &str) -> Result<Element, NavError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| NavError::MissingElement(format!("#{}", id)))
    }
}

impl Drop for WebDocument {
    fn drop(&mut self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event_type,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

impl DocumentHost for WebDocument {
    fn section_ids(&self, selector: &str) -> Vec<String> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            warn!("[WebDocument] Invalid section selector '{}'", selector);
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| el.id())
            .collect()
    }

    fn element_rect(&self, id: &str) -> Option<Rect> {
        let rect = self.document.get_element_by_id(id)?.get_bounding_client_rect();
        Some(Rect {
            top: rect.top(),
            bottom: rect.bottom(),
            left: rect.left(),
            right: rect.right(),
        })
    }

    fn viewport(&self) -> Viewport {
        let root = self.document.document_element();
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|h| *h > 0.0)
            .or_else(|| root.as_ref().map(|el| el.client_height() as f64))
            .unwrap_or(0.0);
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|w| *w > 0.0)
            .or_else(|| root.as_ref().map(|el| el.client_width() as f64))
            .unwrap_or(0.0);
        Viewport::new(width, height)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn append_entry(&mut self, container_id: &str, entry: &NavEntry) -> Result<(), NavError> {
        let container = self.element(container_id)?;
        let item = self.document.create_element("li").map_err(js_err)?;
        let anchor = self.document.create_element("a").map_err(js_err)?;

        item.set_id(&entry.id);
        item.set_attribute(SECTION_ATTR, &entry.section_id).map_err(js_err)?;
        anchor.set_text_content(Some(&entry.label));
        item.append_child(&anchor).map_err(js_err)?;
        container.append_child(&item).map_err(js_err)?;

        let event = NavEvent::EntryClicked {
            surface: entry.surface,
            section_id: entry.section_id.clone(),
        };
        self.listen(item.into(), "click", event)
    }

    fn set_class(&mut self, element_id: &str, class: &str, enabled: bool) -> Result<(), NavError> {
        self.element(element_id)?
            .class_list()
            .toggle_with_force(class, enabled)
            .map(|_| ())
            .map_err(js_err)
    }

    fn scroll_to(&mut self, request: ScrollRequest) -> Result<(), NavError> {
        let options = ScrollToOptions::new();
        options.set_top(request.top);
        options.set_behavior(match request.mode {
            ScrollMode::Smooth => ScrollBehavior::Smooth,
            ScrollMode::Instant => ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    fn bind_menu_triggers(&mut self, open_selector: &str, close_id: &str) -> Result<(), NavError> {
        let open = self
            .document
            .query_selector(open_selector)
            .map_err(js_err)?
            .ok_or_else(|| NavError::MissingElement(open_selector.to_string()))?;
        let close = self.element(close_id)?;

        self.listen(open.into(), "click", NavEvent::MenuOpen)?;
        self.listen(close.into(), "click", NavEvent::MenuClose)
    }

    /// Forward `scroll` events on the window.
    ///
    /// With `batched`, bursts of scroll events collapse into a single
    /// [`NavEvent::Scroll`] on the next animation frame.
    fn bind_scroll(&mut self, batched: bool) -> Result<(), NavError> {
        let target: EventTarget = self.window.clone().into();
        if !batched {
            return self.listen(target, "scroll", NavEvent::Scroll);
        }

        let frame_id = self.frame_id.clone();
        let frame = {
            let sink = self.sink.clone();
            let frame_id = frame_id.clone();
            Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
                frame_id.set(None);
                sink(NavEvent::Scroll);
            })
        };
        let window = self.window.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |_e: Event| {
            if frame_id.get().is_some() {
                return;
            }
            let callback: &js_sys::Function = frame.as_ref().unchecked_ref();
            match window.request_animation_frame(callback) {
                Ok(id) => frame_id.set(Some(id)),
                Err(e) => warn!("[WebDocument] requestAnimationFrame failed: {:?}", e),
            }
        });
        self.register(target, "scroll", closure)
    }
}
