//! In-memory document used to drive the navbar components in tests.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::NavError;
use crate::geometry::{Rect, Viewport};
use crate::host::{DocumentHost, ScrollRequest};
use crate::surface::NavEntry;

/// Height of each section laid out by [`MemoryDocument::standard`]
pub const SECTION_HEIGHT: f64 = 600.0;

#[derive(Debug, Default)]
pub struct MemoryDocument {
    /// Section ids in document order with their viewport-relative rects
    sections: Vec<(String, Rect)>,
    elements: HashSet<String>,
    selectors: HashSet<String>,
    children: HashMap<String, Vec<String>>,
    entries: HashMap<String, NavEntry>,
    classes: HashMap<String, BTreeSet<String>>,
    viewport: Viewport,
    scroll_y: f64,
    scrolls: Vec<ScrollRequest>,
    class_writes: usize,
    menu_bound: bool,
    /// Batching mode of each successful scroll binding
    scroll_bindings: Vec<bool>,
    reject_scroll_binding: bool,
}

impl MemoryDocument {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// A 1280x800 page with the stock containers, overlay and triggers, and
    /// `ids` stacked as 600px sections starting at the top.
    pub fn standard(ids: &[&str]) -> Self {
        let mut doc = Self::new(Viewport::new(1280.0, 800.0))
            .with_element("navbar-list")
            .with_element("mobile-list")
            .with_element("mobile-window")
            .with_element("close-icon")
            .with_selector(".mobile-menu");
        for (i, id) in ids.iter().enumerate() {
            let top = i as f64 * SECTION_HEIGHT;
            doc = doc.with_section(id, Rect::vertical(top, top + SECTION_HEIGHT));
        }
        doc
    }

    pub fn with_section(mut self, id: &str, rect: Rect) -> Self {
        self.sections.push((id.to_string(), rect));
        self
    }

    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.insert(id.to_string());
        self
    }

    pub fn with_selector(mut self, selector: &str) -> Self {
        self.selectors.insert(selector.to_string());
        self
    }

    pub fn without_element(mut self, id: &str) -> Self {
        self.elements.remove(id);
        self
    }

    pub fn without_selector(mut self, selector: &str) -> Self {
        self.selectors.remove(selector);
        self
    }

    pub fn set_rect(&mut self, id: &str, rect: Rect) {
        if let Some((_, r)) = self.sections.iter_mut().find(|(sid, _)| sid == id) {
            *r = rect;
        }
    }

    pub fn remove_section(&mut self, id: &str) {
        self.sections.retain(|(sid, _)| sid != id);
    }

    /// Scroll the document down by `dy`, moving every section up
    pub fn scroll_by(&mut self, dy: f64) {
        self.scroll_y += dy;
        for (_, rect) in &mut self.sections {
            rect.top -= dy;
            rect.bottom -= dy;
        }
    }

    pub fn children(&self, container_id: &str) -> Vec<String> {
        self.children.get(container_id).cloned().unwrap_or_default()
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.classes.get(id).is_some_and(|c| c.contains(class))
    }

    pub fn label(&self, entry_id: &str) -> Option<String> {
        self.entries.get(entry_id).map(|e| e.label.clone())
    }

    pub fn data_section(&self, entry_id: &str) -> Option<String> {
        self.entries.get(entry_id).map(|e| e.section_id.clone())
    }

    pub fn scrolls(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    pub fn class_writes(&self) -> usize {
        self.class_writes
    }

    pub fn menu_bound(&self) -> bool {
        self.menu_bound
    }

    pub fn scroll_bindings(&self) -> &[bool] {
        &self.scroll_bindings
    }

    /// Make the next scroll bindings fail until reset
    pub fn set_reject_scroll_binding(&mut self, reject: bool) {
        self.reject_scroll_binding = reject;
    }
}

impl DocumentHost for MemoryDocument {
    fn section_ids(&self, _selector: &str) -> Vec<String> {
        self.sections.iter().map(|(id, _)| id.clone()).collect()
    }

    fn element_rect(&self, id: &str) -> Option<Rect> {
        self.sections.iter().find(|(sid, _)| sid == id).map(|(_, r)| *r)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
            || self.entries.contains_key(id)
            || self.sections.iter().any(|(sid, _)| sid == id)
    }

    fn append_entry(&mut self, container_id: &str, entry: &NavEntry) -> Result<(), NavError> {
        if !self.elements.contains(container_id) {
            return Err(NavError::MissingElement(format!("#{}", container_id)));
        }
        self.children
            .entry(container_id.to_string())
            .or_default()
            .push(entry.id.clone());
        self.entries.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    fn set_class(&mut self, element_id: &str, class: &str, enabled: bool) -> Result<(), NavError> {
        if !self.has_element(element_id) {
            return Err(NavError::MissingElement(format!("#{}", element_id)));
        }
        self.class_writes += 1;
        let classes = self.classes.entry(element_id.to_string()).or_default();
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
        Ok(())
    }

    fn scroll_to(&mut self, request: ScrollRequest) -> Result<(), NavError> {
        self.scrolls.push(request);
        Ok(())
    }

    fn bind_menu_triggers(&mut self, open_selector: &str, close_id: &str) -> Result<(), NavError> {
        if !self.selectors.contains(open_selector) {
            return Err(NavError::MissingElement(open_selector.to_string()));
        }
        if !self.elements.contains(close_id) {
            return Err(NavError::MissingElement(format!("#{}", close_id)));
        }
        self.menu_bound = true;
        Ok(())
    }

    fn bind_scroll(&mut self, batched: bool) -> Result<(), NavError> {
        if self.reject_scroll_binding {
            return Err(NavError::Dom("scroll listener rejected".to_string()));
        }
        self.scroll_bindings.push(batched);
        Ok(())
    }
}
