//! SectionRegistry: ordered, immutable set of content sections.

use crate::error::NavError;
use crate::host::DocumentHost;
use log::warn;
use serde::Serialize;
use std::collections::HashMap;

/// A navigable region of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    /// Position in document order
    pub ordinal: usize,
}

/// Sections captured once at startup
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    by_id: HashMap<String, usize>,
}

impl SectionRegistry {
    /// Read all sections matching `selector` from the host.
    ///
    /// Sections without an id cannot be addressed and are skipped, as are
    /// repeated ids after their first occurrence.
    pub fn discover<H: DocumentHost + ?Sized>(host: &H, selector: &str) -> Result<Self, NavError> {
        Self::from_ids(host.section_ids(selector))
    }

    pub fn from_ids<I, S>(ids: I) -> Result<Self, NavError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for (position, id) in ids.into_iter().enumerate() {
            let id: String = id.into();
            if id.trim().is_empty() {
                warn!("[SectionRegistry] Skipping section #{} without id", position);
                continue;
            }
            if registry.by_id.contains_key(&id) {
                warn!("[SectionRegistry] Skipping duplicate section id '{}'", id);
                continue;
            }
            let ordinal = registry.sections.len();
            registry.by_id.insert(id.clone(), ordinal);
            registry.sections.push(Section { id, ordinal });
        }

        if registry.sections.is_empty() {
            return Err(NavError::EmptyRegistry);
        }
        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.by_id.get(id).map(|&idx| &self.sections[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
