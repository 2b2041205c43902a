//! NavBuilder: renders one nav entry per section into a nav surface.
//!
//! Entry ids are a pure function of (surface, section id): `nav-<id>` on the
//! desktop list, `mobile-<id>` on the mobile list. The section id is carried
//! on the entry itself so clicks never depend on the rendered label.

use crate::error::NavError;
use crate::host::DocumentHost;
use crate::registry::SectionRegistry;
use log::debug;
use serde::{Deserialize, Serialize};

// =============================================================================
// Types
// =============================================================================

/// Which navigation list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceKind {
    Desktop,
    Mobile,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 2] = [SurfaceKind::Desktop, SurfaceKind::Mobile];

    /// Prefix of entry ids rendered on this surface
    pub fn id_prefix(&self) -> &'static str {
        match self {
            SurfaceKind::Desktop => "nav",
            SurfaceKind::Mobile => "mobile",
        }
    }

    pub fn entry_id(&self, section_id: &str) -> String {
        format!("{}-{}", self.id_prefix(), section_id)
    }

    /// Actions an entry click performs, in order
    pub fn entry_actions(&self) -> Vec<EntryAction> {
        match self {
            SurfaceKind::Desktop => vec![EntryAction::Navigate],
            SurfaceKind::Mobile => vec![EntryAction::Navigate, EntryAction::CloseMenu],
        }
    }
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceKind::Desktop => write!(f, "desktop"),
            SurfaceKind::Mobile => write!(f, "mobile"),
        }
    }
}

/// Something a nav entry does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryAction {
    /// Scroll to the entry's section
    Navigate,
    /// Dismiss the mobile overlay
    CloseMenu,
}

/// One rendered navigation entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    pub id: String,
    pub surface: SurfaceKind,
    pub section_id: String,
    pub label: String,
    pub active: bool,
    pub actions: Vec<EntryAction>,
}

impl NavEntry {
    pub fn new(surface: SurfaceKind, section_id: &str) -> Self {
        Self {
            id: surface.entry_id(section_id),
            surface,
            section_id: section_id.to_string(),
            label: display_label(section_id),
            active: false,
            actions: surface.entry_actions(),
        }
    }
}

/// An ordered nav list, one entry per section
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSurface {
    pub kind: SurfaceKind,
    pub container_id: String,
    pub entries: Vec<NavEntry>,
}

impl NavSurface {
    pub fn entry(&self, section_id: &str) -> Option<&NavEntry> {
        self.entries.iter().find(|e| e.section_id == section_id)
    }

    pub fn entry_mut(&mut self, section_id: &str) -> Option<&mut NavEntry> {
        self.entries.iter_mut().find(|e| e.section_id == section_id)
    }

    pub fn entry_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Section ids whose entry is currently active
    pub fn active_sections(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.active)
            .map(|e| e.section_id.as_str())
            .collect()
    }
}

// =============================================================================
// Label formatting
// =============================================================================

/// Display form of a section id: separators become spaces and every word is
/// capitalized. Presentation only; lookups always use the raw id.
pub fn display_label(section_id: &str) -> String {
    section_id
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// NavBuilder
// =============================================================================

pub struct NavBuilder;

impl NavBuilder {
    /// Render one entry per section into `container_id`.
    ///
    /// Fails before touching the document if the container is missing or any
    /// generated entry id is already taken, so a second run over the same
    /// document never duplicates entries.
    pub fn build_surface<H: DocumentHost + ?Sized>(
        registry: &SectionRegistry,
        container_id: &str,
        kind: SurfaceKind,
        host: &mut H,
    ) -> Result<NavSurface, NavError> {
        if !host.has_element(container_id) {
            return Err(NavError::MissingSurfaceContainer {
                surface: kind,
                container_id: container_id.to_string(),
            });
        }

        let entries: Vec<NavEntry> = registry
            .iter()
            .map(|section| NavEntry::new(kind, &section.id))
            .collect();

        if let Some(taken) = entries.iter().find(|e| host.has_element(&e.id)) {
            return Err(NavError::EntryIdCollision(taken.id.clone()));
        }

        for entry in &entries {
            host.append_entry(container_id, entry)?;
        }
        debug!(
            "[NavBuilder] Rendered {} {} entries into #{}",
            entries.len(),
            kind,
            container_id
        );

        Ok(NavSurface {
            kind,
            container_id: container_id.to_string(),
            entries,
        })
    }
}
