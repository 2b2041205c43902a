//! ActiveTracker: keeps nav entries' active state in sync with the viewport.
//!
//! Visibility is evaluated once per section and applied to that section's
//! entry on every surface, so desktop and mobile lists always agree.

use crate::geometry::{is_visible, Tolerance};
use crate::host::DocumentHost;
use crate::registry::SectionRegistry;
use crate::surface::NavSurface;
use log::{debug, warn};
use serde::Serialize;

/// Outcome of a single refresh pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    /// Sections considered visible, in document order
    pub visible: Vec<String>,
    /// Entries whose active flag flipped during this pass
    pub toggled: usize,
}

#[derive(Debug, Clone)]
pub struct ActiveTracker {
    tolerance: Tolerance,
    active_class: String,
    refresh_count: u64,
}

impl ActiveTracker {
    pub fn new(tolerance: Tolerance, active_class: impl Into<String>) -> Self {
        Self {
            tolerance,
            active_class: active_class.into(),
            refresh_count: 0,
        }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Re-evaluate every section against the live viewport.
    ///
    /// The DOM class is only written when an entry's flag changes. If the
    /// write fails the flag keeps its previous value so the next pass retries.
    pub fn refresh<H: DocumentHost + ?Sized>(
        &mut self,
        registry: &SectionRegistry,
        surfaces: &mut [NavSurface],
        host: &mut H,
    ) -> RefreshReport {
        self.refresh_count += 1;
        let viewport = host.viewport();
        let mut report = RefreshReport::default();

        for section in registry.iter() {
            let visible = match host.element_rect(&section.id) {
                Some(rect) => is_visible(&rect, &viewport, &self.tolerance),
                None => false,
            };
            if visible {
                report.visible.push(section.id.clone());
            }

            for surface in surfaces.iter_mut() {
                let Some(entry) = surface.entry_mut(&section.id) else {
                    continue;
                };
                if entry.active == visible {
                    continue;
                }
                match host.set_class(&entry.id, &self.active_class, visible) {
                    Ok(()) => {
                        entry.active = visible;
                        report.toggled += 1;
                    }
                    Err(e) => warn!("[ActiveTracker] Could not update #{}: {}", entry.id, e),
                }
            }
        }

        if report.toggled > 0 {
            debug!(
                "[ActiveTracker] {} entries toggled, visible: {:?}",
                report.toggled, report.visible
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::surface::{NavBuilder, SurfaceKind};
    use crate::tests::memory::MemoryDocument;

    const ACTIVE: &str = "nav-active";

    fn setup(ids: &[&str]) -> (MemoryDocument, SectionRegistry, Vec<NavSurface>) {
        let mut doc = MemoryDocument::standard(ids);
        let registry = SectionRegistry::from_ids(ids.iter().copied()).unwrap();
        let surfaces = vec![
            NavBuilder::build_surface(&registry, "navbar-list", SurfaceKind::Desktop, &mut doc).unwrap(),
            NavBuilder::build_surface(&registry, "mobile-list", SurfaceKind::Mobile, &mut doc).unwrap(),
        ];
        (doc, registry, surfaces)
    }

    #[test]
    fn test_marks_visible_section_on_all_surfaces() {
        let (mut doc, registry, mut surfaces) = setup(&["intro", "about", "contact"]);
        doc.set_rect("intro", Rect::vertical(-500.0, -10.0));
        doc.set_rect("about", Rect::vertical(10.0, 400.0));
        doc.set_rect("contact", Rect::vertical(900.0, 1400.0));

        let mut tracker = ActiveTracker::new(Tolerance::strict(), ACTIVE);
        let report = tracker.refresh(&registry, &mut surfaces, &mut doc);

        assert_eq!(report.visible, vec!["about"]);
        assert_eq!(report.toggled, 2);
        assert!(doc.has_class("nav-about", ACTIVE));
        assert!(doc.has_class("mobile-about", ACTIVE));
        for id in ["nav-intro", "mobile-intro", "nav-contact", "mobile-contact"] {
            assert!(!doc.has_class(id, ACTIVE), "{} should be inactive", id);
        }
        for surface in &surfaces {
            assert_eq!(surface.active_sections(), vec!["about"]);
        }
    }

    #[test]
    fn test_deactivates_when_scrolled_away() {
        let (mut doc, registry, mut surfaces) = setup(&["intro", "about"]);
        let mut tracker = ActiveTracker::new(Tolerance::strict(), ACTIVE);

        tracker.refresh(&registry, &mut surfaces, &mut doc);
        assert!(doc.has_class("nav-intro", ACTIVE));

        doc.scroll_by(600.0);
        let report = tracker.refresh(&registry, &mut surfaces, &mut doc);

        assert_eq!(report.visible, vec!["about"]);
        assert!(!doc.has_class("nav-intro", ACTIVE));
        assert!(!doc.has_class("mobile-intro", ACTIVE));
        assert!(doc.has_class("nav-about", ACTIVE));
        assert!(doc.has_class("mobile-about", ACTIVE));
    }

    #[test]
    fn test_unchanged_state_writes_nothing() {
        let (mut doc, registry, mut surfaces) = setup(&["intro", "about"]);
        let mut tracker = ActiveTracker::new(Tolerance::strict(), ACTIVE);

        tracker.refresh(&registry, &mut surfaces, &mut doc);
        let writes = doc.class_writes();
        let report = tracker.refresh(&registry, &mut surfaces, &mut doc);

        assert_eq!(report.toggled, 0);
        assert_eq!(doc.class_writes(), writes);
        assert_eq!(tracker.refresh_count(), 2);
    }

    #[test]
    fn test_detached_section_is_inactive() {
        let (mut doc, registry, mut surfaces) = setup(&["intro", "about"]);
        let mut tracker = ActiveTracker::new(Tolerance::strict(), ACTIVE);
        tracker.refresh(&registry, &mut surfaces, &mut doc);

        doc.remove_section("intro");
        tracker.refresh(&registry, &mut surfaces, &mut doc);

        assert!(!doc.has_class("nav-intro", ACTIVE));
        assert!(!doc.has_class("mobile-intro", ACTIVE));
    }

    #[test]
    fn test_lenient_tolerance_keeps_partially_scrolled_section() {
        let (mut doc, registry, mut surfaces) = setup(&["intro", "about"]);
        doc.set_rect("intro", Rect::vertical(-25.0, 575.0));
        doc.set_rect("about", Rect::vertical(575.0, 1175.0));

        let mut strict = ActiveTracker::new(Tolerance::strict(), ACTIVE);
        let report = strict.refresh(&registry, &mut surfaces, &mut doc);
        assert_eq!(report.visible, vec!["about"]);

        let mut lenient = ActiveTracker::new(Tolerance::lenient(), ACTIVE);
        let report = lenient.refresh(&registry, &mut surfaces, &mut doc);
        assert_eq!(report.visible, vec!["intro", "about"]);
    }
}
