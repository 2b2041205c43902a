//! ScrollNavigator: turns a section id into a scroll request.

use crate::error::NavError;
use crate::host::{DocumentHost, ScrollMode, ScrollRequest};
use crate::registry::SectionRegistry;
use log::debug;

#[derive(Debug, Clone, Copy)]
pub struct ScrollNavigator {
    mode: ScrollMode,
}

impl ScrollNavigator {
    pub fn new(mode: ScrollMode) -> Self {
        Self { mode }
    }

    /// Request a scroll that puts the section's top edge at the top of the
    /// viewport. The environment owns the animation; this only issues the
    /// request.
    pub fn navigate_to<H: DocumentHost + ?Sized>(
        &self,
        registry: &SectionRegistry,
        host: &mut H,
        section_id: &str,
    ) -> Result<ScrollRequest, NavError> {
        if !registry.contains(section_id) {
            return Err(NavError::UnknownSection(section_id.to_string()));
        }
        let rect = host
            .element_rect(section_id)
            .ok_or_else(|| NavError::UnknownSection(section_id.to_string()))?;

        let request = ScrollRequest {
            top: rect.top + host.scroll_y(),
            mode: self.mode,
        };
        host.scroll_to(request)?;
        debug!("[ScrollNavigator] #{} -> {}px", section_id, request.top);
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::memory::MemoryDocument;

    fn registry() -> SectionRegistry {
        SectionRegistry::from_ids(["intro", "about", "contact"]).unwrap()
    }

    #[test]
    fn test_offset_adds_current_scroll() {
        let mut doc = MemoryDocument::standard(&["intro", "about", "contact"]);
        doc.scroll_by(250.0);
        let navigator = ScrollNavigator::new(ScrollMode::Smooth);

        let request = navigator.navigate_to(&registry(), &mut doc, "contact").unwrap();

        let rect = doc.element_rect("contact").unwrap();
        assert_eq!(request.top, rect.top + 250.0);
        assert_eq!(request.top, 1200.0);
        assert_eq!(request.mode, ScrollMode::Smooth);
        assert_eq!(doc.scrolls(), &[request]);
    }

    #[test]
    fn test_unknown_section_issues_no_scroll() {
        let mut doc = MemoryDocument::standard(&["intro", "about", "contact"]);
        let navigator = ScrollNavigator::new(ScrollMode::Smooth);

        let err = navigator.navigate_to(&registry(), &mut doc, "Contact").unwrap_err();
        assert_eq!(err, NavError::UnknownSection("Contact".to_string()));
        assert!(doc.scrolls().is_empty());
    }

    #[test]
    fn test_detached_section_is_unknown() {
        let mut doc = MemoryDocument::standard(&["intro", "about", "contact"]);
        doc.remove_section("about");
        let navigator = ScrollNavigator::new(ScrollMode::Instant);

        let err = navigator.navigate_to(&registry(), &mut doc, "about").unwrap_err();
        assert_eq!(err, NavError::UnknownSection("about".to_string()));
    }

    #[test]
    fn test_failure_does_not_affect_next_request() {
        let mut doc = MemoryDocument::standard(&["intro", "about", "contact"]);
        let navigator = ScrollNavigator::new(ScrollMode::Instant);

        assert!(navigator.navigate_to(&registry(), &mut doc, "faq").is_err());
        let request = navigator.navigate_to(&registry(), &mut doc, "about").unwrap();
        assert_eq!(request.top, 600.0);
        assert_eq!(request.mode, ScrollMode::Instant);
    }
}
