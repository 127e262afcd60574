use crate::sections::SectionId;

/// Vertical extent of one section on the page, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub id: SectionId,
    pub top: f32,
    pub height: f32,
}

impl Anchor {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A scroll the host still has to perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub offset: f32,
    pub behavior: ScrollBehavior,
}

/// The page as the navigation core sees it: anchors plus a scroll sink.
pub trait Document {
    fn anchor(&self, id: SectionId) -> Option<Anchor>;
    fn max_offset(&self) -> f32;
    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior);
}

/// Align the section's top with the viewport top. Returns false, and does
/// nothing, when the page has no anchor for `id`.
pub fn scroll_to_section(doc: &mut dyn Document, id: SectionId, behavior: ScrollBehavior) -> bool {
    let Some(anchor) = doc.anchor(id) else {
        tracing::debug!("No anchor for #{}, ignoring scroll", id.anchor());
        return false;
    };
    let offset = anchor.top.clamp(0.0, doc.max_offset().max(0.0));
    doc.scroll_to(offset, behavior);
    true
}

/// Reduced-motion preference: explicit setting first, then the
/// `FOLIO_REDUCED_MOTION` environment flag.
pub fn prefers_reduced_motion(setting: Option<bool>) -> bool {
    setting.unwrap_or_else(|| {
        std::env::var("FOLIO_REDUCED_MOTION")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "reduce"))
            .unwrap_or(false)
    })
}

// ─── PAGE LAYOUT ────────────────────────────────────────────────

/// Measured page: ordered anchors, trailing content and the viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    anchors: Vec<Anchor>,
    content_height: f32,
    viewport_height: f32,
    pending: Option<ScrollRequest>,
}

impl PageLayout {
    /// Stack sections top to bottom, followed by `trailing` (the footer).
    pub fn stack(sections: &[(SectionId, f32)], trailing: f32, viewport_height: f32) -> Self {
        let mut top = 0.0;
        let anchors = sections
            .iter()
            .map(|&(id, height)| {
                let anchor = Anchor { id, top, height };
                top += height;
                anchor
            })
            .collect();
        Self {
            anchors,
            content_height: top + trailing,
            viewport_height,
            pending: None,
        }
    }

    /// Nothing mounted yet; every lookup misses.
    pub fn empty(viewport_height: f32) -> Self {
        Self { viewport_height, ..Self::default() }
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn take_request(&mut self) -> Option<ScrollRequest> {
        self.pending.take()
    }
}

impl Document for PageLayout {
    fn anchor(&self, id: SectionId) -> Option<Anchor> {
        self.anchors.iter().copied().find(|a| a.id == id)
    }

    fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        self.pending = Some(ScrollRequest { offset, behavior });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PageLayout {
        PageLayout::stack(
            &[
                (SectionId::Home, 800.0),
                (SectionId::About, 1000.0),
                (SectionId::Projects, 1200.0),
                (SectionId::Social, 600.0),
            ],
            200.0,
            800.0,
        )
    }

    #[test]
    fn test_every_section_aligns_to_top() {
        let mut page = layout();
        for &id in SectionId::ALL {
            assert!(scroll_to_section(&mut page, id, ScrollBehavior::Smooth));
            let req = page.take_request().unwrap();
            let anchor = page.anchor(id).unwrap();
            assert_eq!(req.offset, anchor.top.min(page.max_offset()));
            assert_eq!(req.behavior, ScrollBehavior::Smooth);
        }
    }

    #[test]
    fn test_last_section_clamped_to_scroll_range() {
        let mut page = PageLayout::stack(&[(SectionId::Home, 800.0), (SectionId::Social, 300.0)], 0.0, 800.0);
        assert!(scroll_to_section(&mut page, SectionId::Social, ScrollBehavior::Instant));
        assert_eq!(page.take_request().unwrap().offset, 300.0);
    }

    #[test]
    fn test_missing_anchor_is_noop() {
        let mut page = PageLayout::empty(800.0);
        assert!(!scroll_to_section(&mut page, SectionId::About, ScrollBehavior::Smooth));
        assert!(page.take_request().is_none());
    }

    #[test]
    fn test_stack_geometry() {
        let page = layout();
        assert_eq!(page.content_height(), 3800.0);
        assert_eq!(page.max_offset(), 3000.0);
        assert_eq!(page.anchor(SectionId::Projects).unwrap().top, 1800.0);
        assert_eq!(page.anchor(SectionId::Projects).unwrap().bottom(), 3000.0);
    }

    #[test]
    fn test_reduced_motion_setting_wins() {
        assert!(prefers_reduced_motion(Some(true)));
        assert!(!prefers_reduced_motion(Some(false)));
    }
}
