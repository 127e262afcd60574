//! Which section is "in view" for navigation highlighting.
//!
//! Detection uses a thin band near the middle of the viewport (a root
//! margin of -40% top and -55% bottom). A section becomes active when it
//! enters that band.

use crate::scroll::Document;
use crate::sections::SectionId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: f32,
    pub height: f32,
}

impl Viewport {
    pub fn center(&self) -> f32 {
        self.offset + self.height / 2.0
    }
}

/// Viewport shrunk by fractional insets from the top and bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionBand {
    pub top_inset: f32,
    pub bottom_inset: f32,
}

impl DetectionBand {
    pub const CENTER_BIASED: DetectionBand = DetectionBand { top_inset: 0.40, bottom_inset: 0.55 };

    /// Band edges in content coordinates.
    pub fn edges(&self, viewport: Viewport) -> (f32, f32) {
        let start = viewport.offset + viewport.height * self.top_inset;
        let end = viewport.offset + viewport.height * (1.0 - self.bottom_inset);
        (start, end.max(start))
    }

    fn intersects(&self, viewport: Viewport, top: f32, bottom: f32) -> bool {
        let (start, end) = self.edges(viewport);
        top < end && bottom > start
    }
}

#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    band: DetectionBand,
    observed: Vec<SectionId>,
    intersecting: Vec<SectionId>,
    active: SectionId,
}

impl Default for ActiveSectionTracker {
    fn default() -> Self {
        Self::new(DetectionBand::CENTER_BIASED)
    }
}

impl ActiveSectionTracker {
    pub fn new(band: DetectionBand) -> Self {
        Self {
            band,
            observed: Vec::new(),
            intersecting: Vec::new(),
            active: SectionId::Home,
        }
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        !self.observed.is_empty()
    }

    /// Start observing `ids`. Intersection state is reset, so the next
    /// update reports whatever is already inside the band.
    pub fn observe(&mut self, ids: &[SectionId]) {
        self.observed = ids.to_vec();
        self.intersecting.clear();
    }

    /// Stop observing. Later updates are ignored until `observe` again.
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.intersecting.clear();
    }

    /// Feed a new viewport position. Returns the new active section when
    /// it changed.
    ///
    /// Among sections entering the band in the same update, the one whose
    /// top is closest to the viewport centre wins; exact ties go to the
    /// earlier section.
    pub fn update(&mut self, viewport: Viewport, doc: &dyn Document) -> Option<SectionId> {
        if self.observed.is_empty() {
            return None;
        }

        let center = viewport.center();
        let mut now_intersecting = Vec::with_capacity(self.observed.len());
        let mut entering = Vec::new();

        for &id in &self.observed {
            let Some(anchor) = doc.anchor(id) else { continue };
            if self.band.intersects(viewport, anchor.top, anchor.bottom()) {
                now_intersecting.push(id);
                if !self.intersecting.contains(&id) {
                    entering.push((id, (anchor.top - center).abs()));
                }
            }
        }
        self.intersecting = now_intersecting;

        let (winner, _) = entering
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        if winner == self.active {
            return None;
        }
        self.active = winner;
        Some(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::PageLayout;

    const VH: f32 = 1000.0;

    fn page() -> PageLayout {
        PageLayout::stack(
            &[
                (SectionId::Home, 1000.0),
                (SectionId::About, 1000.0),
                (SectionId::Projects, 1000.0),
                (SectionId::Social, 1000.0),
            ],
            200.0,
            VH,
        )
    }

    fn at(offset: f32) -> Viewport {
        Viewport { offset, height: VH }
    }

    fn attached() -> ActiveSectionTracker {
        let mut tracker = ActiveSectionTracker::default();
        tracker.observe(SectionId::ALL);
        tracker
    }

    #[test]
    fn test_band_edges() {
        let (start, end) = DetectionBand::CENTER_BIASED.edges(at(100.0));
        assert!((start - 500.0).abs() < 1e-3);
        assert!((end - 550.0).abs() < 1e-3);
    }

    #[test]
    fn test_about_then_projects() {
        let page = page();
        let mut tracker = attached();
        assert_eq!(tracker.active(), SectionId::Home);

        // Band [1500, 1550] sits inside About only.
        assert_eq!(tracker.update(at(1100.0), &page), Some(SectionId::About));
        assert_eq!(tracker.active(), SectionId::About);

        // Band [2500, 2550] sits inside Projects only.
        assert_eq!(tracker.update(at(2100.0), &page), Some(SectionId::Projects));
        assert_eq!(tracker.active(), SectionId::Projects);
    }

    #[test]
    fn test_leaving_band_keeps_active() {
        let page = PageLayout::stack(&[(SectionId::Home, 300.0), (SectionId::About, 300.0)], 2000.0, VH);
        let mut tracker = attached();
        // Band [400, 450] in About.
        assert_eq!(tracker.update(at(0.0), &page), Some(SectionId::About));
        // Band [1400, 1450] past every section.
        assert_eq!(tracker.update(at(1000.0), &page), None);
        assert_eq!(tracker.active(), SectionId::About);
    }

    #[test]
    fn test_staying_inside_is_not_a_new_entry() {
        let page = page();
        let mut tracker = attached();
        tracker.update(at(1100.0), &page);
        assert_eq!(tracker.update(at(1150.0), &page), None);
    }

    #[test]
    fn test_simultaneous_entry_prefers_top_nearest_center() {
        // About ends at 1520, Projects starts there: both overlap [1500, 1550].
        let page = PageLayout::stack(
            &[(SectionId::Home, 1000.0), (SectionId::About, 520.0), (SectionId::Projects, 1000.0)],
            0.0,
            VH,
        );
        let mut tracker = attached();
        // Center is 1600: About top 1000 (600 away), Projects top 1520 (80 away).
        assert_eq!(tracker.update(at(1100.0), &page), Some(SectionId::Projects));
    }

    #[test]
    fn test_disconnect_stops_updates() {
        let page = page();
        let mut tracker = attached();
        tracker.disconnect();
        assert!(!tracker.is_attached());
        assert_eq!(tracker.update(at(1100.0), &page), None);
        assert_eq!(tracker.active(), SectionId::Home);
    }

    #[test]
    fn test_missing_anchors_are_skipped() {
        let page = PageLayout::empty(VH);
        let mut tracker = attached();
        assert_eq!(tracker.update(at(0.0), &page), None);
    }
}
