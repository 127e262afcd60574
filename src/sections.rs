// ─── SECTION TABLE ──────────────────────────────────────────────
//
// The one ordered list of page sections. Navbar, dot navigator, the
// active-section tracker and the numeric shortcuts all read from here.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Home,
    About,
    Projects,
    Social,
}

/// A top-level, individually addressable block of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub label: &'static str,
    /// 1-based position on the page.
    pub ordinal: usize,
}

pub const SECTIONS: &[Section] = &[
    Section { id: SectionId::Home, label: "Home", ordinal: 1 },
    Section { id: SectionId::About, label: "About", ordinal: 2 },
    Section { id: SectionId::Projects, label: "Work", ordinal: 3 },
    Section { id: SectionId::Social, label: "Contact", ordinal: 4 },
];

impl SectionId {
    pub const ALL: &[SectionId] = &[
        SectionId::Home,
        SectionId::About,
        SectionId::Projects,
        SectionId::Social,
    ];

    /// Stable anchor string, unique within the page.
    pub fn anchor(&self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Projects => "projects",
            SectionId::Social => "social",
        }
    }

    pub fn section(&self) -> &'static Section {
        // SECTIONS lists every variant exactly once, in declaration order.
        &SECTIONS[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.section().label
    }

    pub fn ordinal(&self) -> usize {
        self.section().ordinal
    }
}

/// Section at a 1-based position, if any.
pub fn by_ordinal(ordinal: usize) -> Option<SectionId> {
    SECTIONS.iter().find(|s| s.ordinal == ordinal).map(|s| s.id)
}

/// "01 / 04" style counter shown in the hero.
pub fn counter_label(id: SectionId) -> String {
    format!("{:02} / {:02}", id.ordinal(), SECTIONS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_enum_order() {
        for (i, section) in SECTIONS.iter().enumerate() {
            assert_eq!(section.id as usize, i);
            assert_eq!(section.ordinal, i + 1);
            assert_eq!(SectionId::ALL[i], section.id);
        }
    }

    #[test]
    fn test_anchors_and_labels() {
        let anchors: Vec<&str> = SectionId::ALL.iter().map(|id| id.anchor()).collect();
        assert_eq!(anchors, ["home", "about", "projects", "social"]);
        assert_eq!(SectionId::Projects.label(), "Work");
        assert_eq!(SectionId::Social.label(), "Contact");
    }

    #[test]
    fn test_by_ordinal() {
        assert_eq!(by_ordinal(1), Some(SectionId::Home));
        assert_eq!(by_ordinal(4), Some(SectionId::Social));
        assert_eq!(by_ordinal(0), None);
        assert_eq!(by_ordinal(5), None);
    }

    #[test]
    fn test_counter_label() {
        assert_eq!(counter_label(SectionId::Home), "01 / 04");
    }
}
