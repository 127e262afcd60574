use iced::keyboard;

use crate::sections::{self, SectionId};

/// The slice of the keyboard the shortcuts care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
    Other,
}

impl Key {
    pub fn from_iced(key: &keyboard::Key) -> Self {
        use keyboard::key::Named;
        match key {
            keyboard::Key::Named(Named::ArrowUp) => Key::ArrowUp,
            keyboard::Key::Named(Named::ArrowDown) => Key::ArrowDown,
            keyboard::Key::Named(Named::ArrowLeft) => Key::ArrowLeft,
            keyboard::Key::Named(Named::ArrowRight) => Key::ArrowRight,
            keyboard::Key::Character(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
            _ => Key::Other,
        }
    }
}

/// Where keyboard input is currently going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    /// A text field or area owns the keystroke.
    TextEntry,
}

// ─── NUMERIC SECTION JUMP ───────────────────────────────────────

/// Digits 1..=N jump to the Nth section, unless a text entry has focus.
pub fn section_for_key(key: Key, focus: Focus) -> Option<SectionId> {
    if focus == Focus::TextEntry {
        return None;
    }
    match key {
        Key::Char(c) => c.to_digit(10).and_then(|d| sections::by_ordinal(d as usize)),
        _ => None,
    }
}

// ─── SEQUENCE MATCHER ───────────────────────────────────────────

pub const KONAMI: &[Key] = &[
    Key::ArrowUp,
    Key::ArrowUp,
    Key::ArrowDown,
    Key::ArrowDown,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::Char('b'),
    Key::Char('a'),
];

/// Prefix automaton over a fixed key sequence: advance on match, reset
/// to 0 on any mismatch, latch once the whole sequence is seen.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    sequence: &'static [Key],
    position: usize,
    activated: bool,
}

impl SequenceMatcher {
    pub fn new(sequence: &'static [Key]) -> Self {
        Self { sequence, position: 0, activated: false }
    }

    pub fn konami() -> Self {
        Self::new(KONAMI)
    }

    #[cfg(test)]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Returns true only for the key that completes the sequence.
    pub fn feed(&mut self, key: Key) -> bool {
        if self.activated {
            return false;
        }
        if self.sequence.get(self.position) == Some(&key) {
            self.position += 1;
            if self.position == self.sequence.len() {
                self.activated = true;
                self.position = 0;
                return true;
            }
        } else {
            self.position = 0;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Key::*;

    #[test]
    fn test_digit_jump() {
        assert_eq!(section_for_key(Char('1'), Focus::Page), Some(SectionId::Home));
        assert_eq!(section_for_key(Char('2'), Focus::Page), Some(SectionId::About));
        assert_eq!(section_for_key(Char('4'), Focus::Page), Some(SectionId::Social));
        assert_eq!(section_for_key(Char('0'), Focus::Page), None);
        assert_eq!(section_for_key(Char('5'), Focus::Page), None);
        assert_eq!(section_for_key(Char('x'), Focus::Page), None);
        assert_eq!(section_for_key(ArrowDown, Focus::Page), None);
    }

    #[test]
    fn test_digit_ignored_in_text_entry() {
        assert_eq!(section_for_key(Char('2'), Focus::TextEntry), None);
    }

    #[test]
    fn test_full_sequence_activates_once() {
        let mut m = SequenceMatcher::konami();
        let hits: Vec<bool> = KONAMI.iter().map(|&k| m.feed(k)).collect();
        assert_eq!(hits.iter().filter(|&&h| h).count(), 1);
        assert!(hits[KONAMI.len() - 1]);
        assert!(m.is_activated());
    }

    #[test]
    fn test_short_mismatch_resets() {
        let mut m = SequenceMatcher::konami();
        for k in [ArrowUp, ArrowUp, ArrowDown, ArrowLeft] {
            m.feed(k);
        }
        assert!(!m.is_activated());
        assert_eq!(m.position(), 0);
    }

    #[test]
    fn test_mismatch_at_eighth_key_resets_to_zero() {
        let mut m = SequenceMatcher::konami();
        for k in [ArrowUp, ArrowUp, ArrowDown, ArrowDown, ArrowLeft, ArrowRight, ArrowLeft] {
            m.feed(k);
        }
        assert_eq!(m.position(), 7);
        m.feed(Char('x'));
        assert_eq!(m.position(), 0);
        // No partial credit: a matching first key only gets back to 1.
        m.feed(ArrowUp);
        assert_eq!(m.position(), 1);
    }

    #[test]
    fn test_activation_is_terminal() {
        let mut m = SequenceMatcher::konami();
        for &k in KONAMI {
            m.feed(k);
        }
        for k in [Char('x'), ArrowUp, Other] {
            assert!(!m.feed(k));
            assert!(m.is_activated());
        }
        for &k in KONAMI {
            assert!(!m.feed(k));
        }
    }

    #[test]
    fn test_from_iced_keys() {
        use iced::keyboard::key::Named;
        assert_eq!(Key::from_iced(&keyboard::Key::Named(Named::ArrowLeft)), ArrowLeft);
        assert_eq!(Key::from_iced(&keyboard::Key::Character("b".into())), Char('b'));
        assert_eq!(Key::from_iced(&keyboard::Key::Character("ab".into())), Other);
        assert_eq!(Key::from_iced(&keyboard::Key::Named(Named::Escape)), Other);
    }
}
