//! Timed text and number effects, all driven by [`Tween`].

use std::time::{Duration, Instant};

use crate::scroll::Anchor;
use crate::timer::Timeout;
use crate::tracker::Viewport;
use crate::tween::{Easing, Tween, EXPO_OUT};

// ─── TYPEWRITER ─────────────────────────────────────────────────

const TYPE_PER_CHAR: Duration = Duration::from_millis(60);
const DELETE_PER_CHAR: Duration = Duration::from_millis(35);
const HOLD: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Deleting,
}

/// Types a word, holds it, deletes it, moves on to the next one. Forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    words: &'static [&'static str],
    index: usize,
    phase: Phase,
    chars: Tween,
    hold: Timeout,
}

impl Typewriter {
    pub fn new(words: &'static [&'static str], now: Instant) -> Self {
        let first = words.first().copied().unwrap_or("");
        Self {
            words,
            index: 0,
            phase: Phase::Typing,
            chars: typing_tween(first, now),
            hold: Timeout::new(),
        }
    }

    fn word(&self) -> &'static str {
        self.words.get(self.index).copied().unwrap_or("")
    }

    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            Phase::Typing if self.chars.is_finished(now) => {
                self.phase = Phase::Holding;
                self.hold.arm(now, HOLD);
            }
            Phase::Holding if self.hold.fire(now) => {
                let len = self.word().chars().count() as f32;
                let duration = DELETE_PER_CHAR * len as u32;
                self.chars = Tween::new(len, 0.0, duration, Easing::Linear, now);
                self.phase = Phase::Deleting;
            }
            Phase::Deleting if self.chars.is_finished(now) => {
                if !self.words.is_empty() {
                    self.index = (self.index + 1) % self.words.len();
                }
                self.chars = typing_tween(self.word(), now);
                self.phase = Phase::Typing;
            }
            _ => {}
        }
    }

    /// Visible prefix of the current word.
    pub fn displayed(&self, now: Instant) -> &'static str {
        let word = self.word();
        let len = word.chars().count();
        let shown = match self.phase {
            Phase::Typing => self.chars.value(now).floor() as usize,
            Phase::Holding => len,
            Phase::Deleting => self.chars.value(now).ceil() as usize,
        };
        let end = word
            .char_indices()
            .nth(shown.min(len))
            .map(|(i, _)| i)
            .unwrap_or(word.len());
        &word[..end]
    }

    pub fn cancel(&mut self, now: Instant) {
        self.chars.cancel(now);
        self.hold.cancel();
    }
}

fn typing_tween(word: &str, now: Instant) -> Tween {
    let len = word.chars().count() as u32;
    Tween::new(0.0, len as f32, TYPE_PER_CHAR * len, Easing::Linear, now)
}

// ─── COUNTER ────────────────────────────────────────────────────

const COUNT_DURATION: Duration = Duration::from_millis(1400);
const COUNT_STEPS: u32 = 40;

/// Counts up to `target` once, the first time it is started.
#[derive(Debug, Clone)]
pub struct Counter {
    target: u32,
    tween: Option<Tween>,
}

impl Counter {
    pub fn new(target: u32) -> Self {
        Self { target, tween: None }
    }

    #[cfg(test)]
    pub fn is_started(&self) -> bool {
        self.tween.is_some()
    }

    pub fn start(&mut self, now: Instant, instant: bool) {
        if self.tween.is_some() {
            return;
        }
        let duration = if instant { Duration::ZERO } else { COUNT_DURATION };
        self.tween = Some(
            Tween::new(0.0, self.target as f32, duration, Easing::OutCubic, now).stepped(COUNT_STEPS),
        );
    }

    pub fn value(&self, now: Instant) -> u32 {
        match &self.tween {
            Some(t) if t.is_finished(now) => self.target,
            Some(t) => t.value(now).round() as u32,
            None => 0,
        }
    }

    pub fn cancel(&mut self, now: Instant) {
        if let Some(t) = self.tween.as_mut() {
            t.cancel(now);
        }
    }
}

/// `1200` → `"1,200"`.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ─── REVEAL ─────────────────────────────────────────────────────

pub const REVEAL_DURATION: Duration = Duration::from_millis(700);
/// How far inside the viewport an element must be before it reveals.
pub const REVEAL_MARGIN: f32 = 80.0;

/// One-shot fade/slide-in, played the first time content comes into view.
#[derive(Debug, Clone, Default)]
pub struct Reveal {
    tween: Option<Tween>,
}

impl Reveal {
    pub fn trigger(&mut self, now: Instant, delay: Duration, duration: Duration) {
        if self.tween.is_none() {
            self.tween = Some(Tween::new(0.0, 1.0, duration, Easing::Bezier(EXPO_OUT), now).with_delay(delay));
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.tween.is_some()
    }

    /// 0.0 hidden … 1.0 fully revealed.
    pub fn amount(&self, now: Instant) -> f32 {
        self.tween.as_ref().map(|t| t.value(now)).unwrap_or(0.0)
    }

    #[cfg(test)]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.tween.as_ref().is_some_and(|t| !t.is_finished(now))
    }

    pub fn reset(&mut self) {
        self.tween = None;
    }
}

/// Whether the anchor overlaps the viewport shrunk by `margin` on both ends.
pub fn is_in_view(anchor: &Anchor, viewport: Viewport, margin: f32) -> bool {
    let start = viewport.offset + margin;
    let end = viewport.offset + viewport.height - margin;
    anchor.top < end && anchor.bottom() > start
}
