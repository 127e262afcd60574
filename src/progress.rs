// ─── SCROLL PROGRESS & PARALLAX ─────────────────────────────────
//
// Decorative values derived from the scroll position. Nothing here
// feeds back into navigation state.

/// Vertical scroll position as a fraction of the scrollable distance.
pub fn scroll_progress(offset: f32, viewport_height: f32, content_height: f32) -> f32 {
    let scrollable = content_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (offset / scrollable).clamp(0.0, 1.0)
}

/// Map `value` linearly from `input` onto `output`, clamped at both ends.
pub fn map_range(value: f32, input: (f32, f32), output: (f32, f32)) -> f32 {
    let (i0, i1) = input;
    let (o0, o1) = output;
    if (i1 - i0).abs() < f32::EPSILON {
        return o0;
    }
    let t = ((value - i0) / (i1 - i0)).clamp(0.0, 1.0);
    o0 + (o1 - o0) * t
}

/// Hero parallax: fades out and drifts down over the first 60% of the
/// hero's own height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub opacity: f32,
    pub offset_y: f32,
}

pub fn hero_parallax(offset: f32, hero_height: f32) -> Parallax {
    let p = if hero_height > 0.0 { (offset / hero_height).clamp(0.0, 1.0) } else { 0.0 };
    Parallax {
        opacity: map_range(p, (0.0, 0.6), (1.0, 0.0)),
        offset_y: map_range(p, (0.0, 0.6), (0.0, 60.0)),
    }
}

// ─── CHROME VISIBILITY ──────────────────────────────────────────

pub const NAV_SOLID_AFTER_PX: f32 = 50.0;
pub const DOT_NAV_AFTER: f32 = 0.3;
pub const BACK_TO_TOP_AFTER: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chrome {
    /// Navbar gets its solid background.
    pub nav_solid: bool,
    pub dot_nav: bool,
    pub back_to_top: bool,
}

pub fn chrome_for(offset: f32, viewport_height: f32) -> Chrome {
    Chrome {
        nav_solid: offset > NAV_SOLID_AFTER_PX,
        dot_nav: offset > viewport_height * DOT_NAV_AFTER,
        back_to_top: offset > viewport_height * BACK_TO_TOP_AFTER,
    }
}

// ─── SPRING ─────────────────────────────────────────────────────

/// Damped spring following a moving target (unit mass).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub value: f32,
    velocity: f32,
    target: f32,
    stiffness: f32,
    damping: f32,
}

const MAX_SUBSTEP: f32 = 1.0 / 120.0;
const REST_DELTA: f32 = 0.001;

impl Spring {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self { value: 0.0, velocity: 0.0, target: 0.0, stiffness, damping }
    }

    /// The progress-bar spring.
    pub fn progress_bar() -> Self {
        Self::new(200.0, 30.0)
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump straight to the target, e.g. under reduced motion.
    pub fn snap(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_DELTA
    }

    /// Advance by `dt` seconds using semi-implicit Euler substeps.
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.snap();
            return;
        }
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += force * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
    }
}
