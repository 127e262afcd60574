use std::time::{Duration, Instant};

// ─── EASING ─────────────────────────────────────────────────────

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    cx: f32,
    bx: f32,
    ax: f32,
    cy: f32,
    by: f32,
    ay: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self { cx, bx, ax, cy, by, ay }
    }

    fn sample_x(&self, t: f32) -> f32 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f32) -> f32 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f32) -> f32 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Find the curve parameter whose x equals `x`.
    /// Newton steps first, bisection when the slope is too flat.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let err = self.sample_x(t) - x;
            if err.abs() < 1e-6 {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        while hi - lo > 1e-6 {
            let sx = self.sample_x(t);
            if (sx - x).abs() < 1e-6 {
                break;
            }
            if sx < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }

    pub fn ease(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        self.sample_y(self.solve_t(x))
    }
}

/// The site-wide "expo out" curve.
pub const EXPO_OUT: CubicBezier = CubicBezier::new(0.16, 1.0, 0.3, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    OutCubic,
    Bezier(CubicBezier),
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::Bezier(curve) => curve.ease(t),
        }
    }
}

// ─── TWEEN ──────────────────────────────────────────────────────

/// Animate a value from `from` to `to` over `duration` with an easing
/// curve. Time is always passed in, so tweens are plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    delay: Duration,
    duration: Duration,
    easing: Easing,
    /// Quantize linear progress into this many steps before easing.
    steps: Option<u32>,
    /// Value the tween was frozen at by `cancel`.
    frozen: Option<f32>,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing, now: Instant) -> Self {
        Self {
            from,
            to,
            start: now,
            delay: Duration::ZERO,
            duration,
            easing,
            steps: None,
            frozen: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn stepped(mut self, steps: u32) -> Self {
        self.steps = Some(steps.max(1));
        self
    }

    /// Linear time fraction in [0, 1], after delay and stepping.
    pub fn fraction(&self, now: Instant) -> f32 {
        let begin = self.start + self.delay;
        if now <= begin {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let raw = (now - begin).as_secs_f32() / self.duration.as_secs_f32();
        let raw = raw.clamp(0.0, 1.0);
        match self.steps {
            Some(n) => (raw * n as f32).floor() / n as f32,
            None => raw,
        }
    }

    pub fn value(&self, now: Instant) -> f32 {
        if let Some(v) = self.frozen {
            return v;
        }
        let eased = self.easing.apply(self.fraction(now));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.frozen.is_some() || now >= self.start + self.delay + self.duration
    }

    /// Stop immediately, holding the value reached at `now`.
    pub fn cancel(&mut self, now: Instant) {
        if self.frozen.is_none() {
            self.frozen = Some(self.value(now));
        }
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.frozen.is_some()
    }

    #[cfg(test)]
    pub fn target(&self) -> f32 {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_bezier_endpoints_and_monotonic() {
        assert_eq!(EXPO_OUT.ease(0.0), 0.0);
        assert_eq!(EXPO_OUT.ease(1.0), 1.0);
        let mut prev = 0.0;
        for i in 1..=20 {
            let y = EXPO_OUT.ease(i as f32 / 20.0);
            assert!(y >= prev - 1e-4, "curve dipped at step {i}");
            prev = y;
        }
        // Expo-out front-loads the motion.
        assert!(EXPO_OUT.ease(0.3) > 0.7);
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for x in [0.1, 0.25, 0.5, 0.9] {
            assert!((linear.ease(x) - x).abs() < 1e-3);
        }
    }

    #[test]
    fn test_tween_progression() {
        let t0 = Instant::now();
        let tw = Tween::new(0.0, 100.0, ms(1000), Easing::Linear, t0);
        assert_eq!(tw.value(t0), 0.0);
        assert!((tw.value(t0 + ms(500)) - 50.0).abs() < 0.5);
        assert_eq!(tw.value(t0 + ms(2000)), 100.0);
        assert!(!tw.is_finished(t0 + ms(999)));
        assert!(tw.is_finished(t0 + ms(1000)));
    }

    #[test]
    fn test_tween_delay() {
        let t0 = Instant::now();
        let tw = Tween::new(1.0, 0.0, ms(100), Easing::Linear, t0).with_delay(ms(200));
        assert_eq!(tw.value(t0 + ms(150)), 1.0);
        assert!(!tw.is_finished(t0 + ms(250)));
        assert_eq!(tw.value(t0 + ms(300)), 0.0);
    }

    #[test]
    fn test_stepped_counter_curve() {
        let t0 = Instant::now();
        let tw = Tween::new(0.0, 40.0, ms(1400), Easing::Linear, t0).stepped(40);
        // 1400ms / 40 steps = 35ms per step.
        assert_eq!(tw.value(t0 + ms(34)), 0.0);
        assert_eq!(tw.value(t0 + ms(71)), 2.0);
    }

    #[test]
    fn test_cancel_freezes_value() {
        let t0 = Instant::now();
        let mut tw = Tween::new(0.0, 10.0, ms(100), Easing::Linear, t0);
        tw.cancel(t0 + ms(50));
        assert!(tw.is_cancelled());
        assert!(tw.is_finished(t0 + ms(51)));
        assert!((tw.value(t0 + ms(100)) - 5.0).abs() < 0.1);
    }
}
