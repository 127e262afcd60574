use iced::Color;
use serde::{Deserialize, Serialize};

// ─── THEME MODE ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Literal persisted in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// Only the two exact literals are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn is_light(&self) -> bool {
        matches!(self, ThemeMode::Light)
    }
}

// ─── SKINS ──────────────────────────────────────────────────────

/// Two visual treatments over the same section structure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    /// Minimal developer portfolio.
    #[default]
    Dev,
    /// Academic paper layout.
    Paper,
}

impl Skin {
    pub fn name(&self) -> &'static str {
        match self {
            Skin::Dev => "dev",
            Skin::Paper => "paper",
        }
    }
}

// ─── OS PREFERENCE ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Best-effort OS color-scheme detection.
pub fn system_color_scheme() -> Option<ColorScheme> {
    color_scheme_from(|name| std::env::var(name).ok())
}

fn color_scheme_from(var: impl Fn(&str) -> Option<String>) -> Option<ColorScheme> {
    if let Some(explicit) = var("FOLIO_COLOR_SCHEME") {
        match explicit.to_lowercase().as_str() {
            "light" => return Some(ColorScheme::Light),
            "dark" => return Some(ColorScheme::Dark),
            _ => {}
        }
    }
    if let Some(gtk_theme) = var("GTK_THEME") {
        // "Adwaita:dark", "Yaru-dark" ...
        return Some(if gtk_theme.to_lowercase().contains("dark") {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        });
    }
    if let Some(colorfgbg) = var("COLORFGBG") {
        // COLORFGBG format: "fg;bg" - if bg < 8, it's a dark terminal
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(n) = bg.parse::<u32>() {
                return Some(if n < 8 { ColorScheme::Dark } else { ColorScheme::Light });
            }
        }
    }
    None
}

// ─── PALETTE ────────────────────────────────────────────────────

/// All semantic colors the page uses, derived from skin + mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub nav_bg: Color,
    pub border: Color,
    pub rule: Color,
    pub text: Color,
    pub body: Color,
    pub muted: Color,
    pub faint: Color,
    pub accent: Color,
    pub accent_blue: Color,
    pub accent_purple: Color,
    pub ok: Color,
}

pub fn build_palette(skin: Skin, mode: ThemeMode) -> Palette {
    match (skin, mode) {
        // ── Dev / dark ──
        (Skin::Dev, ThemeMode::Dark) => Palette {
            bg:            hex(0x0c, 0x0c, 0x0e),
            surface:       hex(0x14, 0x14, 0x17),
            nav_bg:        Color::from_rgba(0.047, 0.047, 0.055, 0.85),
            border:        hex(0x23, 0x23, 0x28),
            rule:          hex(0x2e, 0x2e, 0x34),
            text:          hex(0xed, 0xed, 0xef),
            body:          hex(0xa1, 0xa1, 0xaa),
            muted:         hex(0x71, 0x71, 0x7a),
            faint:         hex(0x3f, 0x3f, 0x46),
            accent:        hex(0xe8, 0xa8, 0x7c),
            accent_blue:   hex(0x7c, 0xa8, 0xe8),
            accent_purple: hex(0xb0, 0x8c, 0xe8),
            ok:            hex(0x4a, 0xde, 0x80),
        },
        // ── Dev / light ──
        (Skin::Dev, ThemeMode::Light) => Palette {
            bg:            hex(0xfa, 0xfa, 0xf9),
            surface:       hex(0xf1, 0xf1, 0xef),
            nav_bg:        Color::from_rgba(0.98, 0.98, 0.976, 0.85),
            border:        hex(0xe4, 0xe4, 0xe7),
            rule:          hex(0xd4, 0xd4, 0xd8),
            text:          hex(0x18, 0x18, 0x1b),
            body:          hex(0x52, 0x52, 0x5b),
            muted:         hex(0x71, 0x71, 0x7a),
            faint:         hex(0xd4, 0xd4, 0xd8),
            accent:        hex(0xc2, 0x6a, 0x34),
            accent_blue:   hex(0x2f, 0x6f, 0xc4),
            accent_purple: hex(0x7c, 0x4d, 0xc4),
            ok:            hex(0x16, 0xa3, 0x4a),
        },
        // ── Paper / dark (lamp-lit manuscript) ──
        (Skin::Paper, ThemeMode::Dark) => Palette {
            bg:            hex(0x1a, 0x17, 0x14),
            surface:       hex(0x22, 0x1e, 0x1a),
            nav_bg:        Color::from_rgba(0.10, 0.09, 0.08, 0.9),
            border:        hex(0x3a, 0x33, 0x2c),
            rule:          hex(0x4a, 0x41, 0x38),
            text:          hex(0xec, 0xe4, 0xd6),
            body:          hex(0xc4, 0xb8, 0xa5),
            muted:         hex(0x8f, 0x84, 0x74),
            faint:         hex(0x5a, 0x51, 0x46),
            accent:        hex(0xd4, 0x8a, 0x5a),
            accent_blue:   hex(0x8a, 0xa6, 0xc4),
            accent_purple: hex(0xa8, 0x8f, 0xc0),
            ok:            hex(0x8f, 0xbf, 0x7a),
        },
        // ── Paper / light (ivory stock) ──
        (Skin::Paper, ThemeMode::Light) => Palette {
            bg:            hex(0xfb, 0xf8, 0xf1),
            surface:       hex(0xf3, 0xee, 0xe3),
            nav_bg:        Color::from_rgba(0.984, 0.973, 0.945, 0.9),
            border:        hex(0xdd, 0xd5, 0xc6),
            rule:          hex(0xc9, 0xbf, 0xad),
            text:          hex(0x1f, 0x1b, 0x16),
            body:          hex(0x3d, 0x36, 0x2d),
            muted:         hex(0x6e, 0x64, 0x57),
            faint:         hex(0xc9, 0xbf, 0xad),
            accent:        hex(0x9c, 0x3d, 0x1f),
            accent_blue:   hex(0x2c, 0x55, 0x85),
            accent_purple: hex(0x5e, 0x3f, 0x85),
            ok:            hex(0x3f, 0x7a, 0x2c),
        },
    }
}

impl Palette {
    /// Component-wise blend, `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(&self, other: &Palette, t: f32) -> Palette {
        let t = t.clamp(0.0, 1.0);
        let m = |a: Color, b: Color| lerp_color(a, b, t);
        Palette {
            bg: m(self.bg, other.bg),
            surface: m(self.surface, other.surface),
            nav_bg: m(self.nav_bg, other.nav_bg),
            border: m(self.border, other.border),
            rule: m(self.rule, other.rule),
            text: m(self.text, other.text),
            body: m(self.body, other.body),
            muted: m(self.muted, other.muted),
            faint: m(self.faint, other.faint),
            accent: m(self.accent, other.accent),
            accent_blue: m(self.accent_blue, other.accent_blue),
            accent_purple: m(self.accent_purple, other.accent_purple),
            ok: m(self.ok, other.ok),
        }
    }

    /// Foreground colors scaled by `opacity`; backgrounds stay solid.
    pub fn faded(&self, opacity: f32) -> Palette {
        if opacity >= 1.0 {
            return *self;
        }
        let f = |c: Color| fade(c, opacity);
        Palette {
            border: f(self.border),
            rule: f(self.rule),
            text: f(self.text),
            body: f(self.body),
            muted: f(self.muted),
            faint: f(self.faint),
            accent: f(self.accent),
            accent_blue: f(self.accent_blue),
            accent_purple: f(self.accent_purple),
            ok: f(self.ok),
            ..*self
        }
    }
}

pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::from_rgba(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

/// Same color with its alpha scaled by `opacity`.
pub fn fade(c: Color, opacity: f32) -> Color {
    Color { a: c.a * opacity.clamp(0.0, 1.0), ..c }
}

const fn hex(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_mode_literals() {
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("Light"), None);
        assert_eq!(ThemeMode::parse(""), None);
        assert_eq!(ThemeMode::Light.as_str(), "light");
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_color_scheme_detection() {
        assert_eq!(color_scheme_from(env(&[])), None);
        assert_eq!(
            color_scheme_from(env(&[("FOLIO_COLOR_SCHEME", "light"), ("GTK_THEME", "Adwaita:dark")])),
            Some(ColorScheme::Light)
        );
        assert_eq!(color_scheme_from(env(&[("GTK_THEME", "Adwaita:dark")])), Some(ColorScheme::Dark));
        assert_eq!(color_scheme_from(env(&[("GTK_THEME", "Adwaita")])), Some(ColorScheme::Light));
        assert_eq!(color_scheme_from(env(&[("COLORFGBG", "15;0")])), Some(ColorScheme::Dark));
        assert_eq!(color_scheme_from(env(&[("COLORFGBG", "0;15")])), Some(ColorScheme::Light));
        assert_eq!(color_scheme_from(env(&[("COLORFGBG", "garbage")])), None);
    }

    #[test]
    fn test_palette_mix_endpoints() {
        let dark = build_palette(Skin::Dev, ThemeMode::Dark);
        let light = build_palette(Skin::Dev, ThemeMode::Light);
        assert_eq!(dark.mix(&light, 0.0), dark);
        assert!((dark.mix(&light, 1.0).bg.r - light.bg.r).abs() < 1e-6);
        let mid = dark.mix(&light, 0.5);
        assert!(mid.bg.r > dark.bg.r && mid.bg.r < light.bg.r);
    }

    #[test]
    fn test_faded_keeps_background() {
        let p = build_palette(Skin::Paper, ThemeMode::Light);
        let half = p.faded(0.5);
        assert_eq!(half.bg, p.bg);
        assert_eq!(half.surface, p.surface);
        assert!((half.text.a - 0.5).abs() < 1e-6);
        assert_eq!(p.faded(1.0), p);
    }

    #[test]
    fn test_skin_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Skin::Paper).unwrap(), "\"paper\"");
        let skin: Skin = serde_json::from_str("\"dev\"").unwrap();
        assert_eq!(skin, Skin::Dev);
    }
}
