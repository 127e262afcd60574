use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, column, container, mouse_area, row, text, Column, Row, Space};
use iced::{Alignment, Background, Border, Color, Element, Length, Theme};

use super::{link_button, rule, themed_bar, Message, MONO};
use crate::content;
use crate::sections::{SectionId, SECTIONS};
use crate::theme::{Palette, Skin};

const NAV_HEIGHT: f32 = 64.0;

// ─── PROGRESS LINE ──────────────────────────────────────────────

/// Reading progress pinned to the top edge.
pub fn progress_line(value: f32, p: &Palette) -> Element<'static, Message> {
    column![themed_bar(value, p.accent, Color::TRANSPARENT), Space::with_height(Length::Fill)].into()
}

// ─── NAVBAR ─────────────────────────────────────────────────────

pub struct NavbarState {
    pub active: SectionId,
    /// Past the top of the page; draw an opaque bar.
    pub solid: bool,
    pub light: bool,
    pub skin: Skin,
    pub compact: bool,
    pub menu_open: bool,
}

pub fn navbar(s: NavbarState, p: &Palette) -> Element<'static, Message> {
    let brand = link_button(
        format!("{}.", content::OWNER),
        18,
        p.text,
        p.accent,
        Message::NavTo(SectionId::Home),
    );

    let mut bar = Row::new().push(brand).push(Space::with_width(Length::Fill));
    if !s.compact {
        for section in SECTIONS {
            let color = if section.id == s.active { p.accent } else { p.muted };
            bar = bar.push(link_button(section.label, 13, color, p.text, Message::NavTo(section.id)));
        }
        bar = bar.push(Space::with_width(16));
    }

    let theme_label = if s.light { "Dark" } else { "Light" };
    let skin_label = match s.skin {
        Skin::Dev => "Paper",
        Skin::Paper => "Dev",
    };
    bar = bar
        .push(chip(theme_label, Message::ToggleTheme, p))
        .push(chip(skin_label, Message::SwitchSkin, p));
    if s.compact {
        bar = bar.push(chip(if s.menu_open { "Close" } else { "Menu" }, Message::ToggleMenu, p));
    }

    let bg = if s.solid { p.nav_bg } else { Color::TRANSPARENT };
    let border_c = if s.solid { p.border } else { Color::TRANSPARENT };
    let inner = container(bar.spacing(4).align_y(Alignment::Center))
        .width(Length::Fill)
        .height(Length::Fixed(NAV_HEIGHT))
        .align_y(Vertical::Center)
        .padding([0, 24])
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(bg)),
            ..Default::default()
        });
    column![inner, rule(border_c, Length::Fill)].into()
}

/// Outlined mono button for the navbar toggles.
fn chip(label: &'static str, on_press: Message, p: &Palette) -> Element<'static, Message> {
    let muted = p.muted;
    let accent = p.accent;
    let rule_c = p.rule;
    button(text(label).size(11).font(MONO))
        .on_press(on_press)
        .padding([4, 10])
        .style(move |_: &Theme, status| {
            let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
            button::Style {
                background: None,
                text_color: if hovered { accent } else { muted },
                border: Border {
                    color: if hovered { accent } else { rule_c },
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        })
        .into()
}

// ─── MOBILE MENU ────────────────────────────────────────────────

/// Full-width section list shown under the navbar on narrow windows.
pub fn mobile_menu(active: SectionId, p: &Palette) -> Element<'static, Message> {
    let links = SECTIONS.iter().fold(Column::new().spacing(8), |col, section| {
        let color = if section.id == active { p.accent } else { p.text };
        col.push(
            row![
                text(format!("{:02}", section.ordinal)).size(12).font(MONO).color(p.faint),
                link_button(section.label, 32, color, p.accent, Message::NavTo(section.id)),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        )
    });

    let bg = p.bg;
    column![
        Space::with_height(NAV_HEIGHT + 1.0),
        container(links)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding([32, 24])
            .style(move |_: &Theme| container::Style {
                background: Some(Background::Color(bg)),
                ..Default::default()
            }),
    ]
    .into()
}

// ─── DOT NAVIGATOR ──────────────────────────────────────────────

/// One dot per section down the right edge; hovering names it.
pub fn dot_nav(active: SectionId, hovered: Option<SectionId>, p: &Palette) -> Element<'static, Message> {
    let dots = SECTIONS.iter().fold(Column::new().spacing(14).align_x(Alignment::End), |col, section| {
        let is_active = section.id == active;
        let label: Element<Message> = if hovered == Some(section.id) {
            text(section.label.to_uppercase()).size(10).font(MONO).color(p.muted).into()
        } else {
            Space::new(0, 0).into()
        };
        let size = if is_active { 10.0 } else { 6.0 };
        let fill = if is_active { p.accent } else { p.faint };
        let dot = button(Space::new(size, size))
            .on_press(Message::NavTo(section.id))
            .padding(0)
            .style(move |_: &Theme, _| button::Style {
                background: Some(Background::Color(fill)),
                border: Border { radius: (size / 2.0).into(), ..Default::default() },
                ..Default::default()
            });
        col.push(
            mouse_area(row![label, dot].spacing(10).align_y(Alignment::Center))
                .on_enter(Message::DotHovered(Some(section.id)))
                .on_exit(Message::DotHovered(None)),
        )
    });

    container(dots)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Center)
        .padding([0, 28])
        .into()
}

// ─── BACK TO TOP ────────────────────────────────────────────────

pub fn back_to_top(p: &Palette) -> Element<'static, Message> {
    let surface = p.surface;
    let border_c = p.border;
    let text_c = p.muted;
    let accent = p.accent;
    let fab = button(text("\u{2191}").size(16))
        .on_press(Message::NavTo(SectionId::Home))
        .padding([8, 14])
        .style(move |_: &Theme, status| {
            let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
            button::Style {
                background: Some(Background::Color(surface)),
                text_color: if hovered { accent } else { text_c },
                border: Border {
                    color: if hovered { accent } else { border_c },
                    width: 1.0,
                    radius: 20.0.into(),
                },
                ..Default::default()
            }
        });
    container(fab)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Bottom)
        .padding(28)
        .into()
}

// ─── FALLBACK ───────────────────────────────────────────────────

/// Shown in place of the page after a render fault.
pub fn fallback(p: &Palette) -> Element<'static, Message> {
    let bg = p.bg;
    let accent = p.accent;
    let on_accent = p.bg;
    let retry = button(text("Try again").size(14))
        .on_press(Message::Retry)
        .padding([10, 22])
        .style(move |_: &Theme, status| button::Style {
            background: Some(Background::Color(match status {
                button::Status::Hovered | button::Status::Pressed => Color { a: 0.85, ..accent },
                _ => accent,
            })),
            text_color: on_accent,
            border: Border { radius: 2.0.into(), ..Default::default() },
            ..Default::default()
        });
    container(
        column![
            text("Something went wrong.").size(28).color(p.text),
            text("This part of the page failed to render.").size(14).color(p.muted),
            Space::with_height(12),
            retry,
        ]
        .spacing(8)
        .align_x(Alignment::Center),
    )
    .center(Length::Fill)
    .style(move |_: &Theme| container::Style {
        background: Some(Background::Color(bg)),
        ..Default::default()
    })
    .into()
}
