use iced::font::{Style, Weight};
use iced::widget::canvas::Canvas;
use iced::widget::{button, column, container, row, text, text_input, Column, Row, Space};
use iced::{Alignment, Background, Border, Color, Element, Font, Length, Size, Theme};

use super::{eyebrow, link_button, panel, rule, Message, MONO};
use crate::content::{self, Copy, Project, ProjectKind, Status};
use crate::doodle::{Doodle, Shape};
use crate::effects::group_thousands;
use crate::progress::Parallax;
use crate::sections::{counter_label, SectionId};
use crate::theme::{Palette, Skin};

// ─── SECTION GEOMETRY ───────────────────────────────────────────
//
// Sections render into fixed-height slots so anchor positions are known
// without measuring the widget tree.

pub const FOOTER_HEIGHT: f32 = 140.0;
const HERO_MIN_HEIGHT: f32 = 600.0;
const ABOUT_HEIGHT: f32 = 1240.0;
const ABOUT_PAPER_EXTRA: f32 = 120.0;
const COMPACT_EXTRA: f32 = 360.0;
const PROJECTS_CHROME: f32 = 380.0;
const CARD_HEIGHT: f32 = 210.0;
const CARD_GAP: f32 = 20.0;
const PROJECTS_EMPTY: f32 = 120.0;
const SOCIAL_HEIGHT: f32 = 940.0;
/// Vertical travel of a section's content while it reveals.
const REVEAL_SLIDE: f32 = 30.0;
const CONTENT_WIDTH: f32 = 880.0;
const WIDE_CONTENT_WIDTH: f32 = 1040.0;

pub fn heights(skin: Skin, window: Size, projects: usize) -> [(SectionId, f32); 4] {
    let compact = window.width < super::COMPACT_WIDTH;
    let extra = if compact { COMPACT_EXTRA } else { 0.0 };
    let about = ABOUT_HEIGHT + extra + if skin == Skin::Paper { ABOUT_PAPER_EXTRA } else { 0.0 };
    let cards = if projects == 0 {
        PROJECTS_EMPTY
    } else {
        projects as f32 * (CARD_HEIGHT + CARD_GAP)
    };
    [
        (SectionId::Home, window.height.max(HERO_MIN_HEIGHT)),
        (SectionId::About, about),
        (SectionId::Projects, PROJECTS_CHROME + cards),
        (SectionId::Social, SOCIAL_HEIGHT + extra),
    ]
}

// ─── TYPOGRAPHY ─────────────────────────────────────────────────

fn display_font(skin: Skin) -> Font {
    match skin {
        Skin::Dev => Font { weight: Weight::Bold, ..Font::DEFAULT },
        Skin::Paper => Font { weight: Weight::Semibold, ..Font::with_name("serif") },
    }
}

fn body_font(skin: Skin) -> Font {
    match skin {
        Skin::Dev => Font::DEFAULT,
        Skin::Paper => Font::with_name("serif"),
    }
}

const ITALIC: Font = Font { style: Style::Italic, ..Font::DEFAULT };

/// Level-1 heading. Dev gets a numbered eyebrow, Paper a centred rule.
fn heading<'a>(skin: Skin, id: SectionId, title: &'a str, p: &Palette) -> Element<'a, Message> {
    match skin {
        Skin::Dev => column![
            eyebrow(format!("{:02} — {}", id.ordinal(), id.label().to_uppercase()), p.accent),
            text(title).size(40).font(display_font(skin)).color(p.text),
        ]
        .spacing(12)
        .into(),
        Skin::Paper => column![
            text(title).size(28).font(display_font(skin)).color(p.text),
            rule(p.accent, Length::Fixed(64.0)),
        ]
        .spacing(16)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into(),
    }
}

fn subheading<'a>(skin: Skin, title: &'a str, p: &Palette) -> Element<'a, Message> {
    text(title).size(20).font(display_font(skin)).color(p.text).into()
}

/// APA-style folio number at the foot of a Paper section.
fn page_number<'a>(skin: Skin, n: usize, p: &Palette) -> Element<'a, Message> {
    match skin {
        Skin::Dev => Space::new(0, 0).into(),
        Skin::Paper => container(text(n.to_string()).size(12).font(MONO).color(p.faint))
            .center_x(Length::Fill)
            .into(),
    }
}

fn status_dot<'a>(color: Color) -> Element<'a, Message> {
    container(Space::new(6, 6))
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(color)),
            border: Border { radius: 3.0.into(), ..Default::default() },
            ..Default::default()
        })
        .into()
}

fn status_line<'a>(label: &'a str, p: &Palette) -> Element<'a, Message> {
    row![status_dot(p.accent), text(label).size(12).font(ITALIC).color(p.muted)]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}

/// Centre `content` in a column no wider than `max_width`, pushed down by
/// the unrevealed part of the slide.
fn frame<'a>(content: Column<'a, Message>, max_width: f32, reveal: f32) -> Element<'a, Message> {
    let slide = (1.0 - reveal.clamp(0.0, 1.0)) * REVEAL_SLIDE;
    container(column![Space::with_height(slide), content.max_width(max_width)])
        .center_x(Length::Fill)
        .padding([80, 24])
        .into()
}

fn cta<'a>(label: &'a str, target: SectionId, filled: bool, p: &Palette) -> Element<'a, Message> {
    let accent = p.accent;
    let bg = p.bg;
    let text_c = p.text;
    let rule_c = p.rule;
    button(text(label).size(14))
        .on_press(Message::NavTo(target))
        .padding([12, 24])
        .style(move |_: &Theme, status| {
            let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
            if filled {
                button::Style {
                    background: Some(Background::Color(if hovered { text_c } else { accent })),
                    text_color: bg,
                    border: Border { radius: 2.0.into(), ..Default::default() },
                    ..Default::default()
                }
            } else {
                button::Style {
                    background: None,
                    text_color: if hovered { accent } else { text_c },
                    border: Border {
                        color: if hovered { accent } else { rule_c },
                        width: 1.0,
                        radius: 2.0.into(),
                    },
                    ..Default::default()
                }
            }
        })
        .into()
}

// ─── HERO ───────────────────────────────────────────────────────

pub struct HeroState {
    pub skin: Skin,
    pub typed: &'static str,
    pub cursor_on: bool,
    pub star: f32,
    pub active: SectionId,
    pub parallax: Parallax,
    pub reveal: f32,
    pub compact: bool,
}

pub fn hero<'a>(s: HeroState, p: &Palette) -> Element<'a, Message> {
    let p = p.faded(s.reveal * s.parallax.opacity);
    let name_size: u16 = if s.compact { 56 } else { 96 };
    let font = display_font(s.skin);

    let name = row![
        text(content::OWNER).size(name_size).font(font).color(p.text),
        text(".").size(name_size).font(font).color(p.accent),
        Canvas::new(Doodle { shape: Shape::Star, progress: s.star, color: p.accent })
            .width(Length::Fixed(56.0))
            .height(Length::Fixed(56.0)),
    ]
    .align_y(Alignment::Start);

    let role = row![
        text(s.typed).size(22).font(MONO).color(p.body),
        text(if s.cursor_on { "|" } else { " " }).size(22).font(MONO).color(p.accent),
    ];

    let description = text(content::HERO_DESCRIPTION)
        .size(16)
        .font(body_font(s.skin))
        .color(p.muted)
        .width(if s.compact { Length::Fill } else { Length::Fixed(560.0) });

    let ctas = row![
        cta("View Work", SectionId::Projects, true, &p),
        cta("About Me", SectionId::About, false, &p),
    ]
    .spacing(12);

    let body = column![
        eyebrow(content::HERO_EYEBROW, p.muted),
        Space::with_height(24),
        name,
        Space::with_height(8),
        role,
        Space::with_height(20),
        description,
        Space::with_height(36),
        ctas,
    ]
    .max_width(WIDE_CONTENT_WIDTH);

    let foot = row![
        eyebrow("Scroll", p.faint),
        Space::with_width(Length::Fill),
        eyebrow(counter_label(s.active), p.faint),
    ];

    let slide = (1.0 - s.reveal.clamp(0.0, 1.0)) * REVEAL_SLIDE;
    container(
        column![
            Space::with_height(Length::Fill),
            Space::with_height(s.parallax.offset_y + slide),
            body,
            Space::with_height(Length::Fill),
            foot,
        ]
        .max_width(WIDE_CONTENT_WIDTH)
        .height(Length::Fill),
    )
    .center_x(Length::Fill)
    .height(Length::Fill)
    .padding([32, 24])
    .into()
}

// ─── ABOUT ──────────────────────────────────────────────────────

pub fn about<'a>(
    skin: Skin,
    copy: &'static Copy,
    counts: &[u32],
    reveal: f32,
    compact: bool,
    p: &Palette,
) -> Element<'a, Message> {
    let p = p.faded(reveal);
    let body = body_font(skin);

    let details: Vec<Element<Message>> = content::DETAILS
        .iter()
        .map(|d| {
            column![eyebrow(d.label.to_uppercase(), p.faint), text(d.value).size(14).color(p.text)]
                .spacing(4)
                .width(Length::Fill)
                .into()
        })
        .collect();
    let details: Element<Message> = if compact {
        let mut rows = Column::new().spacing(16);
        let mut it = details.into_iter();
        while let Some(first) = it.next() {
            let mut r = Row::new().push(first);
            if let Some(second) = it.next() {
                r = r.push(second);
            }
            rows = rows.push(r.spacing(24));
        }
        rows.into()
    } else {
        Row::with_children(details).spacing(32).into()
    };

    let competences = content::COMPETENCES.iter().fold(Column::new(), |col, c| {
        col.push(rule(p.rule, Length::Fill)).push(
            column![
                text(format!("{}.", c.title)).size(16).font(display_font(skin)).color(p.text),
                text(c.desc).size(14).font(body).color(p.body).line_height(1.7),
            ]
            .spacing(6)
            .padding([16, 0]),
        )
    });

    let stats = content::STATS.iter().enumerate().fold(Row::new().spacing(24), |r, (i, stat)| {
        let count = counts.get(i).copied().unwrap_or(0);
        r.push(
            column![
                text(format!("{}{}", group_thousands(count), stat.suffix))
                    .size(36)
                    .font(display_font(skin))
                    .color(p.text),
                eyebrow(stat.label.to_uppercase(), p.muted),
            ]
            .spacing(6)
            .align_x(Alignment::Center)
            .width(Length::Fill),
        )
    });

    let content = column![
        heading(skin, SectionId::About, copy.about_heading, &p),
        Space::with_height(40),
        text(content::BIO).size(15).font(body).color(p.body).line_height(2.0),
        Space::with_height(40),
        rule(p.rule, Length::Fill),
        Space::with_height(24),
        details,
        Space::with_height(20),
        status_line(copy.about_status, &p),
        Space::with_height(24),
        rule(p.rule, Length::Fill),
        Space::with_height(48),
        subheading(skin, copy.competence_heading, &p),
        Space::with_height(16),
        competences,
        rule(p.rule, Length::Fill),
        Space::with_height(56),
        rule(p.border, Length::Fill),
        container(stats).padding([40, 0]),
        rule(p.border, Length::Fill),
        Space::with_height(40),
        page_number(skin, SectionId::About.ordinal(), &p),
    ];
    frame(content, CONTENT_WIDTH, reveal)
}

// ─── PROJECTS ───────────────────────────────────────────────────

pub fn projects<'a>(
    skin: Skin,
    copy: &'static Copy,
    filter: &'a str,
    list: Vec<&'static Project>,
    zigzag: f32,
    reveal: f32,
    p: &Palette,
) -> Element<'a, Message> {
    let p = p.faded(reveal);

    let text_c = p.text;
    let muted = p.muted;
    let faint = p.faint;
    let accent = p.accent;
    let surface = p.surface;
    let border_c = p.border;
    let search = text_input("Filter by title or tag", filter)
        .on_input(Message::FilterChanged)
        .padding([8, 12])
        .size(13)
        .width(Length::Fixed(240.0))
        .style(move |_: &Theme, status| text_input::Style {
            background: Background::Color(surface),
            border: Border {
                color: match status {
                    text_input::Status::Focused => accent,
                    _ => border_c,
                },
                width: 1.0,
                radius: 4.0.into(),
            },
            icon: muted,
            placeholder: faint,
            value: text_c,
            selection: Color { a: 0.3, ..accent },
        });

    let header = row![
        column![
            eyebrow(copy.projects_eyebrow.to_uppercase(), p.accent),
            text(copy.projects_heading).size(40).font(display_font(skin)).color(p.text),
            Canvas::new(Doodle { shape: Shape::Zigzag, progress: zigzag, color: p.accent })
                .width(Length::Fixed(100.0))
                .height(Length::Fixed(20.0)),
        ]
        .spacing(12),
        Space::with_width(Length::Fill),
        search,
    ]
    .align_y(Alignment::End);

    let cards: Element<Message> = if list.is_empty() {
        container(
            text(format!("No projects match \u{201c}{}\u{201d}.", filter.trim()))
                .size(14)
                .font(ITALIC)
                .color(p.muted),
        )
        .height(Length::Fixed(PROJECTS_EMPTY))
        .center_y(Length::Fixed(PROJECTS_EMPTY))
        .into()
    } else {
        list.into_iter()
            .fold(Column::new().spacing(CARD_GAP), |col, project| col.push(project_card(project, skin, &p)))
            .into()
    };

    let content = column![header, Space::with_height(64), cards];
    frame(content, WIDE_CONTENT_WIDTH, reveal)
}

fn kind_color(kind: ProjectKind, p: &Palette) -> Color {
    match kind {
        ProjectKind::Tool => p.accent,
        ProjectKind::Research => p.accent_blue,
        ProjectKind::Study => p.accent_purple,
    }
}

fn project_card<'a>(project: &'static Project, skin: Skin, p: &Palette) -> Element<'a, Message> {
    let status_c = match project.status {
        Status::Active => p.ok,
        Status::InProgress => p.accent,
        Status::Completed => p.muted,
    };
    let dot = || text("·").size(11).font(MONO).color(p.faint);
    let meta = row![
        text(project.kind.label().to_uppercase()).size(11).font(MONO).color(kind_color(project.kind, p)),
        dot(),
        text(project.year).size(11).font(MONO).color(p.muted),
        dot(),
        text(project.status.label()).size(11).font(MONO).color(status_c),
    ]
    .spacing(8);

    let tags = project
        .tags
        .iter()
        .fold(Row::new().spacing(6), |r, tag| r.push(tag_chip(*tag, p)));

    let link: Element<Message> = match project.link {
        Some(url) => link_button("View source \u{2197}", 12, p.muted, p.accent, Message::OpenLink(url)),
        None => Space::new(0, 0).into(),
    };

    let inner = column![
        meta,
        text(project.title).size(22).font(display_font(skin)).color(p.text),
        text(project.description).size(14).font(body_font(skin)).color(p.body),
        Space::with_height(Length::Fill),
        row![tags, Space::with_width(Length::Fill), link].align_y(Alignment::Center),
    ]
    .spacing(8)
    .height(Length::Fill);

    container(panel(inner.into(), p)).height(Length::Fixed(CARD_HEIGHT)).into()
}

fn tag_chip<'a>(tag: &'static str, p: &Palette) -> Element<'a, Message> {
    let border_c = p.rule;
    container(text(tag).size(10).font(MONO).color(p.muted))
        .padding([2, 8])
        .style(move |_: &Theme| container::Style {
            border: Border { color: border_c, width: 1.0, radius: 4.0.into() },
            ..Default::default()
        })
        .into()
}

// ─── SOCIAL ─────────────────────────────────────────────────────

pub struct SocialState<'a> {
    pub skin: Skin,
    pub copy: &'static Copy,
    pub clock: &'a str,
    pub copied: bool,
    pub crown: f32,
    pub reveal: f32,
}

pub fn social<'a>(s: SocialState<'a>, p: &Palette) -> Element<'a, Message> {
    let p = p.faded(s.reveal);
    let skin = s.skin;

    let links = content::SOCIAL_LINKS.iter().fold(Column::new(), |col, link| {
        col.push(rule(p.rule, Length::Fill))
            .push(contact_row(link.label, link.value, Message::OpenLink(link.href), "\u{2197}", &p))
    });
    let copy_label = if s.copied { "Copied \u{2713}" } else { "Copy" };
    let links = links
        .push(rule(p.rule, Length::Fill))
        .push(contact_row("Email", content::EMAIL, Message::CopyEmail, copy_label, &p))
        .push(rule(p.rule, Length::Fill));

    let footnote = row![
        status_line(s.copy.availability, &p),
        Space::with_width(Length::Fill),
        eyebrow(format!("IST {}", s.clock), p.faint),
    ]
    .align_y(Alignment::Center);

    let content = column![
        row![
            container(heading(skin, SectionId::Social, s.copy.contact_heading, &p)).width(Length::Fill),
            Canvas::new(Doodle { shape: Shape::Crown, progress: s.crown, color: p.accent })
                .width(Length::Fixed(60.0))
                .height(Length::Fixed(36.0)),
        ]
        .align_y(Alignment::Center),
        Space::with_height(40),
        text(s.copy.contact_note).size(15).font(body_font(skin)).color(p.body).line_height(2.0),
        Space::with_height(40),
        subheading(skin, s.copy.contact_list_heading, &p),
        Space::with_height(16),
        links,
        Space::with_height(40),
        rule(p.rule, Length::Fill),
        Space::with_height(24),
        footnote,
        Space::with_height(40),
        page_number(skin, SectionId::Social.ordinal(), &p),
    ];
    frame(content, CONTENT_WIDTH, s.reveal)
}

fn contact_row<'a>(
    label: &'static str,
    value: &'static str,
    on_press: Message,
    action: &'static str,
    p: &Palette,
) -> Element<'a, Message> {
    let text_c = p.text;
    let accent = p.accent;
    let hover_bg = Color { a: 0.06, ..p.accent };
    button(
        row![
            column![eyebrow(label.to_uppercase(), p.faint), text(value).size(14)].spacing(4),
            Space::with_width(Length::Fill),
            text(action).size(12).font(MONO),
        ]
        .align_y(Alignment::Center),
    )
    .on_press(on_press)
    .width(Length::Fill)
    .padding([16, 12])
    .style(move |_: &Theme, status| {
        let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
        button::Style {
            background: hovered.then_some(Background::Color(hover_bg)),
            text_color: if hovered { accent } else { text_c },
            border: Border::default(),
            ..Default::default()
        }
    })
    .into()
}

// ─── FOOTER ─────────────────────────────────────────────────────

pub fn footer(copyright: String, easter_egg: bool, p: &Palette) -> Element<'static, Message> {
    let secret: Element<Message> = if easter_egg {
        text(content::EASTER_EGG).size(12).font(ITALIC).color(p.accent).into()
    } else {
        Space::new(0, 0).into()
    };
    column![
        rule(p.border, Length::Fill),
        row![
            eyebrow(copyright, p.faint),
            Space::with_width(Length::Fill),
            secret,
            Space::with_width(Length::Fill),
            link_button("Top \u{2191}", 12, p.muted, p.accent, Message::NavTo(SectionId::Home)),
        ]
        .align_y(Alignment::Center)
        .padding([40, 48]),
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: Size = Size::new(1200.0, 800.0);

    #[test]
    fn test_hero_fills_viewport() {
        let h = heights(Skin::Dev, WIDE, 5);
        assert_eq!(h[0], (SectionId::Home, 800.0));
        let short = heights(Skin::Dev, Size::new(1200.0, 300.0), 5);
        assert_eq!(short[0].1, HERO_MIN_HEIGHT);
    }

    #[test]
    fn test_heights_follow_table_order() {
        let ids: Vec<SectionId> = heights(Skin::Paper, WIDE, 2).iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, SectionId::ALL.to_vec());
    }

    #[test]
    fn test_projects_grow_with_cards() {
        let one = heights(Skin::Dev, WIDE, 1)[2].1;
        let five = heights(Skin::Dev, WIDE, 5)[2].1;
        assert_eq!(five - one, 4.0 * (CARD_HEIGHT + CARD_GAP));
        assert_eq!(heights(Skin::Dev, WIDE, 0)[2].1, PROJECTS_CHROME + PROJECTS_EMPTY);
    }

    #[test]
    fn test_compact_and_paper_get_room() {
        let narrow = Size::new(600.0, 800.0);
        assert!(heights(Skin::Dev, narrow, 5)[1].1 > heights(Skin::Dev, WIDE, 5)[1].1);
        assert!(heights(Skin::Paper, WIDE, 5)[1].1 > heights(Skin::Dev, WIDE, 5)[1].1);
    }
}
