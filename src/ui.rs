use iced::widget::{button, container, progress_bar, scrollable, text, Space, Stack};
use iced::{
    event, keyboard, mouse, window, Background, Border, Color, Element, Event, Font, Length,
    Shadow, Size, Subscription, Task, Theme, Vector,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::content;
use crate::desktop::{self, Clipboard, SystemClipboard};
use crate::effects::{self, Counter, Reveal, Typewriter, REVEAL_DURATION, REVEAL_MARGIN};
use crate::preferences::Preferences;
use crate::progress::{self, Spring};
use crate::scroll::{self, PageLayout, ScrollBehavior};
use crate::sections::SectionId;
use crate::shortcuts::{self, Focus, Key, SequenceMatcher};
use crate::storage::{self, KeyValueStore};
use crate::supervisor::{RenderError, Supervisor};
use crate::theme::{self, build_palette, Palette, Skin, ThemeMode};
use crate::theme_store::{RootFlags, ThemeStore};
use crate::timer::Timeout;
use crate::tracker::{ActiveSectionTracker, Viewport};
use crate::tween::{Easing, Tween, EXPO_OUT};

mod nav;
mod sections;

// ─── ANIMATION CONSTANTS ────────────────────────────────────────
const ANIM_TICK_MS: u64 = 33; // ~30fps for animations
const CLOCK_TICK: Duration = Duration::from_secs(1);
const PAGE_FADE: Duration = Duration::from_millis(600);
/// Delay between consecutive sections' entry on first mount.
const ENTRY_STAGGER: Duration = Duration::from_millis(150);
const COPY_CONFIRMATION: Duration = Duration::from_secs(2);
/// Menu close animation has to finish before the page scrolls.
const MENU_NAV_DELAY: Duration = Duration::from_millis(50);
const STAR_DELAY: Duration = Duration::from_millis(1200);
const STAR_DRAW: Duration = Duration::from_millis(2000);
const DOODLE_DRAW: Duration = Duration::from_millis(1800);
/// Largest frame step fed to the progress spring.
const MAX_FRAME_DT: f32 = 0.1;
/// Below this width the navbar collapses into a menu button.
const COMPACT_WIDTH: f32 = 768.0;

pub const WINDOW_TITLE: &str = "V. Singh — Portfolio";
pub const DEFAULT_WINDOW: Size = Size::new(1200.0, 820.0);

const MONO: Font = Font::MONOSPACE;

fn page_id() -> scrollable::Id {
    scrollable::Id::new("page")
}

// ─── MESSAGE ────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Message {
    AnimTick,
    ClockTick,
    Scrolled(Viewport),
    Resized(Size),
    /// The user grabbed the scroll wheel.
    Wheel,
    Key(Key, Focus),
    NavTo(SectionId),
    ToggleTheme,
    SwitchSkin,
    ToggleMenu,
    DotHovered(Option<SectionId>),
    FilterChanged(String),
    CopyEmail,
    OpenLink(&'static str),
    Retry,
    Closing,
}

// ─── APP STATE ──────────────────────────────────────────────────

pub struct Folio {
    prefs: Preferences,
    config_dir: PathBuf,
    reduced_motion: bool,
    // Theme
    theme: ThemeStore,
    flags: RootFlags,
    // Navigation
    layout: PageLayout,
    viewport: Viewport,
    window: Size,
    tracker: ActiveSectionTracker,
    scroll_tween: Option<Tween>,
    menu_open: bool,
    pending_nav: Option<SectionId>,
    nav_delay: Timeout,
    hovered_dot: Option<SectionId>,
    konami: SequenceMatcher,
    supervisor: Supervisor,
    // ─── Animation state ───
    mounted: bool,
    started: Instant,
    now: Instant,
    page_fade: Option<Tween>,
    progress: Spring,
    typewriter: Typewriter,
    counters: Vec<Counter>,
    /// One per section, indexed by `SectionId as usize`.
    reveals: [Reveal; 4],
    star: Reveal,
    zigzag: Reveal,
    crown: Reveal,
    // Contact
    clock: String,
    clipboard: Box<dyn Clipboard>,
    copied: bool,
    copy_timer: Timeout,
    filter: String,
    /// Content check run ahead of each page render.
    validate: fn() -> Result<(), RenderError>,
}

impl Folio {
    pub fn new(prefs: Preferences, config_dir: PathBuf) -> (Self, Task<Message>) {
        let storage = storage::open_store(&config_dir);
        let app = Self::with_parts(prefs, config_dir, storage, Box::new(SystemClipboard));
        let size = window::get_latest().and_then(window::get_size).map(Message::Resized);
        (app, size)
    }

    fn with_parts(
        prefs: Preferences,
        config_dir: PathBuf,
        storage: Box<dyn KeyValueStore>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let now = Instant::now();
        let reduced_motion = scroll::prefers_reduced_motion(prefs.reduced_motion);
        let mut flags = RootFlags::default();
        let mut store = ThemeStore::new(storage).with_transition(prefs.theme_transition());
        store.init(theme::system_color_scheme(), &mut flags);
        tracing::info!(
            skin = prefs.skin.name(),
            reduced_motion,
            "Starting with {} theme",
            store.mode().as_str()
        );

        Self {
            reduced_motion,
            theme: store,
            flags,
            layout: PageLayout::empty(DEFAULT_WINDOW.height),
            viewport: Viewport { offset: 0.0, height: DEFAULT_WINDOW.height },
            window: DEFAULT_WINDOW,
            tracker: ActiveSectionTracker::default(),
            scroll_tween: None,
            menu_open: false,
            pending_nav: None,
            nav_delay: Default::default(),
            hovered_dot: None,
            konami: SequenceMatcher::konami(),
            supervisor: Supervisor::new(),
            mounted: false,
            started: now,
            now,
            page_fade: None,
            progress: Spring::progress_bar(),
            typewriter: Typewriter::new(content::ROLES, now),
            counters: fresh_counters(),
            reveals: Default::default(),
            star: Reveal::default(),
            zigzag: Reveal::default(),
            crown: Reveal::default(),
            clock: content::ist_clock(chrono::Utc::now()),
            clipboard,
            copied: false,
            copy_timer: Default::default(),
            filter: String::new(),
            validate: content::validate,
            prefs,
            config_dir,
        }
    }

    pub fn title(&self) -> String {
        String::from(WINDOW_TITLE)
    }

    pub fn theme(&self) -> Theme {
        if self.flags.light { Theme::Light } else { Theme::Dark }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let anim_tick = iced::time::every(Duration::from_millis(ANIM_TICK_MS))
            .map(|_| Message::AnimTick);
        let clock_tick = iced::time::every(CLOCK_TICK).map(|_| Message::ClockTick);
        let events = event::listen_with(route_event);
        Subscription::batch([anim_tick, clock_tick, events])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AnimTick => return self.on_anim_tick(Instant::now()),
            Message::ClockTick => self.clock = content::ist_clock(chrono::Utc::now()),
            Message::Scrolled(viewport) => self.on_scroll(viewport),
            Message::Resized(size) => {
                self.window = size;
                self.viewport.height = size.height;
                if self.mounted {
                    self.relayout();
                }
            }
            Message::Wheel => self.scroll_tween = None,
            Message::Key(key, focus) => {
                if self.konami.feed(key) {
                    tracing::info!("Easter egg unlocked");
                }
                if let Some(id) = shortcuts::section_for_key(key, focus) {
                    return self.navigate(id, Instant::now());
                }
            }
            Message::NavTo(id) => {
                if self.menu_open {
                    self.menu_open = false;
                    self.pending_nav = Some(id);
                    self.nav_delay.arm(Instant::now(), MENU_NAV_DELAY);
                } else {
                    return self.navigate(id, Instant::now());
                }
            }
            Message::ToggleTheme => {
                self.theme.toggle(Instant::now(), &mut self.flags);
            }
            Message::SwitchSkin => {
                self.prefs.skin = match self.prefs.skin {
                    Skin::Dev => Skin::Paper,
                    Skin::Paper => Skin::Dev,
                };
                tracing::info!("Switched to {} skin", self.prefs.skin.name());
                self.save_prefs();
                if self.mounted {
                    self.relayout();
                }
            }
            Message::ToggleMenu => self.menu_open = !self.menu_open,
            Message::DotHovered(id) => self.hovered_dot = id,
            Message::FilterChanged(filter) => {
                self.filter = filter;
                self.relayout();
            }
            Message::CopyEmail => {
                if desktop::copy_text(self.clipboard.as_mut(), content::EMAIL) {
                    self.copied = true;
                    self.copy_timer.arm(Instant::now(), COPY_CONFIRMATION);
                }
            }
            Message::OpenLink(url) => desktop::open_link(url),
            Message::Retry => self.retry(Instant::now()),
            Message::Closing => {
                self.teardown();
                return window::get_latest().and_then(window::close);
            }
        }
        Task::none()
    }

    fn save_prefs(&self) {
        if let Err(e) = self.prefs.save(&self.config_dir) {
            tracing::warn!("Failed to save preferences: {e}");
        }
    }

    fn on_anim_tick(&mut self, now: Instant) -> Task<Message> {
        let dt = now.saturating_duration_since(self.now).as_secs_f32().min(MAX_FRAME_DT);
        self.now = now;
        if !self.mounted {
            self.mount(now);
        }

        self.theme.tick(now, &mut self.flags);
        self.typewriter.tick(now);
        if self.copy_timer.fire(now) {
            self.copied = false;
        }
        self.reveal_visible(now);

        self.progress.set_target(progress::scroll_progress(
            self.viewport.offset,
            self.viewport.height,
            self.layout.content_height(),
        ));
        if self.reduced_motion {
            self.progress.snap();
        } else {
            self.progress.step(dt);
        }

        let mut tasks = Vec::new();
        if self.nav_delay.fire(now) {
            if let Some(id) = self.pending_nav.take() {
                tasks.push(self.navigate(id, now));
            }
        }
        if let Some(tween) = &self.scroll_tween {
            let y = tween.value(now);
            if tween.is_finished(now) {
                self.scroll_tween = None;
            }
            tasks.push(scroll_page_to(y));
        }
        Task::batch(tasks)
    }

    /// First frame after start-up: lay the page out and start observing.
    fn mount(&mut self, now: Instant) {
        self.mounted = true;
        self.relayout();
        self.tracker.observe(SectionId::ALL);
        self.page_fade = Some(Tween::new(0.0, 1.0, self.motion(PAGE_FADE), Easing::Bezier(EXPO_OUT), now));
        self.typewriter = Typewriter::new(content::ROLES, now);
        self.star.trigger(now, self.motion(STAR_DELAY), self.motion(STAR_DRAW));
        tracing::debug!("Page mounted, {} sections observed", SectionId::ALL.len());
    }

    fn relayout(&mut self) {
        let projects = content::filter_projects(&self.filter).len();
        let heights = sections::heights(self.prefs.skin, self.window, projects);
        self.layout = PageLayout::stack(&heights, sections::FOOTER_HEIGHT, self.viewport.height);
        // Keep the tracker honest after a reflow.
        self.tracker.update(self.viewport, &self.layout);
    }

    fn on_scroll(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(id) = self.tracker.update(viewport, &self.layout) {
            tracing::debug!("Active section: #{}", id.anchor());
        }
    }

    /// Align `id` with the top of the viewport, smoothly unless reduced
    /// motion is on. A new request replaces any scroll still in flight.
    fn navigate(&mut self, id: SectionId, now: Instant) -> Task<Message> {
        let behavior = if self.reduced_motion { ScrollBehavior::Instant } else { ScrollBehavior::Smooth };
        if !scroll::scroll_to_section(&mut self.layout, id, behavior) {
            return Task::none();
        }
        let Some(request) = self.layout.take_request() else {
            return Task::none();
        };
        tracing::info!("Navigating to #{}", id.anchor());

        let from = match self.scroll_tween.as_mut() {
            Some(tween) => {
                tween.cancel(now);
                tween.value(now)
            }
            None => self.viewport.offset,
        };
        match request.behavior {
            ScrollBehavior::Instant => {
                self.scroll_tween = None;
                scroll_page_to(request.offset)
            }
            ScrollBehavior::Smooth => {
                self.scroll_tween = Some(Tween::new(
                    from,
                    request.offset,
                    self.prefs.smooth_scroll(),
                    Easing::Bezier(EXPO_OUT),
                    now,
                ));
                Task::none()
            }
        }
    }

    /// Start reveals (and their dependants) for anything now in view.
    fn reveal_visible(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        let mut entered = Vec::new();
        for (i, anchor) in self.layout.anchors().iter().enumerate() {
            let index = anchor.id as usize;
            if self.reveals[index].is_triggered() {
                continue;
            }
            if effects::is_in_view(anchor, self.viewport, REVEAL_MARGIN) {
                let delay = if self.page_fade_done(now) { Duration::ZERO } else { ENTRY_STAGGER * i as u32 };
                self.reveals[index].trigger(now, self.motion(delay), self.motion(REVEAL_DURATION));
                entered.push(anchor.id);
            }
        }
        for id in entered {
            match id {
                SectionId::About => {
                    for counter in &mut self.counters {
                        counter.start(now, self.reduced_motion);
                    }
                }
                SectionId::Projects => self.zigzag.trigger(now, Duration::ZERO, self.motion(DOODLE_DRAW)),
                SectionId::Social => self.crown.trigger(now, Duration::ZERO, self.motion(DOODLE_DRAW)),
                SectionId::Home => {}
            }
        }
    }

    fn page_fade_done(&self, now: Instant) -> bool {
        self.page_fade.as_ref().is_some_and(|t| t.is_finished(now))
    }

    /// `d`, or nothing at all under reduced motion.
    fn motion(&self, d: Duration) -> Duration {
        if self.reduced_motion { Duration::ZERO } else { d }
    }

    /// Re-render the page from scratch after a fault.
    fn retry(&mut self, now: Instant) {
        let generation = self.supervisor.retry();
        for reveal in &mut self.reveals {
            reveal.reset();
        }
        self.star.reset();
        self.zigzag.reset();
        self.crown.reset();
        self.counters = fresh_counters();
        self.mounted = false;
        self.tracker.disconnect();
        self.mount(now);
        tracing::debug!(generation, "Page state reset");
    }

    fn teardown(&mut self) {
        self.theme.teardown(&mut self.flags);
        self.tracker.disconnect();
        for counter in &mut self.counters {
            counter.cancel(self.now);
        }
        self.typewriter.cancel(self.now);
        self.scroll_tween = None;
        tracing::info!("Shutting down");
    }

    // ─── MAIN VIEW ──────────────────────────────────────────────

    /// The palette the view paints with, cross-faded while a theme change
    /// is in flight.
    fn palette(&self) -> Palette {
        let mode = if self.flags.light { ThemeMode::Light } else { ThemeMode::Dark };
        let target = build_palette(self.prefs.skin, mode);
        if !self.flags.transitioning || self.reduced_motion {
            return target;
        }
        match self.theme.transition_progress(self.now) {
            Some(t) => build_palette(self.prefs.skin, mode.toggled()).mix(&target, t),
            None => target,
        }
    }

    fn is_compact(&self) -> bool {
        self.window.width < COMPACT_WIDTH
    }

    pub fn view(&self) -> Element<'_, Message> {
        let p = self.palette();
        match self.supervisor.guard("page", || self.view_page(&p)) {
            Ok(page) => page,
            Err(_) => nav::fallback(&p),
        }
    }

    fn view_page(&self, p: &Palette) -> Result<Element<'_, Message>, RenderError> {
        (self.validate)()?;

        let chrome = progress::chrome_for(self.viewport.offset, self.viewport.height);
        let active = self.tracker.active();
        let compact = self.is_compact();

        let body: Element<Message> = if self.mounted {
            self.view_body(p)
        } else {
            Space::new(Length::Fill, Length::Fill).into()
        };

        let page = scrollable(body)
            .id(page_id())
            .on_scroll(|v| {
                Message::Scrolled(Viewport { offset: v.absolute_offset().y, height: v.bounds().height })
            })
            .width(Length::Fill)
            .height(Length::Fill);

        let bg = p.bg;
        let base = container(page)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_: &Theme| container::Style {
                background: Some(Background::Color(bg)),
                ..Default::default()
            });

        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(base)
            .push(nav::progress_line(self.progress.value, p));
        layers = layers.push(nav::navbar(nav::NavbarState {
            active,
            solid: chrome.nav_solid,
            light: self.flags.light,
            skin: self.prefs.skin,
            compact,
            menu_open: self.menu_open,
        }, p));
        if self.prefs.show_dot_nav && chrome.dot_nav && !compact {
            layers = layers.push(nav::dot_nav(active, self.hovered_dot, p));
        }
        if chrome.back_to_top {
            layers = layers.push(nav::back_to_top(p));
        }
        if self.menu_open && compact {
            layers = layers.push(nav::mobile_menu(active, p));
        }
        Ok(layers.into())
    }

    fn view_body(&self, p: &Palette) -> Element<'_, Message> {
        let now = self.now;
        let fade = self.page_fade.as_ref().map(|t| t.value(now)).unwrap_or(0.0);
        let skin = self.prefs.skin;
        let copy = content::copy(skin);
        let compact = self.is_compact();
        let reveal = |id: SectionId| fade * self.reveals[id as usize].amount(now);

        let mut col = iced::widget::Column::new().width(Length::Fill);
        for anchor in self.layout.anchors() {
            let amount = reveal(anchor.id);
            let section: Element<Message> = match anchor.id {
                SectionId::Home => {
                    let parallax = progress::hero_parallax(self.viewport.offset, anchor.height);
                    sections::hero(sections::HeroState {
                        skin,
                        typed: self.typewriter.displayed(now),
                        cursor_on: cursor_blink(self.started, now),
                        star: self.star.amount(now),
                        active: self.tracker.active(),
                        parallax,
                        reveal: amount,
                        compact,
                    }, p)
                }
                SectionId::About => {
                    let counts: Vec<u32> = self.counters.iter().map(|c| c.value(now)).collect();
                    sections::about(skin, copy, &counts, amount, compact, p)
                }
                SectionId::Projects => sections::projects(
                    skin,
                    copy,
                    &self.filter,
                    content::filter_projects(&self.filter),
                    self.zigzag.amount(now),
                    amount,
                    p,
                ),
                SectionId::Social => sections::social(sections::SocialState {
                    skin,
                    copy,
                    clock: &self.clock,
                    copied: self.copied,
                    crown: self.crown.amount(now),
                    reveal: amount,
                }, p),
            };
            col = col.push(
                container(section)
                    .width(Length::Fill)
                    .height(Length::Fixed(anchor.height))
                    .clip(true),
            );
        }
        col = col.push(
            container(sections::footer(
                content::copyright(chrono::Utc::now()),
                self.konami.is_activated(),
                &p.faded(fade),
            ))
            .width(Length::Fill)
            .height(Length::Fixed(sections::FOOTER_HEIGHT)),
        );
        col.into()
    }
}

fn fresh_counters() -> Vec<Counter> {
    content::STATS.iter().map(|s| Counter::new(s.value)).collect()
}

fn cursor_blink(started: Instant, now: Instant) -> bool {
    (now.saturating_duration_since(started).as_millis() / 530) % 2 == 0
}

fn scroll_page_to(y: f32) -> Task<Message> {
    scrollable::scroll_to(page_id(), scrollable::AbsoluteOffset { x: 0.0, y })
}

/// Raw runtime events the page cares about. A key press a widget already
/// captured (a focused text field) is tagged as text entry.
fn route_event(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            let focus = match status {
                event::Status::Captured => Focus::TextEntry,
                event::Status::Ignored => Focus::Page,
            };
            Some(Message::Key(Key::from_iced(&key), focus))
        }
        Event::Mouse(mouse::Event::WheelScrolled { .. }) => Some(Message::Wheel),
        Event::Window(window::Event::Resized(size)) => Some(Message::Resized(size)),
        Event::Window(window::Event::CloseRequested) => Some(Message::Closing),
        _ => None,
    }
}

// ─── SHARED WIDGET HELPERS ──────────────────────────────────────

fn panel<'a>(content: Element<'a, Message>, p: &Palette) -> Element<'a, Message> {
    let surface = p.surface;
    let border_c = p.border;
    container(content)
        .width(Length::Fill)
        .padding(20)
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(surface)),
            border: Border {
                color: border_c,
                width: 1.0,
                radius: 8.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
            ..Default::default()
        })
        .into()
}

/// Thin horizontal rule.
fn rule<'a>(color: Color, width: impl Into<Length>) -> Element<'a, Message> {
    container(Space::new(width, Length::Fixed(1.0)))
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(color)),
            ..Default::default()
        })
        .into()
}

fn eyebrow<'a>(label: impl text::IntoFragment<'a>, color: Color) -> Element<'a, Message> {
    text(label).size(11).font(MONO).color(color).into()
}

/// Borderless text button tinted with the accent on hover.
fn link_button<'a>(
    label: impl text::IntoFragment<'a>,
    size: u16,
    color: Color,
    hover: Color,
    on_press: Message,
) -> Element<'a, Message> {
    button(text(label).size(size))
        .on_press(on_press)
        .padding([4, 8])
        .style(move |_: &Theme, status| button::Style {
            background: None,
            text_color: match status {
                button::Status::Hovered | button::Status::Pressed => hover,
                _ => color,
            },
            border: Border::default(),
            ..Default::default()
        })
        .into()
}

fn themed_bar(value: f32, color: Color, bar_bg: Color) -> Element<'static, Message> {
    progress_bar(0.0..=1.0, value)
        .width(Length::Fill)
        .height(Length::Fixed(2.0))
        .style(move |_: &Theme| progress_bar::Style {
            background: Background::Color(bar_bg),
            bar: Background::Color(color),
            border: Border { color: Color::TRANSPARENT, width: 0.0, radius: 0.0.into() },
        })
        .into()
}
