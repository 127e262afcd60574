#![windows_subsystem = "windows"]

mod content;
mod desktop;
mod doodle;
mod effects;
mod preferences;
mod progress;
mod scroll;
mod sections;
mod shortcuts;
mod storage;
mod supervisor;
mod theme;
mod theme_store;
mod timer;
mod tracker;
mod tween;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use preferences::Preferences;
use theme::Skin;
use ui::Folio;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Single-page portfolio viewer")]
struct Args {
    /// Visual treatment: dev or paper. Overrides the saved preference.
    #[arg(long, value_enum)]
    skin: Option<Skin>,

    /// Disable animated scrolling and transitions.
    #[arg(long)]
    reduced_motion: bool,

    /// Where preferences and the stored theme live.
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let dir = args.config_dir.unwrap_or_else(preferences::config_dir);
    let mut prefs = Preferences::load(&dir);
    if let Some(skin) = args.skin {
        prefs.skin = skin;
    }
    if args.reduced_motion {
        prefs.reduced_motion = Some(true);
    }
    tracing::info!("Starting folio ({} skin, config in {})", prefs.skin.name(), dir.display());

    iced::application(Folio::title, Folio::update, Folio::view)
        .subscription(Folio::subscription)
        .theme(Folio::theme)
        .window(iced::window::Settings {
            size: ui::DEFAULT_WINDOW,
            min_size: Some(iced::Size::new(360.0, 480.0)),
            exit_on_close_request: false,
            #[cfg(target_os = "linux")]
            platform_specific: iced::window::settings::PlatformSpecific {
                application_id: String::from("folio"),
                ..Default::default()
            },
            ..Default::default()
        })
        .run_with(move || Folio::new(prefs, dir))
}
