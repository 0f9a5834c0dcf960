mod app;
mod catalog;
mod config;
mod error;
mod input;
mod lyrics;
mod player;
mod search;
mod session;
mod tui;
mod view;

use anyhow::Context;
use catalog::models::{Playlist, Record, StreamQuality, Track};
use catalog::{Catalog, CatalogClient, StreamResolver};
use clap::{Parser, Subcommand};
use lyrics::{LyricsLoad, LyricsLoader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cadence", version, about = "Terminal music client for a catalog API")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Search tracks and print to stdout (headless).
    Search { query: String },
    /// Print the charts (headless).
    Charts,
    /// List playlists for a mood: happy, sad, party, chill, workout, romantic.
    Mood { mood: String },
    /// Browse a genre category (headless).
    Genre { category: String },
    /// Print a playlist's tracks (headless).
    Playlist { playlist_id: String },
    /// Search podcasts (headless).
    Podcasts { query: String },
    /// Print a track's lyrics with timestamps.
    Lyrics { track_id: String },
    /// Resolve a track to its stream URL.
    Stream {
        track_id: String,
        #[arg(long)]
        quality: Option<StreamQuality>,
    },
    /// Play a track headlessly and follow its up-next session until it ends.
    Play { track_id: String },
    /// Audio output device management (mpv).
    Audio {
        #[command(subcommand)]
        cmd: AudioCommand,
    },
}

#[derive(Debug, Subcommand)]
enum AudioCommand {
    /// List mpv audio devices.
    List,
    /// Set mpv audio device (name as shown in list).
    Set { device: String },
    /// Clear mpv audio device override.
    Clear,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cadence=info"))
}

/// The TUI owns the terminal, so its logs go to a file.
fn init_file_logging(data_dir: &std::path::Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("create dir {}", data_dir.display()))?;
    let path = data_dir.join("cadence.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };

    let command = cli.command.unwrap_or(Command::Tui);
    if matches!(command, Command::Tui) {
        init_file_logging(&cfg.paths.data_dir)?;
    } else {
        init_stderr_logging();
    }

    let page_size = cfg.search.page_size;
    match command {
        Command::Tui => {
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            let mut app = app::App::new(cfg, cfg_path)?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Search { query } => {
            let catalog = CatalogClient::new(&cfg.api)?;
            print_tracks(&catalog.search(&query, page_size).await?);
        }
        Command::Charts => {
            let catalog = CatalogClient::new(&cfg.api)?;
            print_tracks(&catalog.charts(page_size).await?);
        }
        Command::Mood { mood } => {
            let catalog = CatalogClient::new(&cfg.api)?;
            print_playlists(&catalog.mood_playlists(&mood, page_size).await?);
        }
        Command::Genre { category } => {
            let catalog = CatalogClient::new(&cfg.api)?;
            print_tracks(&catalog.browse_genre(&category, page_size).await?);
        }
        Command::Playlist { playlist_id } => {
            let catalog = CatalogClient::new(&cfg.api)?;
            print_tracks(&catalog.playlist_tracks(&playlist_id, 100).await?);
        }
        Command::Podcasts { query } => {
            let catalog = CatalogClient::new(&cfg.api)?;
            let podcasts = catalog.search_podcasts(&query, page_size).await?;
            for (i, p) in podcasts.iter().enumerate() {
                let card = view::cards::render_card(&Record::Podcast(p.clone()));
                println!("{:02}. {} — {}  (browse_id={})", i + 1, card.title, card.subtitle, p.browse_id);
            }
        }
        Command::Lyrics { track_id } => {
            let catalog = CatalogClient::new(&cfg.api)?;
            let track = Track {
                video_id: track_id,
                ..Track::default()
            };
            match LyricsLoader::new(None).load(&catalog, &track).await {
                LyricsLoad::Lines(lines) => {
                    let sync = lyrics::LyricsSync::new(lines);
                    let timed = sync.is_timed();
                    for l in sync.lines() {
                        if timed {
                            let total = l.start.max(0.0);
                            let mins = (total / 60.0).floor() as u64;
                            println!("[{mins:02}:{:05.2}] {}", total - mins as f64 * 60.0, l.text);
                        } else {
                            println!("{}", l.text);
                        }
                    }
                }
                LyricsLoad::Empty => println!("{}", lyrics::EMPTY_PLACEHOLDER),
                LyricsLoad::Failed(reason) => anyhow::bail!("{}: {reason}", lyrics::FAILED_PLACEHOLDER),
            }
        }
        Command::Stream { track_id, quality } => {
            let catalog = CatalogClient::new(&cfg.api)?;
            let quality = quality.unwrap_or(cfg.api.quality);
            let url = catalog
                .resolve_stream(&track_id, quality)
                .await
                .with_context(|| format!("resolve stream for {track_id}"))?;
            println!("{url}");
        }
        Command::Play { track_id } => {
            let catalog = CatalogClient::new(&cfg.api)?;
            play_headless(&cfg, &catalog, track_id).await?;
        }
        Command::Audio { cmd } => match cmd {
            AudioCommand::List => {
                let out = tokio::process::Command::new("mpv")
                    .args(["--audio-device=help", "--no-video", "--idle=no"])
                    .output()
                    .await
                    .context("run mpv --audio-device=help")?;
                print!("{}", String::from_utf8_lossy(&out.stdout));
                eprint!("{}", String::from_utf8_lossy(&out.stderr));
            }
            AudioCommand::Set { device } => {
                let mut cfg = cfg;
                cfg.player.audio_device = Some(device);
                config::save(&cfg, Some(cfg_path.as_path())).context("save config")?;
                println!("Updated audio device in config.");
            }
            AudioCommand::Clear => {
                let mut cfg = cfg;
                cfg.player.audio_device = None;
                config::save(&cfg, Some(cfg_path.as_path())).context("save config")?;
                println!("Cleared audio device override.");
            }
        },
    }

    Ok(())
}

/// Plays through the session until the catalog reports end of queue.
async fn play_headless(
    cfg: &config::Config,
    catalog: &CatalogClient,
    track_id: String,
) -> anyhow::Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(64);
    let mpv = player::MpvHandle::spawn(
        tx,
        cfg.player.audio_device.as_deref(),
        cfg.player.volume,
        None,
    )
    .await?;

    let mut playback = session::PlaybackSessionManager::new(cfg.api.quality);
    let first = Track {
        video_id: track_id,
        ..Track::default()
    };
    let np = playback.start_playback(catalog, &mpv, first).await?;
    println!("▶ {}", np.track.video_id);

    let mut clock = 0.0;
    while let Some(ev) = rx.recv().await {
        let app::events::Event::Player(pe) = ev else {
            continue;
        };
        match pe {
            app::events::PlayerEvent::Position { seconds } => clock = seconds,
            app::events::PlayerEvent::Ended => {
                match playback
                    .advance(session::Direction::Next, clock, catalog, &mpv)
                    .await
                {
                    Ok(session::Advanced::Started(track)) => {
                        let card = view::cards::track_card(&track);
                        println!("▶ {} — {}", card.title, card.subtitle);
                        clock = 0.0;
                    }
                    Ok(_) => break,
                    Err(e) => anyhow::bail!("playback stopped: {e}"),
                }
            }
            app::events::PlayerEvent::Failed(reason) => {
                playback.on_track_failed();
                anyhow::bail!("playback failed: {reason}");
            }
            app::events::PlayerEvent::Error(e) => tracing::warn!(error = %e, "player error"),
            _ => {}
        }
    }
    println!("End of queue");
    Ok(())
}

fn print_tracks(tracks: &[Track]) {
    for (i, t) in tracks.iter().enumerate() {
        let card = view::cards::track_card(t);
        println!("{:02}. {} — {}  (video_id={})", i + 1, card.title, card.subtitle, t.video_id);
    }
}

fn print_playlists(playlists: &[Playlist]) {
    for (i, p) in playlists.iter().enumerate() {
        let card = view::cards::render_card(&Record::Playlist(p.clone()));
        println!("{:02}. {} — {}  (playlist_id={})", i + 1, card.title, card.subtitle, p.playlist_id);
    }
}
