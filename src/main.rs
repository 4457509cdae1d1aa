mod app;
mod config;
mod theme;
mod typing;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use typing::TypingAnimator;

#[derive(Parser, Debug)]
#[command(name = "heroline")]
#[command(version = "0.1.0")]
#[command(about = "A terminal hero banner with a typing role animator")]
struct Args {
    /// Phrase to cycle through (repeat for several; replaces configured phrases)
    #[arg(short, long = "phrase")]
    phrases: Vec<String>,

    /// Delay between typed characters in milliseconds
    #[arg(long)]
    typing_ms: Option<u64>,

    /// Delay between deleted characters in milliseconds
    #[arg(long)]
    deleting_ms: Option<u64>,

    /// Dwell after a phrase is fully typed, in milliseconds
    #[arg(long)]
    pause_ms: Option<u64>,

    /// Use this config file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the first N updates as JSON lines and exit
    #[arg(short, long)]
    frames: Option<usize>,
}

impl Args {
    /// Load config and apply command line overrides
    fn resolve_config(&self) -> Result<AppConfig> {
        let config = match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load()?,
        };
        Ok(self.apply_overrides(config))
    }

    /// `--phrase` replaces the configured list only when given at least once
    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if !self.phrases.is_empty() {
            config.phrases = self.phrases.clone();
        }
        if let Some(ms) = self.typing_ms {
            config.typing_speed_ms = ms;
        }
        if let Some(ms) = self.deleting_ms {
            config.deleting_speed_ms = ms;
        }
        if let Some(ms) = self.pause_ms {
            config.pause_ms = ms;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr keeps the screen and JSON output clean)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    if let Some(count) = args.frames {
        return print_frames(config, count).await;
    }

    run_tui(config).await
}

#[derive(serde::Serialize)]
struct FrameRecord {
    seq: usize,
    elapsed_ms: u128,
    text: String,
}

/// Headless mode: stream the first `count` updates to stdout
async fn print_frames(config: AppConfig, count: usize) -> Result<()> {
    write_frames(config, count, &mut io::stdout()).await
}

/// Write the first `count` updates to `out`, one JSON object per line
async fn write_frames<W: Write>(config: AppConfig, count: usize, out: &mut W) -> Result<()> {
    let timings = config.timings();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let started = Instant::now();

    let mut animator = TypingAnimator::start(config.phrases, timings, move |text| {
        let _ = tx.send((started.elapsed(), text.to_string()));
    })?;

    for seq in 0..count {
        let Some((elapsed, text)) = rx.recv().await else {
            break;
        };
        let frame = FrameRecord {
            seq,
            elapsed_ms: elapsed.as_millis(),
            text,
        };
        writeln!(out, "{}", serde_json::to_string(&frame)?)?;
    }

    animator.stop();
    out.flush()?;
    Ok(())
}

async fn run_tui(config: AppConfig) -> Result<()> {
    // Mount before touching the terminal so config errors print normally
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    app.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| ui::draw(f, app))?;

        // Short poll so deletion-speed updates are drawn promptly
        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Esc if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            if let Err(e) = app.handle_key(key) {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typing::AnimatorError;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("heroline").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let args = args(&["-p", "Go", "--phrase", "Dev", "--typing-ms", "80", "--pause-ms", "0"]);
        let config = args.apply_overrides(AppConfig::default());

        assert_eq!(config.phrases, vec!["Go", "Dev"]);
        assert_eq!(config.typing_speed_ms, 80);
        assert_eq!(config.deleting_speed_ms, 50);
        assert_eq!(config.pause_ms, 0);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let base = AppConfig {
            phrases: Vec::new(),
            deleting_speed_ms: 30,
            ..Default::default()
        };
        let config = args(&[]).apply_overrides(base);

        assert!(config.phrases.is_empty());
        assert_eq!(config.deleting_speed_ms, 30);
    }

    #[test]
    fn test_resolve_config_reads_config_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banner.toml");
        std::fs::write(&path, "phrases = [\"Rust\"]\npause_ms = 10\n").unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let config = args(&["--config", path_arg.as_str(), "--deleting-ms", "20"])
            .resolve_config()
            .unwrap();

        assert_eq!(config.phrases, vec!["Rust"]);
        assert_eq!(config.pause_ms, 10);
        assert_eq!(config.deleting_speed_ms, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_frames_emits_json_lines() {
        let config = AppConfig {
            phrases: vec!["Go".to_string()],
            pause_ms: 0,
            ..Default::default()
        };
        let mut out = Vec::new();
        write_frames(config, 5, &mut out).await.unwrap();

        let frames: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        let texts: Vec<&str> = frames.iter().map(|f| f["text"].as_str().unwrap()).collect();
        assert_eq!(texts, vec!["", "G", "Go", "G", ""]);

        let elapsed: Vec<u64> = frames.iter().map(|f| f["elapsed_ms"].as_u64().unwrap()).collect();
        assert_eq!(elapsed, vec![0, 100, 200, 250, 300]);
        assert_eq!(frames[4]["seq"], 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_frames_rejects_empty_phrases() {
        let config = AppConfig {
            phrases: Vec::new(),
            ..Default::default()
        };
        let mut out = Vec::new();
        let err = write_frames(config, 5, &mut out).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AnimatorError>(),
            Some(AnimatorError::InvalidConfiguration(_))
        ));
        assert!(out.is_empty());
    }
}
