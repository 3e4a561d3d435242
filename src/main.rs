mod app;
mod event;
mod ui;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing_subscriber::EnvFilter;

use keyshape::config::{Config, TextSource, TypingMode};
use keyshape::generator::paging::viewport;
use keyshape::keyboard::{FingerPreset, LayoutPreset};

use app::App;
use event::{AppEvent, EventHandler};
use ui::components::keyboard_diagram::KeyboardDiagram;
use ui::components::metrics_bar::MetricsBar;
use ui::components::typing_area::TypingArea;
use ui::layout::{TrainerLayout, pack_hint_lines};
use ui::theme::DEFAULT_PALETTE;

/// About 30 frames per second while the metrics settle.
const TICK_RATE: Duration = Duration::from_millis(33);

#[derive(Parser)]
#[command(
    name = "keyshape",
    version,
    about = "Terminal typing trainer for alternative keyboard layouts"
)]
struct Cli {
    #[arg(short, long, help = "Typing mode (practice, free)")]
    mode: Option<String>,

    #[arg(short, long, help = "Keyboard layout (qwerty, dvorak, colemak)")]
    layout: Option<String>,

    #[arg(long, help = "JSON file with per-key layout overrides")]
    layout_file: Option<PathBuf>,

    #[arg(long, help = "Finger assignment preset (angle, normal)")]
    fingers: Option<String>,

    #[arg(long, help = "JSON file mapping key ids to fingers (lp ... rp)")]
    finger_file: Option<PathBuf>,

    #[arg(short, long, help = "Practice this text instead of the configured one")]
    text: Option<String>,

    #[arg(short, long, help = "Practice this many words from the built-in vocabulary")]
    words: Option<usize>,

    #[arg(long, help = "Shuffle vocabulary words")]
    shuffle: bool,

    #[arg(long, help = "Write logs to this file (filter with KEYSHAPE_LOG)")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Save the effective settings to the config file and exit")]
    save_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = Config::load().context("loading config")?;
    apply_cli(&mut config, &cli)?;

    if cli.save_config {
        config.save().context("saving config")?;
        println!("Saved {}", Config::config_path().display());
        return Ok(());
    }

    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Logs go to a file; the alternate screen owns stdout and stderr.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let filter =
        EnvFilter::try_from_env("KEYSHAPE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn apply_cli(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(mode) = &cli.mode {
        let Some(mode) = TypingMode::from_name(mode) else {
            bail!("unknown mode '{mode}' (expected practice or free)");
        };
        config.mode = mode;
    }
    if let Some(layout) = &cli.layout {
        let Some(preset) = LayoutPreset::from_name(layout) else {
            bail!("unknown layout '{layout}' (expected qwerty, dvorak or colemak)");
        };
        config.layout = preset;
    }
    if let Some(path) = &cli.layout_file {
        config.layout_file = Some(path.clone());
    }
    if let Some(fingers) = &cli.fingers {
        let Some(preset) = FingerPreset::from_name(fingers) else {
            bail!("unknown finger preset '{fingers}' (expected angle or normal)");
        };
        config.finger_preset = preset;
    }
    if let Some(path) = &cli.finger_file {
        config.finger_file = Some(path.clone());
    }
    if let Some(text) = &cli.text {
        config.text_source = TextSource::TrainingText;
        config.training_text = text.clone();
    }
    if let Some(words) = cli.words {
        config.text_source = TextSource::Vocabulary;
        config.word_count = words;
    }
    if cli.shuffle {
        config.shuffle_words = true;
    }
    config.normalize();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let palette = &DEFAULT_PALETTE;

    frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

    let layout = TrainerLayout::new(area);

    let mode_label = match app.mode {
        TypingMode::Practice => "Practice",
        TypingMode::Free => "Free typing",
    };
    let mut header = vec![
        Span::styled(
            " keyshape ",
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {mode_label} | {} ", app.config.layout.name()),
            Style::default().fg(palette.fg),
        ),
    ];
    if app.perfect_blocks > 0 {
        header.push(Span::styled(
            format!("| perfect blocks: {} ", app.perfect_blocks),
            Style::default().fg(palette.success),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), layout.header);

    let next_char = match app.mode {
        TypingMode::Practice => {
            let (page, cursor) =
                viewport(app.drill.tokens(), app.drill.cursor(), app.config.page_width);
            let typing = TypingArea::new(page, cursor, app.drill.has_error(), palette)
                .title(" Practice ");
            frame.render_widget(typing, layout.typing);
            app.drill.current_token().map(|token| token.expected)
        }
        TypingMode::Free => {
            let tokens = app.free.tokens();
            let typing = TypingArea::new(&tokens, app.free.cursor(), false, palette)
                .title(" Free typing ");
            frame.render_widget(typing, layout.typing);
            None
        }
    };

    frame.render_widget(MetricsBar::new(app.metrics.display(), palette), layout.metrics);

    if let Some(keyboard) = layout.keyboard {
        let diagram = KeyboardDiagram::new(&app.layout, &app.fingers, next_char, palette);
        frame.render_widget(diagram, keyboard);
    }

    let footer = match &app.flash {
        Some(flash) => {
            let color = if flash.success {
                palette.success
            } else {
                palette.warning
            };
            Line::from(Span::styled(
                format!(" {}", flash.text),
                Style::default().fg(color),
            ))
        }
        None => {
            let hints = [
                "[Tab] switch mode",
                "[Backspace] fix",
                "[Alt+Backspace] delete word",
                "[Esc] quit",
            ];
            let text = pack_hint_lines(&hints, usize::from(layout.footer.width))
                .into_iter()
                .next()
                .unwrap_or_default();
            Line::from(Span::styled(text, Style::default().fg(palette.text_pending)))
        }
    };
    frame.render_widget(Paragraph::new(footer), layout.footer);
}
