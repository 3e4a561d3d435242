use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use keyshape::config::{Config, TextSource, TypingMode};
use keyshape::engine::LiveMetrics;
use keyshape::generator::TokenSequence;
use keyshape::generator::paging::add_page_end_spaces;
use keyshape::generator::vocabulary::{Vocabulary, WordOrder};
use keyshape::keyboard::capture::InputCapture;
use keyshape::keyboard::{FingerMap, LayoutLayers, MappedChars};
use keyshape::session::{DrillSession, FreeTyping, PerfectBlockSignal, Transition};

const FLASH_DURATION: Duration = Duration::from_millis(1500);

pub struct Flash {
    pub text: String,
    pub success: bool,
    shown_at: Instant,
}

pub struct App {
    pub config: Config,
    pub mode: TypingMode,
    pub layout: LayoutLayers,
    pub mapped: MappedChars,
    pub fingers: FingerMap,
    pub drill: DrillSession,
    pub free: FreeTyping,
    pub metrics: LiveMetrics,
    pub flash: Option<Flash>,
    pub perfect_blocks: u32,
    pub should_quit: bool,
    capture: InputCapture,
    perfect: PerfectBlockSignal,
    started: Instant,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (layout, layout_error) = config.layout_layers();
        let mapped = layout.mapped_chars();
        let (fingers, finger_error) = config.finger_map();
        let tokens = build_tokens(&config);
        info!(
            tokens = tokens.len(),
            layout = config.layout.name(),
            mode = config.mode.as_str(),
            "starting trainer"
        );

        let mut free = FreeTyping::new(config.page_width);
        if config.mode == TypingMode::Free {
            free.enable(0);
        }

        let metrics = LiveMetrics::new(
            config.tracker_window_ms,
            config.smoothing_alpha,
            config.cadence(),
        );

        let flash = layout_error
            .map(|err| format!("Layout file ignored: {err}"))
            .or_else(|| finger_error.map(|err| format!("Finger file ignored: {err}")))
            .map(|text| Flash {
                text,
                success: false,
                shown_at: Instant::now(),
            });

        Self {
            mode: config.mode,
            layout,
            mapped,
            fingers,
            drill: DrillSession::new(tokens),
            free,
            metrics,
            flash,
            perfect_blocks: 0,
            should_quit: false,
            capture: InputCapture::new(),
            perfect: PerfectBlockSignal::default(),
            started: Instant::now(),
            config,
        }
    }

    /// Milliseconds since start-up; the clock every event is stamped with.
    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.toggle_mode();
                return;
            }
            _ => {}
        }

        let now = self.now_ms();
        let Some(input) = self.capture.capture(&key, now, &self.layout) else {
            return;
        };

        match self.mode {
            TypingMode::Practice => {
                let transition = self.drill.process(&input, &self.mapped);
                self.apply_transition(&transition, now);
            }
            TypingMode::Free => {
                self.free.process(&input);
            }
        }
    }

    fn apply_transition(&mut self, transition: &Transition, now: u64) {
        if let Some(attempt) = transition.attempt() {
            self.metrics.record(attempt, now);
        }
        if let Some(block) = transition.block() {
            if self.perfect.observe(block).is_some() {
                self.perfect_blocks += 1;
                self.flash = Some(Flash {
                    text: format!("Perfect block! {} keys, no mistakes", block.attempted),
                    success: true,
                    shown_at: Instant::now(),
                });
            } else {
                self.flash = Some(Flash {
                    text: format!("Block done: {:.0}% accuracy", block.accuracy * 100.0),
                    success: false,
                    shown_at: Instant::now(),
                });
            }
        }
    }

    /// Switch between practice and free typing. Both sides start fresh, and
    /// events already captured are never replayed into the new mode.
    pub fn toggle_mode(&mut self) {
        let last_seq = self.capture.last_seq();
        self.mode = self.mode.toggled();
        match self.mode {
            TypingMode::Free => self.free.enable(last_seq),
            TypingMode::Practice => {
                self.free.disable(last_seq);
                self.drill.reset();
                self.drill.skip_through(last_seq);
            }
        }
        debug!(mode = self.mode.as_str(), "mode switched");
    }

    pub fn on_tick(&mut self) {
        let now = self.now_ms();
        self.metrics.tick(now);
        if self
            .flash
            .as_ref()
            .is_some_and(|flash| flash.shown_at.elapsed() >= FLASH_DURATION)
        {
            self.flash = None;
        }
    }
}

/// Practice text for the configured source, paged on word boundaries.
pub fn build_tokens(config: &Config) -> TokenSequence {
    let tokens = match config.text_source {
        TextSource::TrainingText => {
            keyshape::generator::tokenize(&config.normalized_training_text())
        }
        TextSource::Vocabulary => {
            let order = if config.shuffle_words {
                WordOrder::Shuffled {
                    seed: rand::random(),
                }
            } else {
                WordOrder::Cycle
            };
            Vocabulary::beginner().build_tokens(config.word_count, order)
        }
    };
    TokenSequence::new(add_page_end_spaces(&tokens, config.page_width))
}
