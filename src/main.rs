//! Terminal runner (default binary).
//!
//! Usage: `tui-blocks [CONFIG_PATH]` (defaults to `config.json`; created with
//! defaults when missing).
//!
//! Drives the engine at the configured tick rate, feeds crossterm key events
//! through the auto-repeat handler, and records every finished game in the
//! high-score table.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blocks::config::{GameConfig, DEFAULT_CONFIG_PATH};
use tui_blocks::core::{Engine, EngineSnapshot};
use tui_blocks::input::{should_quit, InputHandler};
use tui_blocks::scores::{
    JsonFileScoreRepository, MemoryScoreRepository, ScoreEntry, ScoreRepository,
};
use tui_blocks::terminal::Terminal;
use tui_blocks::types::{EngineEvent, EngineState};
use tui_blocks::view;

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = GameConfig::load_or_init(&config_path)?;

    let mut scores: Box<dyn ScoreRepository> =
        match JsonFileScoreRepository::open(&config.scores.path, config.scores.max_high_scores) {
            Ok(repo) => Box::new(repo),
            Err(e) => {
                eprintln!("[Scores] {:#}; keeping scores in memory", e);
                Box::new(MemoryScoreRepository::new(config.scores.max_high_scores))
            }
        };

    let mut term = Terminal::new();
    term.enter()?;

    let mut log = Vec::new();
    let result = run(&mut term, &config, scores.as_mut(), &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    for line in log {
        eprintln!("{}", line);
    }
    result
}

fn run(
    term: &mut Terminal,
    config: &GameConfig,
    scores: &mut dyn ScoreRepository,
    log: &mut Vec<String>,
) -> Result<()> {
    let mut engine = Engine::new(config.engine_config());
    let mut input = InputHandler::with_timing(config.repeat_timing())
        .with_key_release_timeout_ms(config.input.key_release_timeout_ms);

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let max_scores = config.scores.max_high_scores;
    let mut high_scores = scores.top_n(max_scores)?;
    let mut snapshot = EngineSnapshot::default();

    let tick_duration = Duration::from_millis(u64::from(config.engine.tick_ms));
    let mut last_tick = Instant::now();

    engine.start();

    loop {
        // Render.
        engine.snapshot_into(&mut snapshot);
        term.draw(view::render(&snapshot, &high_scores))?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = input.handle_key_press(key.code, now_ms()) {
                            engine.apply_action(action);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = input.handle_key_release(key.code) {
                            engine.apply_action(action);
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();

            for action in input.poll(now_ms()) {
                engine.apply_action(action);
            }
            engine.tick(elapsed.as_millis() as u32);
        }

        for event in engine.drain_events() {
            match event {
                EngineEvent::LevelUp(level) => input.set_level(level),
                EngineEvent::StateChanged(EngineState::Running) => {
                    input.set_level(engine.stats().level);
                }
                EngineEvent::StateChanged(EngineState::GameOver) => input.reset(),
                EngineEvent::GameEnded(stats) => {
                    let entry = ScoreEntry::from_stats(&config.scores.player_name, &stats);
                    log.push(format!(
                        "[Game] game over: {} points, level {}, {} lines",
                        entry.score, entry.level, entry.lines_cleared
                    ));
                    if let Err(e) = scores.add(entry) {
                        log.push(format!("[Scores] failed to record score: {:#}", e));
                    }
                    high_scores = scores.top_n(max_scores)?;
                }
                _ => {}
            }
        }
    }
}
