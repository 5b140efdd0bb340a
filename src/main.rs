//! Terminal block game runner (default binary).
//!
//! Crossterm for input, the framebuffer renderer for output. The host owns
//! the clock: every frame it feeds a millisecond timestamp into the game
//! loop, which decides whether an automatic drop is due.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use block_arcade::config::AppConfig;
use block_arcade::core::{
    GameConfig, GameLoop, GameSnapshot, HighScoreStore, MemoryStore, PieceSource, RandSource,
    SimpleRng,
};
use block_arcade::input::{handle_key_event, should_quit};
use block_arcade::store::JsonFileStore;
use block_arcade::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const FRAME: Duration = Duration::from_millis(16);

type ArcadeLoop = GameLoop<Box<dyn PieceSource>, Box<dyn HighScoreStore>>;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let mut game = build_game(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);
    game.teardown();

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = &config.log_path {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

fn build_game(config: &AppConfig) -> Result<ArcadeLoop> {
    let source: Box<dyn PieceSource> = match config.seed {
        Some(seed) => {
            log::info!("using fixed piece seed {seed}");
            Box::new(SimpleRng::new(seed))
        }
        None => Box::new(RandSource::from_entropy()),
    };

    let store: Box<dyn HighScoreStore> = if config.persist_scores {
        log::info!("high scores in {}", config.scores_path.display());
        Box::new(JsonFileStore::open_or_empty(&config.scores_path))
    } else {
        Box::new(MemoryStore::new())
    };

    GameLoop::with_parts(GameConfig::default(), source, store)
}

fn run(term: &mut TerminalRenderer, game: &mut ArcadeLoop) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let clock = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most one frame.
        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key, game.lifecycle()) {
                        game.apply(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Automatic drop.
        game.frame(clock.elapsed().as_millis() as u64);
    }
}
