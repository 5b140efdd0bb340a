//! Shared types and tuning constants.
//!
//! Everything in here is plain data: piece kinds, the rotation cycle, the
//! command vocabulary understood by the game loop, the lifecycle states and
//! the fixed tuning constants. The crate is used by the simulation core, the
//! input adapters and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Cell size**: 30 pixels (presentation only)
//!
//! # Speed Curve
//!
//! The automatic drop interval starts at [`BASE_DROP_MS`] and shrinks by
//! [`DROP_STEP_MS`] per level, never going below [`DROP_INTERVAL_FLOOR_MS`]:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use block_arcade_types::{GameCommand, GameId, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.color_index(), 6);
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//! assert_eq!(GameId::Tetris.high_score_key(), "tetrisHighScore");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Automatic drop interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Interval reduction per level gained
pub const DROP_STEP_MS: u32 = 100;

/// The drop interval never goes below this
pub const DROP_INTERVAL_FLOOR_MS: u32 = 100;

/// Lines needed to gain one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level every game starts on
pub const START_LEVEL: u32 = 1;

/// Line clear scoring table, indexed by lines removed in one landing.
///
/// The entry is multiplied by the level in effect before the clear.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Value of a cell on the board or inside a piece matrix.
///
/// `0` is empty, `1..=7` is the color index of a [`PieceKind`].
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// Whether `cell` may appear on a board: empty or a piece color.
pub fn is_valid_cell(cell: Cell) -> bool {
    cell == EMPTY || PieceKind::from_color_index(cell).is_some()
}

/// The seven tetromino kinds, in catalog order.
///
/// Each kind owns a fixed color index:
/// - **I**: 1, cyan bar
/// - **J**: 2, blue
/// - **L**: 3, orange
/// - **O**: 4, yellow square
/// - **S**: 5, green
/// - **T**: 6, purple
/// - **Z**: 7, red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Color index written into board cells (1..=7).
    pub fn color_index(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_index`]. Returns `None` for empty or unknown values.
    pub fn from_color_index(cell: Cell) -> Option<Self> {
        match cell {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_arcade_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Lowercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Orientation of the active piece relative to its spawn matrix.
///
/// Every successful clockwise rotation advances the cycle
/// North → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_arcade_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Commands accepted by the game loop.
///
/// These are produced by input adapters (keyboard, touch) and consumed by
/// `GameLoop::apply`. Each one is a no-op when the lifecycle state disallows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameCommand {
    /// Leave the not-started state and spawn the first piece
    Start,
    /// Suspend automatic ticks
    Pause,
    /// Resume automatic ticks from a zeroed counter
    Resume,
    /// Pause when playing, resume when paused
    TogglePause,
    /// Drop the current game and return to not-started
    Restart,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise, no wall kicks
    Rotate,
    /// Move piece one cell down, landing it if blocked
    SoftDrop,
    /// Drop piece to the lowest legal row and land it
    HardDrop,
}

impl GameCommand {
    pub const ALL: [GameCommand; 10] = [
        GameCommand::Start,
        GameCommand::Pause,
        GameCommand::Resume,
        GameCommand::TogglePause,
        GameCommand::Restart,
        GameCommand::MoveLeft,
        GameCommand::MoveRight,
        GameCommand::Rotate,
        GameCommand::SoftDrop,
        GameCommand::HardDrop,
    ];

    /// Parse a command name (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_arcade_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("togglepause"), Some(GameCommand::TogglePause));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameCommand::Start),
            "pause" => Some(GameCommand::Pause),
            "resume" => Some(GameCommand::Resume),
            "togglepause" => Some(GameCommand::TogglePause),
            "restart" => Some(GameCommand::Restart),
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "rotate" => Some(GameCommand::Rotate),
            "softdrop" => Some(GameCommand::SoftDrop),
            "harddrop" => Some(GameCommand::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Start => "start",
            GameCommand::Pause => "pause",
            GameCommand::Resume => "resume",
            GameCommand::TogglePause => "togglePause",
            GameCommand::Restart => "restart",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::Rotate => "rotate",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::HardDrop => "hardDrop",
        }
    }

    /// Commands that mutate the active piece (as opposed to lifecycle commands).
    pub fn is_piece_command(&self) -> bool {
        matches!(
            self,
            GameCommand::MoveLeft
                | GameCommand::MoveRight
                | GameCommand::Rotate
                | GameCommand::SoftDrop
                | GameCommand::HardDrop
        )
    }
}

/// Lifecycle of one game session. Shared by every game in the catalog.
///
/// ```text
/// NotStarted --start--> Playing --pause--> Paused --resume--> Playing
///                          |                  |
///                          +--(board full)--> GameOver
///   any of Playing/Paused/GameOver --restart--> NotStarted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleState {
    #[default]
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

impl LifecycleState {
    /// Automatic ticks and piece commands are live.
    pub fn is_running(&self) -> bool {
        matches!(self, LifecycleState::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::NotStarted => "notStarted",
            LifecycleState::Playing => "playing",
            LifecycleState::Paused => "paused",
            LifecycleState::GameOver => "gameOver",
        }
    }
}

/// Games hosted by the catalog. Used to key persisted high scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameId {
    Tetris,
    Snake,
    FlappyBird,
}

impl GameId {
    /// Storage key of this game's best score (`"<game>HighScore"`).
    pub fn high_score_key(&self) -> &'static str {
        match self {
            GameId::Tetris => "tetrisHighScore",
            GameId::Snake => "snakeHighScore",
            GameId::FlappyBird => "flappyBirdHighScore",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameId::Tetris => "TETRIS",
            GameId::Snake => "SNAKE",
            GameId::FlappyBird => "FLAPPY BIRD",
        }
    }
}
