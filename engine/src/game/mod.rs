mod effects;
mod food;
mod game_state;
mod geometry;
mod input;
mod session;
mod session_rng;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use effects::EffectsRegistry;
pub use food::{Food, FoodSpawner};
pub use game_state::{Game, TickSchedule};
pub use geometry::{Vec2, in_bounds};
pub use input::{DirectionContext, InputController, InputEvent};
pub use session::{GameCommand, SnapshotSink, run_game_loop};
pub use session_rng::{RngSource, SessionRng};
pub use settings::{GameSettings, SnakeSkin};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
pub use types::{Direction, EffectKind, FoodKind, GamePhase};
