pub mod args;
pub mod error;
pub mod game;
pub mod games;
pub mod logging;
pub mod model;
pub mod score;
pub mod settlement;
pub mod controller {
    pub mod game;
}

pub use error::GameError;
pub use game::{
    LateJoin, compute_settlements, compute_status, create_press, initial_bets, late_join,
    record_wolf_choice,
};
