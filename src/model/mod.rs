pub mod bet;
pub mod player;
pub mod score;
pub mod settings;
pub mod settlement;
pub mod snapshot;
pub mod status;
pub mod wolf_choice;

pub use bet::*;
pub use player::*;
pub use score::*;
pub use settings::*;
pub use settlement::*;
pub use snapshot::*;
pub use status::*;
pub use wolf_choice::*;
