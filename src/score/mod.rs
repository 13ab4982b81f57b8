pub mod handicap;
pub mod ledger;
pub mod tally;

pub use handicap::*;
pub use ledger::*;
pub use tally::*;
