pub mod random;
pub mod roulette;
pub mod selection_strategy;
pub mod tournament;

pub use random::RandomSelection;
pub use roulette::RouletteWheelSelection;
pub use selection_strategy::{checked_select, SelectionStrategy};
pub use tournament::TournamentSelection;
