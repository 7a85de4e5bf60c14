pub mod clock;
pub mod commentary;
pub mod probability;
pub mod rating;
pub mod sim;
pub mod state;
pub mod tactics;

pub use clock::{EngineError, MatchClock};
pub use sim::{MatchContext, MatchEngine, SideContext};
pub use state::{EventKind, MatchEvent, MatchState, Score, Side};
pub use tactics::{TacticPreset, TacticSet, TacticSetting};
