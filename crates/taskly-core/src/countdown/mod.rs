mod engine;
mod state;
mod status;
mod store;
mod ticker;

pub use engine::{CompletionOutcome, CountdownEngine, PERMISSION_WARNING};
pub use state::PersistedCountdownState;
pub use status::{due_at_ms, CountdownStatus, TimeBreakdown};
pub use store::{CountdownStore, COUNTDOWN_KEY};
pub use ticker::TickSubscription;
