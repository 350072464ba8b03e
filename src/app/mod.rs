pub mod debounce;
pub mod session;
pub mod state;

pub use debounce::{debounce, DebounceInput, DebounceOutput};
pub use session::{SearchSession, SessionOptions};
pub use state::{SearchOutcome, SearchPhase, SearchState, SearchStore};
