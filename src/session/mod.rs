pub mod drill;
pub mod free;
pub mod input;
pub mod result;

pub use drill::{DrillSession, SessionState, Transition};
pub use free::FreeTyping;
pub use input::{AttemptResult, InputEvent};
pub use result::{BlockResult, PerfectBlock, PerfectBlockSignal};
