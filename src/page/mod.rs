//! Page behaviours as plain state machines.
//!
//! Front-ends feed in user actions and the current time, then read back what
//! should be visible. Nothing here touches the terminal.

pub mod advice;
pub mod feedback;
pub mod reveal;

pub use advice::AdviceBoard;
pub use feedback::{ButtonFeedback, FlashPhase, PageButton};
pub use reveal::{Reveal, RevealPhase};
