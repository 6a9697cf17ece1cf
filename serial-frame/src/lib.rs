//! Encoding of scoreboard state into the fixed-width ASCII line read by the serial display
//! controller.

pub mod frame;
pub mod layout;

pub use frame::Frame;
