pub mod range;
pub mod setup;
pub mod signal;
