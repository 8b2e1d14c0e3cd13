#[macro_use]
mod macros;

pub mod bandwidth;
pub mod lenient;
pub mod tokens;
