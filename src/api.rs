mod client;
pub mod hotspot;
mod response;
pub mod wallet;

pub use self::client::Client;
