use serde::Deserialize;

use crate::prelude::*;

/// Wallet API response envelope: `{ success, data, message }`.
#[derive(Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    success: bool,

    data: Option<T>,

    message: Option<String>,
}

const fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// Unwrap the payload, or fail with the server's message or the given fallback.
    pub fn into_data(self, fallback: &'static str) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => bail!(self.message.unwrap_or_else(|| fallback.to_owned())),
        }
    }
}
