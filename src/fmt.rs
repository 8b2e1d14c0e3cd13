use std::fmt::{Debug, Display, Formatter};

use serde::Serializer;

/// Amount rounded half away from zero and rendered with exactly two decimals.
#[derive(Copy, Clone)]
pub struct TwoDecimals(pub f64);

impl Debug for TwoDecimals {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for TwoDecimals {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Adding zero turns `-0.0` into `0.0`, so tiny negatives do not render as `-0.00`.
        let rounded = (self.0 * 100.0).round() / 100.0 + 0.0;
        write!(f, "{rounded:.2}")
    }
}

/// Serialize an amount as a two-decimal string, like `"15.00"`.
pub fn serialize_two_decimals<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Copy + Into<f64>,
{
    serializer.collect_str(&TwoDecimals((*value).into()))
}
