use std::fmt::{Display, Formatter};

use comfy_table::Color;

/// Signal strength reduced to what the dashboard shows: a number of bars and a label.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SignalQuality {
    pub bars: u8,
    pub label: SignalLabel,
}

impl SignalQuality {
    pub const MAX_BARS: u8 = 5;

    pub const fn from_dbm(dbm: i32) -> Self {
        let (bars, label) = match dbm {
            -50.. => (5, SignalLabel::Excellent),
            -55.. => (4, SignalLabel::Good),
            -60.. => (3, SignalLabel::Fair),
            -70.. => (2, SignalLabel::Weak),
            _ => (1, SignalLabel::Poor),
        };
        Self { bars, label }
    }
}

impl From<Option<i32>> for SignalQuality {
    fn from(dbm: Option<i32>) -> Self {
        dbm.map_or(Self { bars: 3, label: SignalLabel::Unknown }, Self::from_dbm)
    }
}

impl Display for SignalQuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bar in 0..Self::MAX_BARS {
            f.write_str(if bar < self.bars { "▮" } else { "▯" })?;
        }
        write!(f, " {}", self.label)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SignalLabel {
    Excellent,
    Good,
    Fair,
    Weak,
    Poor,
    Unknown,
}

impl SignalLabel {
    pub const fn color(self) -> Color {
        match self {
            Self::Excellent | Self::Good => Color::Green,
            Self::Fair => Color::DarkYellow,
            Self::Weak | Self::Poor => Color::Red,
            Self::Unknown => Color::Reset,
        }
    }
}

impl Display for SignalLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::Weak => write!(f, "Weak"),
            Self::Poor => write!(f, "Poor"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excellent_ok() {
        assert_eq!(
            SignalQuality::from(Some(-38)),
            SignalQuality { bars: 5, label: SignalLabel::Excellent },
        );
    }

    #[test]
    fn weak_ok() {
        assert_eq!(
            SignalQuality::from(Some(-65)),
            SignalQuality { bars: 2, label: SignalLabel::Weak },
        );
    }

    #[test]
    fn unknown_ok() {
        assert_eq!(SignalQuality::from(None), SignalQuality { bars: 3, label: SignalLabel::Unknown });
    }

    #[test]
    fn boundaries_ok() {
        assert_eq!(SignalQuality::from_dbm(-50).bars, 5);
        assert_eq!(SignalQuality::from_dbm(-51).bars, 4);
        assert_eq!(SignalQuality::from_dbm(-55).bars, 4);
        assert_eq!(SignalQuality::from_dbm(-60).bars, 3);
        assert_eq!(SignalQuality::from_dbm(-70).bars, 2);
        assert_eq!(SignalQuality::from_dbm(-71), SignalQuality { bars: 1, label: SignalLabel::Poor });
    }

    #[test]
    fn display_ok() {
        assert_eq!(SignalQuality::from_dbm(-65).to_string(), "▮▮▯▯▯ Weak");
    }
}
