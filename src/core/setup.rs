use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// MAC-address-like token that binds a physical device to a hotspot record.
///
/// Stored normalized: upper-case hex pairs separated by colons.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SetupCode(String);

impl FromStr for SetupCode {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let separator = if text.contains('-') { '-' } else { ':' };
        let groups = text.split(separator).collect_vec();
        ensure!(
            groups.len() == 6
                && groups.iter().all(|group| {
                    group.len() == 2 && group.chars().all(|char| char.is_ascii_hexdigit())
                }),
            "`{text}` is not a setup code, expected six hex pairs like `AA:BB:CC:DD:EE:FF`",
        );
        Ok(Self(groups.iter().map(|group| group.to_ascii_uppercase()).join(":")))
    }
}

impl Display for SetupCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provisioning lifecycle of a hotspot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupStatus {
    Pending,
    Starting,
    Configuring,
    Active,
    Failed,
}

impl SetupStatus {
    const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Starting => 1,
            Self::Configuring => 2,
            Self::Active | Self::Failed => 3,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Active | Self::Failed)
    }

    /// Statuses only move forward, though polling may skip some. Anything may fail until done.
    pub const fn can_advance_to(self, next: Self) -> bool {
        !self.is_terminal() && (matches!(next, Self::Failed) || next.rank() > self.rank())
    }
}

impl Display for SetupStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Starting => write!(f, "starting"),
            Self::Configuring => write!(f, "configuring"),
            Self::Active => write!(f, "active"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Transition {
    Advanced { from: SetupStatus, to: SetupStatus },
    Unchanged,
    Ignored { current: SetupStatus, observed: SetupStatus },
}

/// Setup state machine driven by observed statuses.
#[derive(Copy, Clone, Debug)]
pub struct SetupProgress {
    current: SetupStatus,
}

impl SetupProgress {
    pub const fn new(initial: SetupStatus) -> Self {
        Self { current: initial }
    }

    pub const fn current(&self) -> SetupStatus {
        self.current
    }

    pub const fn is_done(&self) -> bool {
        self.current.is_terminal()
    }

    pub fn observe(&mut self, observed: SetupStatus) -> Transition {
        if observed == self.current {
            Transition::Unchanged
        } else if self.current.can_advance_to(observed) {
            let from = self.current;
            self.current = observed;
            Transition::Advanced { from, to: observed }
        } else {
            Transition::Ignored { current: self.current, observed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_code_normalized_ok() -> Result {
        assert_eq!("aa:bb:cc:dd:ee:0f".parse::<SetupCode>()?.to_string(), "AA:BB:CC:DD:EE:0F");
        assert_eq!(" 00-1a-2B-3c-4D-5e ".parse::<SetupCode>()?.to_string(), "00:1A:2B:3C:4D:5E");
        Ok(())
    }

    #[test]
    fn setup_code_rejected() {
        for text in ["", "AA:BB:CC:DD:EE", "AA:BB:CC:DD:EE:FF:00", "AA-BB:CC-DD:EE-FF", "GG:BB:CC:DD:EE:FF", "AAA:B:CC:DD:EE:FF"] {
            assert!(text.parse::<SetupCode>().is_err(), "{text:?} must be rejected");
        }
    }

    #[test]
    fn happy_path_ok() {
        let mut progress = SetupProgress::new(SetupStatus::Pending);
        assert_eq!(
            progress.observe(SetupStatus::Starting),
            Transition::Advanced { from: SetupStatus::Pending, to: SetupStatus::Starting },
        );
        assert_eq!(progress.observe(SetupStatus::Starting), Transition::Unchanged);
        assert_eq!(
            progress.observe(SetupStatus::Configuring),
            Transition::Advanced { from: SetupStatus::Starting, to: SetupStatus::Configuring },
        );
        assert!(!progress.is_done());
        assert_eq!(
            progress.observe(SetupStatus::Active),
            Transition::Advanced { from: SetupStatus::Configuring, to: SetupStatus::Active },
        );
        assert!(progress.is_done());
    }

    #[test]
    fn skipping_states_ok() {
        let mut progress = SetupProgress::new(SetupStatus::Pending);
        assert!(matches!(progress.observe(SetupStatus::Active), Transition::Advanced { .. }));
        assert_eq!(progress.current(), SetupStatus::Active);
    }

    #[test]
    fn regression_is_ignored() {
        let mut progress = SetupProgress::new(SetupStatus::Configuring);
        assert_eq!(
            progress.observe(SetupStatus::Starting),
            Transition::Ignored { current: SetupStatus::Configuring, observed: SetupStatus::Starting },
        );
        assert_eq!(progress.current(), SetupStatus::Configuring);
    }

    #[test]
    fn terminal_states_absorb() {
        let mut progress = SetupProgress::new(SetupStatus::Failed);
        assert!(matches!(progress.observe(SetupStatus::Active), Transition::Ignored { .. }));
        let mut progress = SetupProgress::new(SetupStatus::Active);
        assert!(matches!(progress.observe(SetupStatus::Failed), Transition::Ignored { .. }));
    }

    #[test]
    fn failure_from_any_pending_state() {
        for initial in [SetupStatus::Pending, SetupStatus::Starting, SetupStatus::Configuring] {
            assert!(initial.can_advance_to(SetupStatus::Failed));
        }
    }
}
