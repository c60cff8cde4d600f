//! Appointment status and the lifecycle transition table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// Operations that move an existing appointment between states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleAction {
    Confirm,
    Decline,
    Cancel,
    Complete,
}

/// How strictly `complete` is enforced
///
/// Both policies require the appointment's slot to have elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionPolicy {
    /// `pending` or `confirmed` may complete; any caller
    #[default]
    Lenient,
    /// only `confirmed` may complete; mentor only
    Strict,
}

impl AppointmentStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Confirmed, Self::Cancelled, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// `completed` and `cancelled` accept no further transitions
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether an appointment in this state occupies its mentor's slot
    #[inline]
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Look up the transition table.
    ///
    /// Returns the resulting state, or `None` when `action` is not allowed
    /// from `self`. No entry ever leads back to `Pending`.
    pub fn apply(self, action: LifecycleAction, policy: CompletionPolicy) -> Option<Self> {
        use AppointmentStatus::{Cancelled, Completed, Confirmed, Pending};
        use LifecycleAction::{Cancel, Complete, Confirm, Decline};

        match (self, action) {
            (Pending, Confirm) => Some(Confirmed),
            (Pending, Decline) => Some(Cancelled),
            (Pending | Confirmed, Cancel) => Some(Cancelled),
            (Confirmed, Complete) => Some(Completed),
            (Pending, Complete) if policy == CompletionPolicy::Lenient => Some(Completed),
            _ => None,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown appointment status '{other}'")),
        }
    }
}

impl LifecycleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Decline => "decline",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown completion policy '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: [LifecycleAction; 4] = [
        LifecycleAction::Confirm,
        LifecycleAction::Decline,
        LifecycleAction::Cancel,
        LifecycleAction::Complete,
    ];

    #[test]
    fn test_happy_path() {
        let lenient = CompletionPolicy::Lenient;
        let confirmed = AppointmentStatus::Pending
            .apply(LifecycleAction::Confirm, lenient)
            .unwrap();
        assert_eq!(confirmed, AppointmentStatus::Confirmed);
        assert_eq!(
            confirmed.apply(LifecycleAction::Complete, lenient),
            Some(AppointmentStatus::Completed)
        );
    }

    #[test]
    fn test_decline_only_from_pending() {
        let lenient = CompletionPolicy::Lenient;
        assert_eq!(
            AppointmentStatus::Pending.apply(LifecycleAction::Decline, lenient),
            Some(AppointmentStatus::Cancelled)
        );
        assert_eq!(
            AppointmentStatus::Confirmed.apply(LifecycleAction::Decline, lenient),
            None
        );
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for policy in [CompletionPolicy::Lenient, CompletionPolicy::Strict] {
            for status in [AppointmentStatus::Cancelled, AppointmentStatus::Completed] {
                assert!(status.is_terminal());
                for action in ACTIONS {
                    assert_eq!(status.apply(action, policy), None, "{status} {action}");
                }
            }
        }
    }

    #[test]
    fn test_nothing_reenters_pending() {
        for policy in [CompletionPolicy::Lenient, CompletionPolicy::Strict] {
            for status in AppointmentStatus::ALL {
                for action in ACTIONS {
                    assert_ne!(status.apply(action, policy), Some(AppointmentStatus::Pending));
                }
            }
        }
    }

    #[test]
    fn test_strict_policy_requires_confirmation_before_completion() {
        assert_eq!(
            AppointmentStatus::Pending.apply(LifecycleAction::Complete, CompletionPolicy::Strict),
            None
        );
        assert_eq!(
            AppointmentStatus::Pending.apply(LifecycleAction::Complete, CompletionPolicy::Lenient),
            Some(AppointmentStatus::Completed)
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("CONFIRMED".parse::<AppointmentStatus>(), Ok(AppointmentStatus::Confirmed));
        assert_eq!("canceled".parse::<AppointmentStatus>(), Ok(AppointmentStatus::Cancelled));
        assert!("archived".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_only_cancelled_frees_slot() {
        assert!(AppointmentStatus::Pending.occupies_slot());
        assert!(AppointmentStatus::Confirmed.occupies_slot());
        assert!(AppointmentStatus::Completed.occupies_slot());
        assert!(!AppointmentStatus::Cancelled.occupies_slot());
    }
}
