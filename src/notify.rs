//! Notification collaborator boundary.
//!
//! Delivery is a boolean-success black box: the core logs a failed delivery
//! and carries on, surfacing the result as a [`NotifyOutcome`] next to the
//! (already committed) record mutation — never as the operation's error.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::principal::Principal;
use crate::request::{PdiRequest, PdiStatus};

/// Outcome of the best-effort notification attached to a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotifyOutcome {
    /// The sink reported success
    Delivered,
    /// The sink reported failure; the mutation stands regardless
    Failed,
    /// The operation did not call for a notification
    Skipped,
}

impl NotifyOutcome {
    /// Folds a sink's boolean result into an outcome.
    pub fn from_delivery(delivered: bool) -> Self {
        if delivered {
            NotifyOutcome::Delivered
        } else {
            NotifyOutcome::Failed
        }
    }
}

/// Delivers alerts about request activity.
///
/// Implementations return `true` on successful delivery. A `false` return is
/// non-fatal by contract; implementations should not panic.
pub trait Notifier {
    /// Alerts the admin team that a new request was submitted.
    fn notify_admin_of_new_request(&self, record: &PdiRequest, requester: &Principal) -> bool;

    /// Alerts the requester that an admin updated their request.
    fn notify_requester_of_status_change(
        &self,
        record: &PdiRequest,
        status: PdiStatus,
        message: Option<&str>,
    ) -> bool;
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Admin alert for a newly created request
    AdminNewRequest {
        /// Id of the created record
        request_id: uuid::Uuid,
        /// User id of the requester
        requester_id: String,
    },
    /// Requester alert for an admin update
    RequesterStatusChange {
        /// Id of the updated record
        request_id: uuid::Uuid,
        /// Status after the update
        status: PdiStatus,
        /// Admin message, if one was supplied
        message: Option<String>,
    },
}

/// In-memory [`Notifier`] that records every attempt instead of sending
/// anything, keeping tests deterministic and offline.
///
/// # Examples
///
/// ```
/// use pdi_core::RecordingNotifier;
///
/// let notifier = RecordingNotifier::new();
/// assert!(notifier.is_empty());
///
/// let failing = RecordingNotifier::failing();
/// // `failing` still records attempts but reports delivery failure.
/// ```
#[derive(Debug)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<Notification>>,
    delivers: bool,
}

impl RecordingNotifier {
    /// Creates a notifier whose deliveries succeed.
    pub fn new() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            delivers: true,
        }
    }

    /// Creates a notifier whose deliveries fail (still recorded).
    pub fn failing() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            delivers: false,
        }
    }

    /// Returns the number of recorded attempts.
    pub fn len(&self) -> usize {
        self.sent.borrow().len()
    }

    /// Returns `true` if nothing has been attempted.
    pub fn is_empty(&self) -> bool {
        self.sent.borrow().is_empty()
    }

    /// Returns a snapshot of all recorded attempts.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.borrow().clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_admin_of_new_request(&self, record: &PdiRequest, requester: &Principal) -> bool {
        self.sent.borrow_mut().push(Notification::AdminNewRequest {
            request_id: record.id,
            requester_id: requester.user_id.clone(),
        });
        self.delivers
    }

    fn notify_requester_of_status_change(
        &self,
        record: &PdiRequest,
        status: PdiStatus,
        message: Option<&str>,
    ) -> bool {
        self.sent
            .borrow_mut()
            .push(Notification::RequesterStatusChange {
                request_id: record.id,
                status,
                message: message.map(str::to_string),
            });
        self.delivers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn record() -> PdiRequest {
        PdiRequest {
            id: Uuid::now_v7(),
            user_id: "u-1".to_string(),
            vehicle_make: "Honda".to_string(),
            vehicle_model: "City".to_string(),
            location: "Pune".to_string(),
            mobile: "9999999999".to_string(),
            preferred_date: None,
            notes: None,
            status: PdiStatus::Pending,
            admin_notes: None,
            admin_message: None,
            pdi_inspection_id: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn requester() -> Principal {
        Principal {
            user_id: "u-1".to_string(),
            email: "c@example.com".to_string(),
            name: "C".to_string(),
            role: Role::Client,
        }
    }

    #[test]
    fn outcome_from_delivery() {
        assert_eq!(NotifyOutcome::from_delivery(true), NotifyOutcome::Delivered);
        assert_eq!(NotifyOutcome::from_delivery(false), NotifyOutcome::Failed);
    }

    #[test]
    fn recording_notifier_captures_admin_alert() {
        let notifier = RecordingNotifier::new();
        let rec = record();

        assert!(notifier.notify_admin_of_new_request(&rec, &requester()));

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            Notification::AdminNewRequest {
                request_id: rec.id,
                requester_id: "u-1".to_string(),
            }
        );
    }

    #[test]
    fn recording_notifier_captures_status_alert() {
        let notifier = RecordingNotifier::new();
        let rec = record();

        notifier.notify_requester_of_status_change(&rec, PdiStatus::Completed, Some("done"));

        assert_eq!(
            notifier.sent()[0],
            Notification::RequesterStatusChange {
                request_id: rec.id,
                status: PdiStatus::Completed,
                message: Some("done".to_string()),
            }
        );
    }

    #[test]
    fn failing_notifier_records_but_reports_failure() {
        let notifier = RecordingNotifier::failing();
        let rec = record();

        assert!(!notifier.notify_admin_of_new_request(&rec, &requester()));
        assert_eq!(notifier.len(), 1);
    }
}
