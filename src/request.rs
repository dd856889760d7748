use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::error::Error;

/// Lifecycle status of a PDI request.
///
/// ```text
/// Pending ──> InProgress ──> Completed
///    │             │
///    └─────────────┴───────> IssuesFound
/// ```
///
/// `Pending` is the sole initial state. `Completed` and `IssuesFound` are
/// terminal: once reached, the only accepted write is an idempotent re-apply
/// of the same status. The wire form is the upper-snake string used by JSON
/// payloads: `"PENDING"`, `"IN_PROGRESS"`, `"COMPLETED"`, `"ISSUES_FOUND"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PdiStatus {
    /// Submitted, not yet picked up by an inspector
    Pending,
    /// Inspection underway
    InProgress,
    /// Inspection finished cleanly (terminal)
    Completed,
    /// Inspection flagged problems (terminal)
    IssuesFound,
}

impl PdiStatus {
    /// Returns `true` for the two terminal sink states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PdiStatus::Completed | PdiStatus::IssuesFound)
    }

    /// Returns `true` if a record in this status may be written to `next`.
    ///
    /// Non-terminal states accept any target (admins may move a record
    /// straight from `Pending` to `Completed`); terminal states accept only
    /// their own status, making repeated updates idempotent.
    pub fn can_transition_to(&self, next: PdiStatus) -> bool {
        if self.is_terminal() {
            *self == next
        } else {
            true
        }
    }
}

impl fmt::Display for PdiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdiStatus::Pending => write!(f, "PENDING"),
            PdiStatus::InProgress => write!(f, "IN_PROGRESS"),
            PdiStatus::Completed => write!(f, "COMPLETED"),
            PdiStatus::IssuesFound => write!(f, "ISSUES_FOUND"),
        }
    }
}

impl FromStr for PdiStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PdiStatus::Pending),
            "IN_PROGRESS" => Ok(PdiStatus::InProgress),
            "COMPLETED" => Ok(PdiStatus::Completed),
            "ISSUES_FOUND" => Ok(PdiStatus::IssuesFound),
            other => Err(Error::validation(format!("unknown status '{other}'"))),
        }
    }
}

/// A client-submitted pre-delivery inspection request.
///
/// Created through [`PdiService::create`](crate::PdiService::create) and
/// mutated exclusively through the admin update operation. `user_id` never
/// changes after creation and the core never deletes records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdiRequest {
    /// Unique identifier assigned at creation
    pub id: Uuid,
    /// Owning principal's user id (immutable)
    pub user_id: String,
    /// Vehicle make, e.g. "Honda"
    pub vehicle_make: String,
    /// Vehicle model, e.g. "City"
    pub vehicle_model: String,
    /// Where the inspection should take place
    pub location: String,
    /// Requester contact number
    pub mobile: String,
    /// Requested inspection date, if any
    pub preferred_date: Option<Date>,
    /// Free-text notes from the requester
    pub notes: Option<String>,
    /// Current lifecycle status
    pub status: PdiStatus,
    /// Internal notes, writable only by admins
    pub admin_notes: Option<String>,
    /// Message relayed to the requester, writable only by admins
    pub admin_message: Option<String>,
    /// Weak reference to a completed inspection record
    pub pdi_inspection_id: Option<Uuid>,
    /// Creation timestamp, assigned once
    pub created_at: OffsetDateTime,
}

/// Input for creating a PDI request.
///
/// The four string fields are required and must be non-blank;
/// [`validate`](NewPdiRequest::validate) enforces this before anything is
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPdiRequest {
    /// Vehicle make (required)
    pub vehicle_make: String,
    /// Vehicle model (required)
    pub vehicle_model: String,
    /// Inspection location (required)
    pub location: String,
    /// Contact number (required)
    pub mobile: String,
    /// Requested inspection date
    #[serde(default)]
    pub preferred_date: Option<Date>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewPdiRequest {
    /// Checks that every required field is present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        Self::require_non_blank("vehicle_make", &self.vehicle_make)?;
        Self::require_non_blank("vehicle_model", &self.vehicle_model)?;
        Self::require_non_blank("location", &self.location)?;
        Self::require_non_blank("mobile", &self.mobile)?;
        Ok(())
    }

    fn require_non_blank(field: &str, value: &str) -> Result<(), Error> {
        if value.trim().is_empty() {
            return Err(Error::validation(format!("{field} must not be empty")));
        }
        Ok(())
    }
}

/// Partial update applied by an admin.
///
/// Absent fields leave the record unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdiRequestPatch {
    /// New lifecycle status, if changing
    #[serde(default)]
    pub status: Option<PdiStatus>,
    /// Internal admin notes
    #[serde(default)]
    pub admin_notes: Option<String>,
    /// Message for the requester
    #[serde(default)]
    pub admin_message: Option<String>,
}

impl PdiRequestPatch {
    /// Returns `true` if applying this patch should notify the requester:
    /// a status change or a non-empty admin message was supplied.
    pub fn notifies_requester(&self) -> bool {
        self.status.is_some()
            || self
                .admin_message
                .as_deref()
                .is_some_and(|m| !m.trim().is_empty())
    }
}
