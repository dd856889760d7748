//! PDI request lifecycle operations.
//!
//! Every operation runs the same discipline: evaluate access first (fail
//! closed, before any read or write), validate input, mutate through the
//! store, then attempt the best-effort notification. A failed notification
//! is logged and reported in the outcome; it never rolls back or masks the
//! committed mutation.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::Error;
use crate::gate::{AccessCheck, Authenticated, RoleIs};
use crate::notify::{Notifier, NotifyOutcome};
use crate::principal::Principal;
use crate::request::{NewPdiRequest, PdiRequest, PdiRequestPatch};
use crate::role::Role;
use crate::store::PdiStore;

/// Result of a successful create: the persisted record plus the outcome of
/// the admin notification, reported separately so a failed delivery cannot
/// be mistaken for a failed mutation.
#[derive(Debug, Clone)]
pub struct Created {
    /// The newly persisted request
    pub request: PdiRequest,
    /// How the admin notification fared
    pub notification: NotifyOutcome,
}

/// Result of a successful admin update, with the requester-notification
/// outcome reported separately from the committed record.
#[derive(Debug, Clone)]
pub struct Updated {
    /// The record after the update
    pub request: PdiRequest,
    /// How the requester notification fared
    pub notification: NotifyOutcome,
}

/// The PDI request lifecycle service.
///
/// Generic over its two collaborators: a [`PdiStore`] for persistence and a
/// [`Notifier`] for alert delivery. Handlers pass business parameters only;
/// authorization and error mapping live here.
///
/// # Examples
///
/// ```
/// use pdi_core::{
///     MemoryStore, NewPdiRequest, PdiService, PdiStatus, Principal, RecordingNotifier, Role,
/// };
///
/// let service = PdiService::new(MemoryStore::new(), RecordingNotifier::new());
/// let client = Principal {
///     user_id: "u-1".to_string(),
///     email: "alice@example.com".to_string(),
///     name: "Alice".to_string(),
///     role: Role::Client,
/// };
///
/// let created = service
///     .create(
///         Some(&client),
///         NewPdiRequest {
///             vehicle_make: "Honda".to_string(),
///             vehicle_model: "City".to_string(),
///             location: "Pune".to_string(),
///             mobile: "9999999999".to_string(),
///             ..Default::default()
///         },
///     )
///     .expect("create succeeds");
/// assert_eq!(created.request.status, PdiStatus::Pending);
/// ```
pub struct PdiService<S: PdiStore, N: Notifier> {
    store: S,
    notifier: N,
}

impl<S: PdiStore, N: Notifier> PdiService<S, N> {
    /// Creates a service over the given collaborators.
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Returns the persistence collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the notification collaborator.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Creates a new PDI request owned by the calling principal.
    ///
    /// The record is persisted with `status = Pending`, a fresh id, and the
    /// principal as owner; afterwards the admin team is notified
    /// best-effort.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` without a principal, `Validation` if a required
    /// field is blank, `Internal` if persistence fails. Nothing is persisted
    /// on any error path.
    pub fn create(
        &self,
        principal: Option<&Principal>,
        input: NewPdiRequest,
    ) -> Result<Created, Error> {
        let requester = AccessCheck::new(principal).require(Authenticated).check()?;
        input.validate()?;

        let record = PdiRequest {
            id: Uuid::now_v7(),
            user_id: requester.user_id.clone(),
            vehicle_make: input.vehicle_make,
            vehicle_model: input.vehicle_model,
            location: input.location,
            mobile: input.mobile,
            preferred_date: input.preferred_date,
            notes: input.notes,
            status: crate::request::PdiStatus::Pending,
            admin_notes: None,
            admin_message: None,
            pdi_inspection_id: None,
            created_at: OffsetDateTime::now_utc(),
        };

        self.store.insert(record.clone())?;
        tracing::info!(request_id = %record.id, user_id = %record.user_id, "created PDI request");

        let delivered = self.notifier.notify_admin_of_new_request(&record, requester);
        if !delivered {
            tracing::warn!(request_id = %record.id, "admin notification failed (continuing)");
        }

        Ok(Created {
            request: record,
            notification: NotifyOutcome::from_delivery(delivered),
        })
    }

    /// Applies an admin patch to a request.
    ///
    /// Only supplied fields change. If the patch carries a status change or
    /// a non-empty admin message, the requester is notified best-effort
    /// after the write commits.
    ///
    /// # Errors
    ///
    /// `Unauthenticated`/`Forbidden` before any read or write for a missing
    /// or non-admin principal, `NotFound` for an unknown id, `Validation`
    /// for a write out of a terminal status, `Internal` if persistence
    /// fails.
    pub fn update_status(
        &self,
        principal: Option<&Principal>,
        id: Uuid,
        patch: PdiRequestPatch,
    ) -> Result<Updated, Error> {
        AccessCheck::new(principal)
            .require(Authenticated)
            .require(RoleIs(Role::Admin))
            .check()?;

        let mut record = self
            .store
            .get(id)?
            .ok_or_else(|| Error::not_found(format!("no request with id {id}")))?;

        if let Some(next) = patch.status {
            if !record.status.can_transition_to(next) {
                return Err(Error::validation(format!(
                    "cannot move a {} request to {next}",
                    record.status
                )));
            }
        }

        let notify_requester = patch.notifies_requester();

        if let Some(next) = patch.status {
            record.status = next;
        }
        if let Some(notes) = patch.admin_notes {
            record.admin_notes = Some(notes);
        }
        if let Some(message) = patch.admin_message {
            record.admin_message = Some(message);
        }

        let record = self.store.update(record)?;
        tracing::info!(request_id = %record.id, status = %record.status, "updated PDI request");

        let notification = if notify_requester {
            let delivered = self.notifier.notify_requester_of_status_change(
                &record,
                record.status,
                record.admin_message.as_deref(),
            );
            if !delivered {
                tracing::warn!(request_id = %record.id, "requester notification failed (continuing)");
            }
            NotifyOutcome::from_delivery(delivered)
        } else {
            NotifyOutcome::Skipped
        };

        Ok(Updated {
            request: record,
            notification,
        })
    }

    /// Lists requests visible to the principal, newest first.
    ///
    /// Admins see every record; any other role sees only records it owns.
    pub fn list_for_principal(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Vec<PdiRequest>, Error> {
        let caller = AccessCheck::new(principal).require(Authenticated).check()?;

        let mut records = self.store.list()?;
        if !caller.is_admin() {
            records.retain(|r| r.user_id == caller.user_id);
        }
        // v7 ids break ties between records created in the same instant
        records.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        tracing::debug!(user_id = %caller.user_id, count = records.len(), "listed PDI requests");
        Ok(records)
    }

    /// Fetches a single request.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent; `Forbidden` unless the caller is an admin or
    /// the record's owner.
    pub fn get_by_id(
        &self,
        principal: Option<&Principal>,
        id: Uuid,
    ) -> Result<PdiRequest, Error> {
        let caller = AccessCheck::new(principal).require(Authenticated).check()?;

        let record = self
            .store
            .get(id)?
            .ok_or_else(|| Error::not_found(format!("no request with id {id}")))?;

        if !caller.is_admin() && record.user_id != caller.user_id {
            return Err(Error::forbidden("not the owner of this request"));
        }

        Ok(record)
    }
}
