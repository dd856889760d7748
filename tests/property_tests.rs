//! Property tests for the access and lifecycle invariants.
//!
//! These validate cross-module guarantees over generated inputs: denial
//! paths never mutate state, fresh records always start in the same shape,
//! and credential verification never panics on arbitrary bytes.

use pdi_core::{
    AccessCheck, CredentialKeys, MemoryStore, NewPdiRequest, PdiRequestPatch, PdiService,
    PdiStatus, PdiStore, Principal, RecordingNotifier, Role, RoleIs,
};
use proptest::prelude::*;
use time::Duration;
use uuid::Uuid;

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Admin),
        Just(Role::Client),
        Just(Role::Dealer),
        Just(Role::Agent),
    ]
}

fn arb_non_admin_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Client), Just(Role::Dealer), Just(Role::Agent)]
}

fn arb_principal(role: impl Strategy<Value = Role>) -> impl Strategy<Value = Principal> {
    (
        prop::string::string_regex("[a-z0-9-]{3,12}").unwrap(),
        prop::string::string_regex("[A-Za-z ]{3,15}").unwrap(),
        role,
    )
        .prop_map(|(id, name, role)| Principal {
            email: format!("{id}@example.com"),
            user_id: id,
            name,
            role,
        })
}

fn arb_status() -> impl Strategy<Value = PdiStatus> {
    prop_oneof![
        Just(PdiStatus::Pending),
        Just(PdiStatus::InProgress),
        Just(PdiStatus::Completed),
        Just(PdiStatus::IssuesFound),
    ]
}

fn arb_input() -> impl Strategy<Value = NewPdiRequest> {
    (
        prop::string::string_regex("[A-Za-z]{2,10}").unwrap(),
        prop::string::string_regex("[A-Za-z0-9][A-Za-z0-9 ]{1,11}").unwrap(),
        prop::string::string_regex("[A-Za-z][A-Za-z ]{2,14}").unwrap(),
        prop::string::string_regex("[0-9]{10}").unwrap(),
    )
        .prop_map(|(make, model, location, mobile)| NewPdiRequest {
            vehicle_make: make,
            vehicle_model: model,
            location,
            mobile,
            preferred_date: None,
            notes: None,
        })
}

fn service() -> PdiService<MemoryStore, RecordingNotifier> {
    PdiService::new(MemoryStore::new(), RecordingNotifier::new())
}

proptest! {
    /// A non-admin principal can never push an update through, no matter
    /// which status it aims for, and the stored record never moves.
    #[test]
    fn non_admin_updates_are_always_denied(
        caller in arb_principal(arb_non_admin_role()),
        owner in arb_principal(arb_non_admin_role()),
        target in arb_status(),
        input in arb_input(),
    ) {
        let svc = service();
        let id = svc.create(Some(&owner), input).unwrap().request.id;

        let patch = PdiRequestPatch { status: Some(target), ..Default::default() };
        let err = svc.update_status(Some(&caller), id, patch).unwrap_err();

        prop_assert_eq!(err.kind, pdi_core::ErrorKind::Forbidden);
        let stored = svc.store().get(id).unwrap().unwrap();
        prop_assert_eq!(stored.status, PdiStatus::Pending);
    }

    /// Creation without a principal persists nothing and alerts no one.
    #[test]
    fn unauthenticated_create_leaves_no_trace(input in arb_input()) {
        let svc = service();
        prop_assert!(svc.create(None, input).is_err());
        prop_assert!(svc.store().is_empty());
        prop_assert!(svc.notifier().is_empty());
    }

    /// Blanking out any one required field rejects the whole submission.
    #[test]
    fn blank_required_field_persists_nothing(
        caller in arb_principal(arb_role()),
        input in arb_input(),
        field in 0usize..4,
        blank in prop::string::string_regex(" {0,4}").unwrap(),
    ) {
        let svc = service();
        let mut bad = input;
        match field {
            0 => bad.vehicle_make = blank,
            1 => bad.vehicle_model = blank,
            2 => bad.location = blank,
            _ => bad.mobile = blank,
        }

        let err = svc.create(Some(&caller), bad).unwrap_err();
        prop_assert_eq!(err.kind, pdi_core::ErrorKind::Validation);
        prop_assert!(svc.store().is_empty());
    }

    /// Every accepted submission starts Pending, owned by its caller, with
    /// the admin fields untouched.
    #[test]
    fn fresh_records_have_one_shape(
        caller in arb_principal(arb_role()),
        input in arb_input(),
    ) {
        let svc = service();
        let created = svc.create(Some(&caller), input).unwrap();

        prop_assert_eq!(created.request.status, PdiStatus::Pending);
        prop_assert_eq!(&created.request.user_id, &caller.user_id);
        prop_assert!(created.request.admin_notes.is_none());
        prop_assert!(created.request.admin_message.is_none());
        prop_assert!(created.request.pdi_inspection_id.is_none());
    }

    /// A non-admin listing never contains a record it does not own,
    /// regardless of how many other users have submitted.
    #[test]
    fn listings_never_leak_foreign_records(
        caller in arb_principal(arb_non_admin_role()),
        others in prop::collection::vec(arb_principal(arb_role()), 0..5),
        input in arb_input(),
    ) {
        let svc = service();
        for other in &others {
            svc.create(Some(other), input.clone()).unwrap();
        }
        svc.create(Some(&caller), input).unwrap();

        let listed = svc.list_for_principal(Some(&caller)).unwrap();
        prop_assert!(listed.iter().all(|r| r.user_id == caller.user_id));
        // Own records (including any same-id "others") are all present.
        let own = svc
            .store()
            .list()
            .unwrap()
            .into_iter()
            .filter(|r| r.user_id == caller.user_id)
            .count();
        prop_assert_eq!(listed.len(), own);
    }

    /// Once terminal, the only accepted status write is the same status;
    /// applying it repeatedly returns the identical record.
    #[test]
    fn terminal_states_are_sticky_and_idempotent(
        owner in arb_principal(arb_non_admin_role()),
        admin in arb_principal(Just(Role::Admin)),
        terminal in prop_oneof![Just(PdiStatus::Completed), Just(PdiStatus::IssuesFound)],
        target in arb_status(),
        input in arb_input(),
    ) {
        let svc = service();
        let id = svc.create(Some(&owner), input).unwrap().request.id;

        let seal = PdiRequestPatch { status: Some(terminal), ..Default::default() };
        let sealed = svc.update_status(Some(&admin), id, seal.clone()).unwrap();

        let attempt = PdiRequestPatch { status: Some(target), ..Default::default() };
        let result = svc.update_status(Some(&admin), id, attempt);

        if target == terminal {
            prop_assert_eq!(result.unwrap().request, sealed.request);
        } else {
            prop_assert_eq!(result.unwrap_err().kind, pdi_core::ErrorKind::Validation);
            prop_assert_eq!(svc.store().get(id).unwrap().unwrap().status, terminal);
        }
    }

    /// Verification of arbitrary credential strings never panics and never
    /// admits a principal.
    #[test]
    fn arbitrary_credentials_never_verify(token in ".*") {
        let keys = CredentialKeys::new(b"property-secret", Duration::hours(1));
        prop_assert!(keys.verify(&token).is_none());
    }

    /// An access check is a pure function of principal and requirements:
    /// the same inputs always produce the same verdict.
    #[test]
    fn access_checks_are_deterministic(
        principal in prop::option::of(arb_principal(arb_role())),
        required in arb_role(),
    ) {
        let first = AccessCheck::new(principal.as_ref())
            .require(RoleIs(required))
            .check()
            .map(|p| p.user_id.clone());
        let second = AccessCheck::new(principal.as_ref())
            .require(RoleIs(required))
            .check()
            .map(|p| p.user_id.clone());

        prop_assert_eq!(first.is_ok(), second.is_ok());
        match principal {
            None => prop_assert!(first.is_err()),
            Some(p) => prop_assert_eq!(first.is_ok(), p.role == required),
        }
    }
}

#[test]
fn unknown_request_ids_are_not_found_not_forbidden() {
    let svc = service();
    let admin = Principal {
        user_id: "admin-1".to_string(),
        email: "admin@example.com".to_string(),
        name: "Admin".to_string(),
        role: Role::Admin,
    };

    let err = svc.get_by_id(Some(&admin), Uuid::now_v7()).unwrap_err();
    assert_eq!(err.kind, pdi_core::ErrorKind::NotFound);
}
