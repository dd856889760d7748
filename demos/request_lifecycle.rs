//! PDI request lifecycle demonstration.
//!
//! This example walks one request through its whole life:
//! 1. A client logs in and submits an inspection request
//! 2. The admin team is alerted
//! 3. An admin moves the request through IN_PROGRESS to COMPLETED
//! 4. Terminal-state writes are refused afterwards
//!
//! Run with: `cargo run --example request_lifecycle`

use pdi_core::{
    MemoryStore, NewPdiRequest, PdiRequestPatch, PdiService, PdiStatus, Principal,
    RecordingNotifier, Role,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== PDI Request Lifecycle Example ===");

    let service = PdiService::new(MemoryStore::new(), RecordingNotifier::new());

    let client = Principal {
        user_id: "u-100".to_string(),
        email: "alice@example.com".to_string(),
        name: "Alice".to_string(),
        role: Role::Client,
    };
    let admin = Principal {
        user_id: "admin-1".to_string(),
        email: "admin@example.com".to_string(),
        name: "Admin".to_string(),
        role: Role::Admin,
    };

    // Step 1: the client submits a request
    println!("\n--- Step 1: Client submits ---");
    let created = service
        .create(
            Some(&client),
            NewPdiRequest {
                vehicle_make: "Honda".to_string(),
                vehicle_model: "City".to_string(),
                location: "Pune".to_string(),
                mobile: "9999999999".to_string(),
                notes: Some("weekend preferred".to_string()),
                ..Default::default()
            },
        )
        .expect("create succeeds");
    println!("✓ Created {} ({})", created.request.id, created.request.status);
    println!("  Admin notification: {:?}", created.notification);

    // Step 2: a non-admin tries (and fails) to touch the record
    println!("\n--- Step 2: Client tries to self-complete ---");
    let denied = service.update_status(
        Some(&client),
        created.request.id,
        PdiRequestPatch {
            status: Some(PdiStatus::Completed),
            ..Default::default()
        },
    );
    match denied {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("✓ Expected denial: {e}"),
    }

    // Step 3: the admin works the request
    println!("\n--- Step 3: Admin inspects ---");
    let in_progress = service
        .update_status(
            Some(&admin),
            created.request.id,
            PdiRequestPatch {
                status: Some(PdiStatus::InProgress),
                admin_message: Some("inspector en route".to_string()),
                ..Default::default()
            },
        )
        .expect("admin update succeeds");
    println!("✓ Now {}", in_progress.request.status);
    println!("  Requester notification: {:?}", in_progress.notification);

    let completed = service
        .update_status(
            Some(&admin),
            created.request.id,
            PdiRequestPatch {
                status: Some(PdiStatus::Completed),
                admin_message: Some("all clear, ready for delivery".to_string()),
                ..Default::default()
            },
        )
        .expect("completion succeeds");
    println!("✓ Now {}", completed.request.status);

    // Step 4: the terminal state is sticky
    println!("\n--- Step 4: Terminal state ---");
    let reopened = service.update_status(
        Some(&admin),
        created.request.id,
        PdiRequestPatch {
            status: Some(PdiStatus::Pending),
            ..Default::default()
        },
    );
    match reopened {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("✓ Expected refusal: {e}"),
    }

    // The client still sees their finished request
    let mine = service
        .list_for_principal(Some(&client))
        .expect("list succeeds");
    println!("\nClient sees {} request(s); latest is {}", mine.len(), mine[0].status);

    println!("\n=== Key Takeaways ===");
    println!("1. Every operation checks access before touching storage");
    println!("2. Only admins mutate requests after submission");
    println!("3. COMPLETED and ISSUES_FOUND are one-way doors");
    println!("4. Notification failures report next to the mutation, never instead of it");
}
