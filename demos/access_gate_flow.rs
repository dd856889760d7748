//! Access gate and credential demonstration.
//!
//! This example shows the credential path end to end:
//! 1. Issue signed credentials for different roles
//! 2. Resolve them back into principals through the gate
//! 3. Watch forged and expired credentials collapse to anonymous
//! 4. Run chained access checks against the resolved principals
//!
//! Run with: `cargo run --example access_gate_flow`

use pdi_core::{
    AccessCheck, AccessGate, Authenticated, CredentialKeys, Principal, Role, RoleIs,
};
use time::Duration;

fn principal(id: &str, role: Role) -> Principal {
    Principal {
        user_id: id.to_string(),
        email: format!("{id}@example.com"),
        name: id.to_string(),
        role,
    }
}

fn main() {
    println!("=== Access Gate Flow Example ===");

    let gate = AccessGate::new(CredentialKeys::new(b"demo-signing-secret", Duration::hours(8)));

    // Scenario 1: a valid credential round-trips
    println!("\n--- Scenario 1: Valid Credential ---");
    let admin = principal("admin-1", Role::Admin);
    let token = gate.keys().issue(&admin).expect("issue succeeds");
    println!("Issued token ({} chars)", token.len());

    let resolved = gate.resolve_principal(Some(&token));
    println!("✓ Resolved: {:?}", resolved.as_ref().map(|p| &p.name));

    // Scenario 2: forged and absent credentials look the same
    println!("\n--- Scenario 2: Forged / Absent ---");
    let other_gate = AccessGate::new(CredentialKeys::new(b"attacker-secret", Duration::hours(8)));
    let forged = other_gate.keys().issue(&admin).expect("issue succeeds");
    println!("Forged token resolves: {:?}", gate.resolve_principal(Some(&forged)));
    println!("Missing token resolves: {:?}", gate.resolve_principal(None));

    // Scenario 3: expiry is enforced
    println!("\n--- Scenario 3: Expired ---");
    let stale_keys = CredentialKeys::new(b"demo-signing-secret", Duration::hours(-1));
    let stale = stale_keys.issue(&admin).expect("issue succeeds");
    println!("Expired token resolves: {:?}", gate.resolve_principal(Some(&stale)));

    // Scenario 4: chained requirement checks
    println!("\n--- Scenario 4: Access Checks ---");
    let checks: [(&str, Option<Principal>); 3] = [
        ("admin", Some(principal("admin-1", Role::Admin))),
        ("dealer", Some(principal("d-1", Role::Dealer))),
        ("anonymous", None),
    ];

    for (label, p) in &checks {
        let verdict = AccessCheck::new(p.as_ref())
            .require(Authenticated)
            .require(RoleIs(Role::Admin))
            .check();
        match verdict {
            Ok(admitted) => println!("  {label}: ✓ admitted as {}", admitted.user_id),
            Err(e) => println!("  {label}: ✗ {e}"),
        }
    }

    println!("\n=== Key Takeaways ===");
    println!("1. Invalid, forged, expired, and absent credentials are indistinguishable");
    println!("2. Verification never panics and never leaks why a token failed");
    println!("3. Checks always evaluate authentication before roles");
    println!("4. Every denial is a tagged error, ready for an HTTP mapping");
}
