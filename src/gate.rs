use crate::credential::CredentialKeys;
use crate::error::Error;
use crate::principal::Principal;
use crate::role::Role;

/// The authorization gate.
///
/// `AccessGate` resolves an opaque signed credential into a typed
/// [`Principal`] and is the entry point for per-operation access checks.
/// It owns no long-lived state beyond the signing-key configuration passed
/// in at construction; resolution is a pure function of the credential at
/// call time and is re-evaluated on every request.
///
/// # Examples
///
/// ```
/// use pdi_core::{AccessGate, CredentialKeys, Principal, Role};
/// use time::Duration;
///
/// let keys = CredentialKeys::new(b"doc-secret", Duration::hours(1));
/// let principal = Principal {
///     user_id: "u-1".to_string(),
///     email: "alice@example.com".to_string(),
///     name: "Alice".to_string(),
///     role: Role::Client,
/// };
/// let token = keys.issue(&principal).unwrap();
///
/// let gate = AccessGate::new(keys);
/// let resolved = gate.resolve_principal(Some(&token));
/// assert_eq!(resolved, Some(principal));
///
/// // A missing credential resolves exactly like an invalid one
/// assert_eq!(gate.resolve_principal(None), None);
/// ```
#[derive(Debug)]
pub struct AccessGate {
    keys: CredentialKeys,
}

impl AccessGate {
    /// Creates a gate from an explicit signing-key configuration.
    pub fn new(keys: CredentialKeys) -> Self {
        Self { keys }
    }

    /// Returns the signing-key configuration (used by login flows to issue
    /// credentials with the same key material the gate verifies against).
    pub fn keys(&self) -> &CredentialKeys {
        &self.keys
    }

    /// Resolves a credential into a principal.
    ///
    /// Returns `None` for an absent, malformed, expired, or wrongly signed
    /// credential; verification failures never raise to the caller.
    pub fn resolve_principal(&self, credential: Option<&str>) -> Option<Principal> {
        let token = credential?;
        self.keys.verify(token).map(|claims| claims.into_principal())
    }
}

/// A requirement evaluated by an [`AccessCheck`].
#[derive(Debug)]
pub enum AccessReq {
    /// Requires an authenticated principal
    Authenticated,
    /// Requires the principal to hold a specific role
    RoleIs { role: Role },
}

/// Requirement marker for "any authenticated principal".
pub struct Authenticated;

/// Requirement marker for "principal with this exact role".
pub struct RoleIs(pub Role);

impl From<Authenticated> for AccessReq {
    fn from(_: Authenticated) -> Self {
        AccessReq::Authenticated
    }
}

impl From<RoleIs> for AccessReq {
    fn from(r: RoleIs) -> Self {
        AccessReq::RoleIs { role: r.0 }
    }
}

/// Per-operation access check.
///
/// `AccessCheck` accumulates requirements and evaluates them in order when
/// [`check`](AccessCheck::check) is called. An authenticated principal is
/// always required; a missing one denies with `Unauthenticated` before any
/// role requirement is considered, and a role mismatch denies with
/// `Forbidden`. Denials are returned as tagged errors, never panics.
///
/// # Examples
///
/// ```
/// use pdi_core::{AccessCheck, Authenticated, Principal, Role, RoleIs, ErrorKind};
///
/// let admin = Principal {
///     user_id: "a-1".to_string(),
///     email: "root@example.com".to_string(),
///     name: "Root".to_string(),
///     role: Role::Admin,
/// };
///
/// let allowed = AccessCheck::new(Some(&admin))
///     .require(Authenticated)
///     .require(RoleIs(Role::Admin))
///     .check();
/// assert!(allowed.is_ok());
///
/// let denied = AccessCheck::new(None)
///     .require(Authenticated)
///     .check();
/// assert_eq!(denied.unwrap_err().kind, ErrorKind::Unauthenticated);
/// ```
pub struct AccessCheck<'a> {
    principal: Option<&'a Principal>,
    requirements: Vec<AccessReq>,
}

impl<'a> AccessCheck<'a> {
    /// Creates a check for the given (possibly unresolved) principal.
    pub fn new(principal: Option<&'a Principal>) -> Self {
        Self {
            principal,
            requirements: Vec::new(),
        }
    }

    /// Adds a requirement, deduplicating identical ones.
    ///
    /// Returns the updated check to allow method chaining.
    pub fn require(mut self, req: impl Into<AccessReq>) -> Self {
        let req = req.into();
        if !self
            .requirements
            .iter()
            .any(|r| Self::same_requirement(r, &req))
        {
            self.requirements.push(req);
        }
        self
    }

    /// Evaluates all requirements and returns the admitted principal.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` if no principal is present, or `Forbidden`
    /// for the first role requirement the principal does not satisfy.
    pub fn check(self) -> Result<&'a Principal, Error> {
        // Authentication is evaluated first regardless of requirement order
        let principal = self.principal.ok_or_else(|| {
            tracing::debug!("access denied: no authenticated principal");
            Error::unauthenticated("authentication required")
        })?;

        for req in &self.requirements {
            Self::validate_one(principal, req)?;
        }

        Ok(principal)
    }

    fn validate_one(principal: &Principal, req: &AccessReq) -> Result<(), Error> {
        match req {
            AccessReq::Authenticated => {}
            AccessReq::RoleIs { role } => {
                if !principal.has_role(*role) {
                    tracing::debug!(
                        user_id = %principal.user_id,
                        required = %role,
                        actual = %principal.role,
                        "access denied: role mismatch"
                    );
                    return Err(Error::forbidden(format!("{role} role required")));
                }
            }
        }
        Ok(())
    }

    fn same_requirement(a: &AccessReq, b: &AccessReq) -> bool {
        match (a, b) {
            (AccessReq::Authenticated, AccessReq::Authenticated) => true,
            (AccessReq::RoleIs { role: r1 }, AccessReq::RoleIs { role: r2 }) => r1 == r2,
            _ => false,
        }
    }
}
