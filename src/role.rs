use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The role attached to an authenticated principal.
///
/// Roles form a closed set so that role checks can be matched exhaustively.
/// The wire form (serde and `FromStr`/`Display`) is the upper-snake string
/// used by credentials and JSON payloads: `"ADMIN"`, `"CLIENT"`, `"DEALER"`,
/// `"AGENT"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Back-office administrator; sole writer of request status
    Admin,
    /// End customer submitting inspection requests
    Client,
    /// Dealership account
    Dealer,
    /// Field inspection agent
    Agent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Client => write!(f, "CLIENT"),
            Role::Dealer => write!(f, "DEALER"),
            Role::Agent => write!(f, "AGENT"),
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "CLIENT" => Ok(Role::Client),
            "DEALER" => Ok(Role::Dealer),
            "AGENT" => Ok(Role::Agent),
            other => Err(Error::validation(format!("unknown role '{other}'"))),
        }
    }
}
