//! Caller identity and role checks.
//!
//! Authentication itself happens upstream. By the time a request reaches this
//! service a gateway has already verified the user and forwarded the user id and
//! role set as headers. [`IdentityProvider`] is the seam where that resolution
//! happens, so another scheme can be plugged into the router without touching the
//! review logic.

use crate::errors::{Error, Result};
use axum::http::HeaderMap;
use std::fmt;

/// Header carrying the authenticated user's numeric id
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying a comma-separated role list (e.g. `customer,admin`)
pub const USER_ROLES_HEADER: &str = "x-user-roles";

/// Capabilities a caller can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// May submit reviews
    Customer,
    /// May retire reviews
    Admin,
}

impl Role {
    /// Parses a role name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "customer" => Some(Self::Customer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => f.write_str("customer"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// The authenticated user behind a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    /// User id, stored as `reviews.user_id` on submission
    pub id: i64,
    roles: Vec<Role>,
}

impl Caller {
    /// Creates a caller holding the given roles.
    #[must_use]
    pub fn new(id: i64, roles: impl IntoIterator<Item = Role>) -> Self {
        let mut unique = Vec::new();
        for role in roles {
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        Self { id, roles: unique }
    }

    /// Whether the caller holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Fails with [`Error::Forbidden`] unless the caller holds `role`.
    pub fn require(&self, role: Role) -> Result<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(Error::Forbidden { required: role })
        }
    }
}

/// Resolves the caller of a request.
pub trait IdentityProvider: Send + Sync {
    /// Returns the caller described by the request headers, or
    /// [`Error::Unauthorized`] when no identity can be established.
    fn resolve_caller(&self, headers: &HeaderMap) -> Result<Caller>;
}

/// Trusts identity headers set by an authenticating gateway.
///
/// Unknown role names are skipped so a gateway can forward roles this service
/// does not care about.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderIdentityProvider;

impl IdentityProvider for HeaderIdentityProvider {
    fn resolve_caller(&self, headers: &HeaderMap) -> Result<Caller> {
        let raw_id = headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| Error::Unauthorized {
                reason: format!("missing {USER_ID_HEADER} header"),
            })?
            .to_str()
            .map_err(|_| Error::Unauthorized {
                reason: format!("{USER_ID_HEADER} is not valid text"),
            })?;

        let id = raw_id.trim().parse::<i64>().map_err(|_| Error::Unauthorized {
            reason: format!("{USER_ID_HEADER} is not a valid user id"),
        })?;

        let roles = headers
            .get(USER_ROLES_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(',').filter_map(Role::parse).collect::<Vec<_>>())
            .unwrap_or_default();

        Ok(Caller::new(id, roles))
    }
}
