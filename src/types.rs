//! Basic type definitions for the chat server
//!
//! Provides the identity and role types shared across the crate:
//! - `ClientId`: UUID-based unique client identifier
//! - `Role`: member/admin role fixed at registration

use uuid::Uuid;

/// Reserved username that is granted the admin role at registration.
pub const ADMIN_USERNAME: &str = "admin";

/// Unique client identifier (newtype pattern)
///
/// Wraps a UUID v4 for type-safe client identification.
/// Implements Hash and Eq for use as HashMap keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    /// Create a new random client ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client role, assigned once at registration
///
/// `Admin` is granted exactly to the client registering with the reserved
/// username [`ADMIN_USERNAME`]. Ordered so that `Member < Admin`, which lets
/// permission checks compare roles directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    /// Regular chat participant
    Member,
    /// Channel administrator (may kick users)
    Admin,
}

impl Role {
    /// Derive the role from a registered username
    pub fn from_username(username: &str) -> Self {
        if username == ADMIN_USERNAME {
            Role::Admin
        } else {
            Role::Member
        }
    }

    /// Check whether this role carries admin rights
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_unique() {
        let id1 = ClientId::new();
        let id2 = ClientId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_role_from_username() {
        assert_eq!(Role::from_username("admin"), Role::Admin);
        assert_eq!(Role::from_username("alice"), Role::Member);
        // The reserved name is matched exactly, not case-insensitively
        assert_eq!(Role::from_username("Admin"), Role::Member);
        assert_eq!(Role::from_username(""), Role::Member);
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Member < Role::Admin);
        assert!(Role::Admin.is_admin());
        assert!(!Role::Member.is_admin());
    }
}
