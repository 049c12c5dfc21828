//! Actor identity and role capabilities.

use super::{ActorId, error::ParseActorRoleError};
use serde::{Deserialize, Serialize};

/// Role supplied by the identity provider for an authenticated caller.
///
/// The engine trusts this value as already authenticated; it only decides
/// what the role is permitted to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Full administrative control, including policy overrides.
    Admin,
    /// Elevated project collaborator.
    Associate,
    /// Regular project member.
    Member,
    /// Read-only viewer, e.g. a public share link.
    Guest,
}

impl ActorRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Associate => "associate",
            Self::Member => "member",
            Self::Guest => "guest",
        }
    }

    /// Returns whether the role may move tasks between columns at all.
    ///
    /// This is the single consolidated capability check evaluated before
    /// the transition validator runs; per-rule permission checks are not
    /// scattered through the pipeline.
    #[must_use]
    pub const fn can_move_tasks(self) -> bool {
        !matches!(self, Self::Guest)
    }

    /// Returns whether the role may combine a move with the force flag to
    /// bypass policy constraints such as WIP limits.
    ///
    /// Structural constraints (blocking dependencies, closed sprints) are
    /// never bypassed, whatever the role.
    #[must_use]
    pub const fn can_force_override(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns whether the role may restructure the board (create and
    /// delete columns, manage dependency edges, soft-delete tasks).
    #[must_use]
    pub const fn can_manage_board(self) -> bool {
        matches!(self, Self::Admin | Self::Associate)
    }
}

impl TryFrom<&str> for ActorRole {
    type Error = ParseActorRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "associate" => Ok(Self::Associate),
            "member" => Ok(Self::Member),
            "guest" => Ok(Self::Guest),
            _ => Err(ParseActorRoleError(value.to_owned())),
        }
    }
}

/// Authenticated caller identity used for capability checks and audit
/// attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    role: ActorRole,
}

impl Actor {
    /// Creates an actor from identity-provider data.
    #[must_use]
    pub const fn new(id: ActorId, role: ActorRole) -> Self {
        Self { id, role }
    }

    /// Returns the actor identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the actor role.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        self.role
    }
}
