//! Session context and role-based capabilities.
//!
//! Every service call receives the caller's [`Session`] explicitly. Which role
//! may do what is decided in one place, [`Role::capabilities`], so handlers ask
//! for a [`Capability`] instead of comparing role strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Client,
    Worker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Edit site pages, services, projects and blog posts
    ManageContent,
    /// Maintain the worker roster and log hours on behalf of workers
    ManageWorkers,
    ReviewDayOff,
    /// Read monthly summaries of every worker
    ViewReports,
    LogOwnHours,
    RequestDayOff,
    /// Open and follow contact tickets
    ManageTickets,
}

impl Role {
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Role::SuperAdmin | Role::Admin => &[
                ManageContent,
                ManageWorkers,
                ReviewDayOff,
                ViewReports,
                ManageTickets,
            ],
            Role::Client => &[ManageTickets],
            Role::Worker => &[LogOwnHours, RequestDayOff],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Client => "client",
            Role::Worker => "worker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthorizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "client" => Ok(Role::Client),
            "worker" => Ok(Role::Worker),
            other => Err(AuthorizationError::UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("User {user_id} ({role}) lacks capability {capability:?}")]
    MissingCapability {
        user_id: String,
        role: Role,
        capability: Capability,
    },
    #[error("User {user_id} cannot act for worker {worker_id}")]
    NotOwnRecord { user_id: String, worker_id: String },
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// The authenticated caller of a service operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub full_name: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: &str, full_name: &str, role: Role) -> Self {
        Self {
            user_id: user_id.to_string(),
            full_name: full_name.to_string(),
            role,
        }
    }
}

pub fn has_capability(session: &Session, capability: Capability) -> bool {
    session.role.capabilities().contains(&capability)
}

pub fn require(session: &Session, capability: Capability) -> Result<(), AuthorizationError> {
    if has_capability(session, capability) {
        Ok(())
    } else {
        Err(AuthorizationError::MissingCapability {
            user_id: session.user_id.clone(),
            role: session.role,
            capability,
        })
    }
}

/// Workers act for themselves with `own_capability`; anyone holding
/// `ManageWorkers` may act for any worker.
pub fn require_for_worker(
    session: &Session,
    worker_id: &str,
    own_capability: Capability,
) -> Result<(), AuthorizationError> {
    if has_capability(session, Capability::ManageWorkers) {
        return Ok(());
    }
    require(session, own_capability)?;
    if session.user_id == worker_id {
        Ok(())
    } else {
        Err(AuthorizationError::NotOwnRecord {
            user_id: session.user_id.clone(),
            worker_id: worker_id.to_string(),
        })
    }
}

/// Reading a worker's own data: the worker, or anyone who can view reports
pub fn require_read_for_worker(
    session: &Session,
    worker_id: &str,
) -> Result<(), AuthorizationError> {
    if has_capability(session, Capability::ViewReports) || session.user_id == worker_id {
        Ok(())
    } else {
        Err(AuthorizationError::NotOwnRecord {
            user_id: session.user_id.clone(),
            worker_id: worker_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_roles_share_capabilities() {
        for role in [Role::Admin, Role::SuperAdmin] {
            let session = Session::new("a1", "Admin", role);
            assert!(has_capability(&session, Capability::ManageContent));
            assert!(has_capability(&session, Capability::ReviewDayOff));
            assert!(has_capability(&session, Capability::ViewReports));
            assert!(!has_capability(&session, Capability::LogOwnHours));
        }
    }

    #[test]
    fn test_worker_and_client_capabilities() {
        let worker = Session::new("w1", "Worker", Role::Worker);
        assert!(has_capability(&worker, Capability::LogOwnHours));
        assert!(has_capability(&worker, Capability::RequestDayOff));
        assert!(require(&worker, Capability::ViewReports).is_err());

        let client = Session::new("c1", "Client", Role::Client);
        assert!(has_capability(&client, Capability::ManageTickets));
        assert!(!has_capability(&client, Capability::LogOwnHours));
    }

    #[test]
    fn test_require_for_worker() {
        let worker = Session::new("w1", "Worker", Role::Worker);
        assert!(require_for_worker(&worker, "w1", Capability::LogOwnHours).is_ok());
        assert_eq!(
            require_for_worker(&worker, "w2", Capability::LogOwnHours),
            Err(AuthorizationError::NotOwnRecord {
                user_id: "w1".to_string(),
                worker_id: "w2".to_string()
            })
        );

        let admin = Session::new("a1", "Admin", Role::Admin);
        assert!(require_for_worker(&admin, "w2", Capability::LogOwnHours).is_ok());

        let client = Session::new("c1", "Client", Role::Client);
        assert!(matches!(
            require_for_worker(&client, "c1", Capability::LogOwnHours),
            Err(AuthorizationError::MissingCapability { .. })
        ));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("super_admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!("Worker".parse::<Role>().unwrap(), Role::Worker);
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
