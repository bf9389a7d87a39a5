//! Trusted identity
//!
//! Authentication lives upstream: the identity provider resolves the
//! credential and the gateway injects a `(user id, role, company id)`
//! triple as request headers. This module only reads that triple and
//! never re-verifies credentials.

pub mod extractor;

use serde::{Deserialize, Serialize};

use crate::utils::{AppError, AppResult};

/// Roles the identity provider can assert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Provisions companies and users across tenants
    SuperAdmin,
    /// Operates one company: register, reports, refunds
    CompanyAdmin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "super_admin" => Some(Role::SuperAdmin),
            "company_admin" => Some(Role::CompanyAdmin),
            _ => None,
        }
    }
}

/// The acting principal, as asserted by the gateway
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub role: Role,
    pub company_id: Option<String>,
}

impl CurrentUser {
    /// Company-scoped operations require a company admin with an
    /// assigned company; the returned id scopes every query.
    pub fn require_company(&self) -> AppResult<&str> {
        if self.role != Role::CompanyAdmin {
            return Err(AppError::forbidden("Company admin role required"));
        }
        self.company_id
            .as_deref()
            .ok_or_else(|| AppError::forbidden("User must be assigned to a company"))
    }
}
