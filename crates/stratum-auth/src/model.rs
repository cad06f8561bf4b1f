//! Authentication and authorization models
//!
//! This file defines roles, permissions, JWT claims, and the account read
//! models served to frontends.

use chrono::{NaiveDate, Utc};
use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stratum_persistence::entity::account::{self, TableDensity};

/// HTTP header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const TOKEN_PREFIX: &str = "Bearer ";
/// Cookie fallback used by browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Default lifetime of a login token.
pub const DEFAULT_TOKEN_EXPIRE_SECONDS: i64 = 18000;

/// Account roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Auditor,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Auditor => "auditor",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auditor" => Ok(Role::Auditor),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Atomic REST API permissions.
///
/// The permissions for all account roles are defined on top of this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiPermission {
    CountryRead,
    AccountRead,
    AccountUpdate,
    AccountMeRead,
    AccountMeUpdate,
    Websocket,
}

impl ApiPermission {
    pub const ALL: &[ApiPermission] = &[
        ApiPermission::CountryRead,
        ApiPermission::AccountRead,
        ApiPermission::AccountUpdate,
        ApiPermission::AccountMeRead,
        ApiPermission::AccountMeUpdate,
        ApiPermission::Websocket,
    ];

    /// Scope name as it appears in JWT scopes and route guards.
    pub fn name(self) -> &'static str {
        match self {
            ApiPermission::CountryRead => "country_read",
            ApiPermission::AccountRead => "account_read",
            ApiPermission::AccountUpdate => "account_update",
            ApiPermission::AccountMeRead => "account_me_read",
            ApiPermission::AccountMeUpdate => "account_me_update",
            ApiPermission::Websocket => "websocket",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ApiPermission::CountryRead => "Read countries",
            ApiPermission::AccountRead => "Read accounts",
            ApiPermission::AccountUpdate => "Update an account",
            ApiPermission::AccountMeRead => "Read the current account",
            ApiPermission::AccountMeUpdate => "Update the current account",
            ApiPermission::Websocket => "Establish a WebSocket connection",
        }
    }

    /// Whether the permission may be exercised by API tokens (as opposed
    /// to interactive sessions only).
    pub fn api_access(self) -> bool {
        matches!(self, ApiPermission::CountryRead)
    }
}

/// Permissions granted to a role.
pub fn permissions_for(role: Role) -> Vec<ApiPermission> {
    match role {
        Role::Admin => ApiPermission::ALL.to_vec(),
        Role::Auditor => ApiPermission::ALL
            .iter()
            .copied()
            .filter(|p| p.name().ends_with("_read"))
            .collect(),
    }
}

/// Flattens a set of role names into the sorted, deduplicated scope list
/// embedded in issued tokens. Unknown role names are ignored.
pub fn scopes_for(roles: &[String]) -> Vec<String> {
    let mut scopes: Vec<String> = roles
        .iter()
        .filter_map(|name| name.parse::<Role>().ok())
        .flat_map(permissions_for)
        .map(|p| p.name().to_string())
        .collect();
    scopes.sort_unstable();
    scopes.dedup();
    scopes
}

/// Permission entry listed to accounts managing their API tokens.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiPermissionListing {
    pub id: String,
    pub name: String,
}

/// Permissions of a role that API tokens may carry.
pub fn api_permissions(role: Role) -> Vec<ApiPermissionListing> {
    permissions_for(role)
        .into_iter()
        .filter(|p| p.api_access())
        .map(|p| ApiPermissionListing {
            id: p.name().to_string(),
            name: p.description().to_string(),
        })
        .collect()
}

/// JWT payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The account's email address.
    pub sub: String,
    pub exp: i64,
}

/// Auth context passed through request extensions.
#[derive(Debug, Default)]
pub struct AuthContext {
    pub email: String,
    pub jwt_error: Option<jsonwebtoken::errors::Error>,
    pub token_provided: bool,
}

impl AuthContext {
    pub fn jwt_error_string(&self) -> String {
        if let Some(e) = &self.jwt_error {
            match e.kind() {
                ErrorKind::ExpiredSignature => "token expired!".to_string(),
                _ => e.to_string(),
            }
        } else {
            String::default()
        }
    }
}

/// Account read model.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub roles: Vec<String>,
    pub locked: bool,
    pub active_from: NaiveDate,
    pub active_until: Option<NaiveDate>,
    pub last_login: Option<chrono::DateTime<Utc>>,
}

impl AccountInfo {
    /// An account is active when it is not locked and today falls inside
    /// its activity window. An absent `active_until` is open-ended.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        !self.locked
            && self.active_from <= today
            && self.active_until.map(|until| until > today).unwrap_or(true)
    }

    pub fn is_active(&self) -> bool {
        self.is_active_on(Utc::now().date_naive())
    }
}

impl From<account::Model> for AccountInfo {
    fn from(value: account::Model) -> Self {
        Self {
            id: value.id,
            email: value.email,
            full_name: value.full_name,
            roles: value.roles,
            locked: value.locked,
            active_from: value.active_from,
            active_until: value.active_until,
            last_login: value.last_login,
        }
    }
}

/// Read model for the account's own profile, including UI settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub roles: Vec<String>,
    pub light_mode: bool,
    pub sidebar_collapsed: bool,
    pub table_density: TableDensity,
    /// The avatar itself is fetched through a dedicated endpoint.
    pub has_avatar: bool,
}

impl From<account::Model> for AccountProfile {
    fn from(value: account::Model) -> Self {
        Self {
            id: value.id,
            email: value.email,
            full_name: value.full_name,
            roles: value.roles,
            light_mode: value.light_mode,
            sidebar_collapsed: value.sidebar_collapsed,
            table_density: value.table_density,
            has_avatar: value.avatar.is_some(),
        }
    }
}

/// Notification read model.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInfo {
    pub id: Uuid,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: chrono::DateTime<Utc>,
}

impl From<stratum_persistence::entity::notification::Model> for NotificationInfo {
    fn from(value: stratum_persistence::entity::notification::Model) -> Self {
        Self {
            id: value.id,
            subject: value.subject,
            message: value.message,
            read: value.read,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_roundtrip() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("auditor".parse::<Role>().unwrap(), Role::Auditor);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_admin_holds_all_permissions() {
        assert_eq!(permissions_for(Role::Admin).len(), ApiPermission::ALL.len());
    }

    #[test]
    fn test_auditor_holds_read_permissions() {
        let permissions = permissions_for(Role::Auditor);
        assert!(permissions.contains(&ApiPermission::CountryRead));
        assert!(permissions.contains(&ApiPermission::AccountRead));
        assert!(permissions.contains(&ApiPermission::AccountMeRead));
        assert!(!permissions.contains(&ApiPermission::AccountUpdate));
        assert!(!permissions.contains(&ApiPermission::Websocket));
    }

    #[test]
    fn test_scopes_sorted_and_deduplicated() {
        let scopes = scopes_for(&["admin".to_string(), "auditor".to_string()]);
        let mut sorted = scopes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(scopes, sorted);
        assert_eq!(scopes.len(), ApiPermission::ALL.len());
    }

    #[test]
    fn test_scopes_ignore_unknown_roles() {
        assert!(scopes_for(&["superuser".to_string()]).is_empty());
    }

    #[test]
    fn test_api_permissions_filtered() {
        let listings = api_permissions(Role::Admin);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "country_read");
    }

    #[test]
    fn test_is_active_window() {
        let account = AccountInfo {
            id: Uuid::nil(),
            email: "jane@example.com".to_string(),
            full_name: "Jane Doe".to_string(),
            roles: vec![],
            locked: false,
            active_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            active_until: Some(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
            last_login: None,
        };
        assert!(account.is_active_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(!account.is_active_on(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
        // Inactive starting on active_until itself
        assert!(!account.is_active_on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));

        let locked = AccountInfo {
            locked: true,
            ..account.clone()
        };
        assert!(!locked.is_active_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));

        let open_ended = AccountInfo {
            active_until: None,
            ..account
        };
        assert!(open_ended.is_active_on(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()));
    }

    #[test]
    fn test_auth_context_error_string() {
        let context = AuthContext::default();
        assert_eq!(context.jwt_error_string(), "");

        let context = AuthContext {
            email: String::new(),
            jwt_error: Some(jsonwebtoken::errors::ErrorKind::ExpiredSignature.into()),
            token_provided: true,
        };
        assert_eq!(context.jwt_error_string(), "token expired!");
    }
}
