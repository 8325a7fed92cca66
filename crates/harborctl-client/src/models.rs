//! Pass-through data models for the Harbor REST API.
//!
//! These mirror the wire shapes returned by Harbor; the client does not
//! enforce invariants beyond what serde requires.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The system-wide CVE allowlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CveAllowlist {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Project the allowlist belongs to; 0 for the system-wide list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,

    /// Expiration as a Unix timestamp; absent means never.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<CveAllowlistItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

/// A single CVE entry in an allowlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CveAllowlistItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cve_id: Option<String>,
}

impl CveAllowlistItem {
    /// Creates an allowlist item for the given CVE id.
    #[must_use]
    pub fn new(cve_id: impl Into<String>) -> Self {
        Self {
            cve_id: Some(cve_id.into()),
        }
    }
}

/// A user group, local or directory-backed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    /// Group type code; see [`UserGroupType`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_type: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldap_group_dn: Option<String>,
}

/// A user group as returned by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupSearchItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_type: Option<i32>,
}

/// User group backing types and their Harbor API integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserGroupType {
    Ldap,
    Http,
    Oidc,
}

impl UserGroupType {
    /// Returns the integer code used by the Harbor API.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Ldap => 1,
            Self::Http => 2,
            Self::Oidc => 3,
        }
    }

    /// Returns the type for a Harbor API integer code.
    #[must_use]
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Ldap),
            2 => Some(Self::Http),
            3 => Some(Self::Oidc),
            _ => None,
        }
    }
}

impl fmt::Display for UserGroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ldap => "LDAP",
            Self::Http => "HTTP",
            Self::Oidc => "OIDC",
        };
        f.write_str(name)
    }
}

/// Overall health of the Harbor instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallHealthStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentHealthStatus>>,
}

/// Health of a single Harbor component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealthStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usergroup_type_codes_round_trip() {
        for group_type in [UserGroupType::Ldap, UserGroupType::Http, UserGroupType::Oidc] {
            assert_eq!(UserGroupType::from_i32(group_type.as_i32()), Some(group_type));
        }
        assert_eq!(UserGroupType::from_i32(0), None);
    }

    #[test]
    fn test_allowlist_serializes_without_nulls() {
        let allowlist = CveAllowlist {
            items: Some(vec![CveAllowlistItem::new("CVE-2024-12345")]),
            ..CveAllowlist::default()
        };
        let json = serde_json::to_string(&allowlist).unwrap();
        assert_eq!(json, r#"{"items":[{"cve_id":"CVE-2024-12345"}]}"#);
    }
}
