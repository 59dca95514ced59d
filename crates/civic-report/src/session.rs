use serde::{Deserialize, Serialize};

/// Role attached to the active browser-equivalent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionRole {
    Citizen,
    Authority,
}

impl SessionRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Authority => "authority",
        }
    }
}

/// Persisted session record. Mock identity only: the email and authority id
/// are opaque strings, never validated against anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub role: SessionRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_id: Option<String>,
}

impl SessionRecord {
    pub fn citizen(email: impl Into<String>) -> Self {
        Self {
            role: SessionRole::Citizen,
            email: Some(email.into()),
            authority_id: None,
        }
    }

    pub fn authority(authority_id: impl Into<String>) -> Self {
        Self {
            role: SessionRole::Authority,
            email: None,
            authority_id: Some(authority_id.into()),
        }
    }
}
