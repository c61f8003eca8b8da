use serde::{Deserialize, Serialize};

use super::enums::{Role, StatusCode};

/// System account as served by the clinical backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "rolId", alias = "rolID")]
    pub role: Role,
    #[serde(rename = "estado", default)]
    pub status: StatusCode,
}

/// New account payload. The password travels only on creation.
#[derive(Debug, Clone, Serialize)]
pub struct UserDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "clave")]
    pub password: String,
    #[serde(rename = "rolId")]
    pub role: Role,
    #[serde(rename = "estado")]
    pub status: StatusCode,
}

/// Partial update — the backend accepts only these fields on PUT.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "rolId", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusCode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_parses_role_and_status_codes() {
        let user: UserAccount = serde_json::from_str(
            r#"{"id":1,"nombre":"María","usuario":"mperez","rolId":100,"estado":100}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.status, StatusCode::Active);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = UserPatch {
            name: None,
            role: Some(Role::Scheduler),
            status: None,
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"rolId": 101}));
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let json = serde_json::to_value(UserPatch::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
