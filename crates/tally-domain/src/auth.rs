//! Authentication payloads and the bearer credential.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bearer token proving an authenticated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn bearer_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Authenticated identity kept by the client after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub credential: Credential,
    pub user_name: String,
    pub user_email: String,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            credential: Credential::new(response.token),
            user_name: response.user_name,
            user_email: response.user_email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_email: String,
    pub user_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_name: String,
    pub user_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub user_email: String,
    pub user_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub user_email: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("secret-token");
        assert!(!format!("{credential:?}").contains("secret"));
        assert_eq!(credential.bearer_value(), "Bearer secret-token");
    }

    #[test]
    fn login_response_becomes_session() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"token":"abc","userName":"Asha","userEmail":"asha@example.com"}"#,
        )
        .expect("decode login response");
        let session = Session::from(response);
        assert_eq!(session.credential.token(), "abc");
        assert_eq!(session.user_name, "Asha");
    }

    #[test]
    fn request_payloads_use_backend_field_names() {
        let reset = ResetPasswordRequest {
            user_email: "a@b.c".into(),
            new_password: "pw".into(),
        };
        let value = serde_json::to_value(&reset).expect("encode reset");
        assert_eq!(value["userEmail"], "a@b.c");
        assert_eq!(value["newPassword"], "pw");
    }
}
