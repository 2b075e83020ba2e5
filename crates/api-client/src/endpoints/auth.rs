//! Registration and login
//!
//! The service keeps no server-side session; a successful login returns the
//! user record, which becomes the [`Session`] passed to later calls.

use super::{Envelope, missing};
use crate::client::RetrievixClient;
use crate::error::ApiResult;
use retrievix_store::Session;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `auth` routes
#[derive(Clone)]
pub struct AuthApi {
    client: RetrievixClient,
}

/// User record as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl From<RemoteUser> for Session {
    fn from(user: RemoteUser) -> Self {
        Session::new(user.id)
            .with_name(user.name)
            .with_email(user.email)
    }
}

/// Sign-up form. The password is sent as-is; the service enforces its policy.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl AuthApi {
    pub(crate) fn new(client: RetrievixClient) -> Self {
        Self { client }
    }

    /// POST auth/login
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let envelope: Envelope = self
            .client
            .post("auth/login", &Credentials { email, password })
            .await?;
        session_from(envelope)
    }

    /// POST auth/register; signs the new user in
    pub async fn register(&self, registration: &Registration) -> ApiResult<Session> {
        let envelope: Envelope = self.client.post("auth/register", registration).await?;
        session_from(envelope)
    }
}

fn session_from(envelope: Envelope) -> ApiResult<Session> {
    envelope
        .accepted()?
        .user
        .map(Session::from)
        .ok_or_else(|| missing("user"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_session_from_login_response() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"success":true,"user":{"_id":"u-1","name":"Ana","email":"ana@example.com","phone":"555","password":"$2a$10$hash"}}"#,
        )
        .unwrap();
        let session = session_from(envelope).unwrap();
        assert_eq!(session.user_id, "u-1");
        assert_eq!(session.name, "Ana");
        assert!(session.token.is_none());
    }

    #[test]
    fn test_bad_credentials() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"success":false,"message":"Invalid email or password"}"#,
        )
        .unwrap();
        assert!(matches!(session_from(envelope), Err(ApiError::Rejected(_))));
    }

    #[test]
    fn test_registration_debug_hides_password() {
        let form = Registration {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: String::new(),
            password: "Secr3t!pass".into(),
        };
        assert!(!format!("{form:?}").contains("Secr3t"));
    }
}
