use common::RedactedPassword;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile returned by `GET /users/{id}` and by sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
}

/// Body of a successful `POST /users/auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

/// Username and password as typed by the user.
///
/// Deliberately not `Serialize`: the request body is built from
/// [`RedactedPassword::as_str`] at the last moment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: RedactedPassword,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: RedactedPassword::new(password),
        }
    }
}
