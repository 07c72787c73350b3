use ironvim_macros::{XmlDeserialize, XmlSerialize};

use super::{DateTime, ManagedObjectReference};
use crate::macros::this_requests;

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct UserSession {
    pub key: String,
    pub user_name: String,
    pub full_name: String,
    pub login_time: DateTime,
    pub last_active_time: DateTime,
    pub locale: String,
    pub message_locale: String,
    #[xml(default)]
    pub extension_session: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub call_count: Option<i64>,
}

#[derive(Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct Login {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub user_name: String,
    pub password: String,
    pub locale: Option<String>,
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("this", &self.this)
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("locale", &self.locale)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct LoginResponse {
    pub returnval: UserSession,
}

this_requests! {
    Logout;
    AcquireCloneTicket;
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct SessionIsActive {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    #[xml(rename = "sessionID")]
    pub session_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct TerminateSession {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub session_id: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct SetLocale {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub locale: String,
}
