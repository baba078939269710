//! One-shot notification messages carried in the session between a redirect
//! and the next rendered page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const FLASH_KEY: &str = "flash_messages";

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Error,
}

impl Level {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

pub async fn push(
    session: &Session,
    level: Level,
    message: &str,
) -> Result<(), tower_sessions::session::Error> {
    let mut flashes: Vec<Flash> = session.get(FLASH_KEY).await?.unwrap_or_default();
    flashes.push(Flash {
        level,
        message: message.to_owned(),
    });
    session.insert(FLASH_KEY, flashes).await
}

pub async fn success(
    session: &Session,
    message: &str,
) -> Result<(), tower_sessions::session::Error> {
    push(session, Level::Success, message).await
}

pub async fn error(
    session: &Session,
    message: &str,
) -> Result<(), tower_sessions::session::Error> {
    push(session, Level::Error, message).await
}

/// Reads and clears the pending messages. A session failure here only
/// loses notifications, so it degrades to an empty list.
pub async fn take(session: &Session) -> Vec<Flash> {
    session
        .remove::<Vec<Flash>>(FLASH_KEY)
        .await
        .unwrap_or_default()
        .unwrap_or_default()
}
