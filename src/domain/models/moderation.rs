//! Moderation records persisted through the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::tracking::{Entity, EntityField, EntityKey, FieldValue};

/// A member of a guild as last observed by the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildUser {
    /// Discord snowflake.
    pub id: i64,
    pub username: String,
    pub nickname: Option<String>,
    pub last_seen: DateTime<Utc>,
}

impl GuildUser {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            nickname: None,
            last_seen: Utc::now(),
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuildUserField {
    Username,
    Nickname,
    LastSeen,
}

impl EntityField for GuildUserField {
    fn column(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Nickname => "nickname",
            Self::LastSeen => "last_seen",
        }
    }
}

impl Entity for GuildUser {
    type Field = GuildUserField;

    const TABLE: &'static str = "guild_users";
    const KEY_COLUMN: &'static str = "id";

    fn key(&self) -> EntityKey {
        EntityKey::Integer(self.id)
    }

    fn value(&self, field: GuildUserField) -> FieldValue {
        match field {
            GuildUserField::Username => self.username.as_str().into(),
            GuildUserField::Nickname => self.nickname.clone().into(),
            GuildUserField::LastSeen => self.last_seen.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfractionKind {
    Notice,
    Warning,
    Mute,
    Ban,
}

impl InfractionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Mute => "mute",
            Self::Ban => "ban",
        }
    }
}

impl fmt::Display for InfractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notice" => Ok(Self::Notice),
            "warning" => Ok(Self::Warning),
            "mute" => Ok(Self::Mute),
            "ban" => Ok(Self::Ban),
            other => Err(format!("unknown infraction kind: {other}")),
        }
    }
}

/// A moderation action recorded against a guild member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infraction {
    pub id: Uuid,
    pub guild_id: i64,
    pub subject_id: i64,
    pub kind: InfractionKind,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub rescinded_at: Option<DateTime<Utc>>,
}

impl Infraction {
    pub fn new(guild_id: i64, subject_id: i64, kind: InfractionKind, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            guild_id,
            subject_id,
            kind,
            reason: reason.into(),
            created_at: Utc::now(),
            rescinded_at: None,
        }
    }

    pub fn rescind(&mut self) {
        self.rescinded_at = Some(Utc::now());
    }

    pub const fn is_rescinded(&self) -> bool {
        self.rescinded_at.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfractionField {
    Kind,
    Reason,
    RescindedAt,
}

impl EntityField for InfractionField {
    fn column(self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Reason => "reason",
            Self::RescindedAt => "rescinded_at",
        }
    }
}

impl Entity for Infraction {
    type Field = InfractionField;

    const TABLE: &'static str = "infractions";
    const KEY_COLUMN: &'static str = "id";

    fn key(&self) -> EntityKey {
        EntityKey::from(self.id)
    }

    fn value(&self, field: InfractionField) -> FieldValue {
        match field {
            InfractionField::Kind => self.kind.as_str().into(),
            InfractionField::Reason => self.reason.as_str().into(),
            InfractionField::RescindedAt => self.rescinded_at.into(),
        }
    }
}
