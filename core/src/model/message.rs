// till/src/model/message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Read state of a contact submission. Messages are append-only apart from
/// this single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
  Unread,
  Read,
}

impl MessageStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      MessageStatus::Unread => "unread",
      MessageStatus::Read => "read",
    }
  }
}

impl fmt::Display for MessageStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub body: String,
  pub status: MessageStatus,
  pub created_at: DateTime<Utc>,
}

/// Insert payload for a new contact submission; stored as `unread`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub body: String,
}
