// till/src/contact.rs

//! Contact-form submissions.

use crate::backend::DataService;
use crate::error::{StoreError, StoreResult};
use crate::model::{Message, NewMessage};
use std::sync::Arc;
use tracing::info;

/// What the contact form collects. Phone is optional; everything else is
/// required.
#[derive(Debug, Clone)]
pub struct ContactForm {
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub body: String,
}

/// Validates and appends a contact message; it lands as `unread` for the
/// operator.
pub async fn submit_contact_message(backend: &Arc<dyn DataService>, form: ContactForm) -> StoreResult<Message> {
  if form.name.trim().is_empty() {
    return Err(StoreError::Validation("name is required".to_string()));
  }
  if form.email.trim().is_empty() || !form.email.contains('@') {
    return Err(StoreError::Validation("a valid email is required".to_string()));
  }
  if form.body.trim().is_empty() {
    return Err(StoreError::Validation("message body is required".to_string()));
  }

  let message = backend
    .insert_message(NewMessage {
      name: form.name,
      email: form.email,
      phone: form.phone,
      body: form.body,
    })
    .await?;
  info!(message_id = %message.id, "contact message submitted");
  Ok(message)
}
