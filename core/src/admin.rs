// till/src/admin.rs

//! Operator surface: status transitions on orders and messages, plus catalog
//! maintenance.

use crate::backend::DataService;
use crate::error::{StoreError, StoreResult};
use crate::flow::SharedCtx;
use crate::model::{Message, MessageStatus, NewProduct, Order, OrderItem, OrderStatus, Product};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// The operator's working view: cached listings of orders and messages, with
/// single-field status updates patched into the cache last-write-wins rather
/// than re-fetched.
///
/// No optimistic rollback here: a status is a single field with no derived
/// aggregate hanging off it, unlike cart quantities.
pub struct AdminDesk {
  backend: Arc<dyn DataService>,
  orders: SharedCtx<Vec<Order>>,
  messages: SharedCtx<Vec<Message>>,
}

impl AdminDesk {
  pub fn new(backend: Arc<dyn DataService>) -> Self {
    Self {
      backend,
      orders: SharedCtx::new(Vec::new()),
      messages: SharedCtx::new(Vec::new()),
    }
  }

  // --- orders ---

  /// Reloads the order listing (newest first).
  pub async fn refresh_orders(&self) -> StoreResult<()> {
    let orders = self.backend.list_orders().await?;
    *self.orders.write() = orders;
    Ok(())
  }

  pub fn orders(&self) -> Vec<Order> {
    self.orders.read().clone()
  }

  pub async fn order_lines(&self, order_id: Uuid) -> StoreResult<Vec<OrderItem>> {
    self.backend.order_items(order_id).await
  }

  /// Moves an order to `next`, enforcing the lifecycle: `completed` and
  /// `cancelled` are dead ends, and `completed` is only reachable through
  /// `processing`. Writing the status an order already has is a no-op.
  ///
  /// On success the cached listing row is patched in place; no re-fetch.
  pub async fn set_order_status(&self, order_id: Uuid, next: OrderStatus) -> StoreResult<()> {
    let current = match self.cached_order_status(order_id) {
      Some(status) => status,
      None => {
        self
          .backend
          .find_order(order_id)
          .await?
          .ok_or_else(|| StoreError::NotFound(format!("order {order_id}")))?
          .status
      }
    };

    if current == next {
      return Ok(());
    }
    if !current.can_transition_to(next) {
      return Err(StoreError::InvalidTransition { from: current, to: next });
    }

    self.backend.update_order_status(order_id, next).await?;
    info!(%order_id, from = %current, to = %next, "order status updated");

    let mut orders = self.orders.write();
    if let Some(order) = orders.iter_mut().find(|o| o.id == order_id) {
      order.status = next;
    }
    Ok(())
  }

  fn cached_order_status(&self, order_id: Uuid) -> Option<OrderStatus> {
    self.orders.read().iter().find(|o| o.id == order_id).map(|o| o.status)
  }

  // --- messages ---

  /// Reloads the contact-message listing (newest first).
  pub async fn refresh_messages(&self) -> StoreResult<()> {
    let messages = self.backend.list_messages().await?;
    *self.messages.write() = messages;
    Ok(())
  }

  pub fn messages(&self) -> Vec<Message> {
    self.messages.read().clone()
  }

  pub fn unread_count(&self) -> usize {
    self
      .messages
      .read()
      .iter()
      .filter(|m| m.status == MessageStatus::Unread)
      .count()
  }

  /// Marks a message read and patches the cached listing in place.
  pub async fn mark_message_read(&self, message_id: Uuid) -> StoreResult<()> {
    self
      .backend
      .update_message_status(message_id, MessageStatus::Read)
      .await?;

    let mut messages = self.messages.write();
    if let Some(message) = messages.iter_mut().find(|m| m.id == message_id) {
      message.status = MessageStatus::Read;
    }
    Ok(())
  }

  // --- catalog maintenance ---

  pub async fn create_product(&self, new_product: NewProduct) -> StoreResult<Product> {
    self.backend.insert_product(new_product).await
  }

  pub async fn update_product(&self, product: &Product) -> StoreResult<()> {
    self.backend.update_product(product).await
  }

  pub async fn delete_product(&self, product_id: Uuid) -> StoreResult<()> {
    self.backend.delete_product(product_id).await
  }
}
