// till/src/backend/service.rs

use crate::error::StoreResult;
use crate::model::{
  CartItem, Message, MessageStatus, NewMessage, NewOrder, NewOrderItem, NewProduct, Order,
  OrderItem, OrderStatus, Product,
};
use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

/// The backend tables this core touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  Products,
  CartItems,
  Orders,
  OrderItems,
  Messages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
  Insert,
  Update,
  Delete,
}

/// One realtime change notification. Fires for any row of the table and
/// carries no row payload; subscribers react by re-reading whatever they
/// care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableChange {
  pub table: Table,
  pub kind: ChangeKind,
}

/// A live subscription to one table's changes. Dropping the receiver ends
/// the subscription.
pub type ChangeFeed = broadcast::Receiver<TableChange>;

/// Typed access to the hosted data service.
///
/// The core depends on nothing beyond these primitives: current-user lookup,
/// equality-filtered reads (products and orders come back newest first),
/// per-table inserts/updates/deletes, and table-scoped change subscription.
#[async_trait]
pub trait DataService: Send + Sync {
  /// The currently authenticated user, if any.
  async fn current_user(&self) -> StoreResult<Option<Uuid>>;

  // --- products ---

  /// All catalog entries, newest first.
  async fn list_products(&self) -> StoreResult<Vec<Product>>;
  async fn find_product(&self, product_id: Uuid) -> StoreResult<Option<Product>>;
  async fn insert_product(&self, new_product: NewProduct) -> StoreResult<Product>;
  async fn update_product(&self, product: &Product) -> StoreResult<()>;
  async fn delete_product(&self, product_id: Uuid) -> StoreResult<()>;

  // --- cart items ---

  async fn cart_items(&self, user_id: Uuid) -> StoreResult<Vec<CartItem>>;
  /// Inserts a new (user, product) row. The backend enforces the uniqueness
  /// of the pair; inserting a duplicate fails.
  async fn insert_cart_item(&self, user_id: Uuid, product_id: Uuid, quantity: u32) -> StoreResult<CartItem>;
  /// Sets the quantity of an existing row. Updating a missing row is a no-op.
  async fn update_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: u32) -> StoreResult<()>;
  /// Deleting a missing row is a no-op.
  async fn delete_cart_item(&self, user_id: Uuid, product_id: Uuid) -> StoreResult<()>;
  /// Deletes every cart row belonging to the user.
  async fn clear_cart(&self, user_id: Uuid) -> StoreResult<()>;

  // --- orders ---

  async fn insert_order(&self, new_order: NewOrder) -> StoreResult<Order>;
  async fn insert_order_items(&self, items: Vec<NewOrderItem>) -> StoreResult<()>;
  async fn find_order(&self, order_id: Uuid) -> StoreResult<Option<Order>>;
  /// The user's orders, newest first.
  async fn orders_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>>;
  /// Every order, newest first (operator listing).
  async fn list_orders(&self) -> StoreResult<Vec<Order>>;
  async fn order_items(&self, order_id: Uuid) -> StoreResult<Vec<OrderItem>>;
  async fn update_order_status(&self, order_id: Uuid, status: OrderStatus) -> StoreResult<()>;

  // --- messages ---

  async fn insert_message(&self, new_message: NewMessage) -> StoreResult<Message>;
  /// Every contact submission, newest first (operator listing).
  async fn list_messages(&self) -> StoreResult<Vec<Message>>;
  async fn update_message_status(&self, message_id: Uuid, status: MessageStatus) -> StoreResult<()>;

  /// Subscribes to the table's change notifications.
  fn subscribe(&self, table: Table) -> ChangeFeed;
}
