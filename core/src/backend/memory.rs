// till/src/backend/memory.rs

//! An in-process [`DataService`] used by tests and examples.
//!
//! Mirrors the behavior the core relies on from the hosted service: per-row
//! last-write-wins, a unique (user, product) constraint on cart rows, lenient
//! no-op updates/deletes of missing rows, and a change event emitted after
//! every successful write. `fail_next_write` injects a one-shot failure for a
//! table so the rollback and partial-checkout paths can be exercised.

use super::service::{ChangeFeed, ChangeKind, DataService, Table, TableChange};
use crate::error::{StoreError, StoreResult};
use crate::model::{
  CartItem, Message, MessageStatus, NewMessage, NewOrder, NewOrderItem, NewProduct, Order,
  OrderItem, OrderStatus, Product,
};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use tokio::sync::broadcast;
use tracing::warn;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
  products: Vec<Product>,
  cart_items: Vec<CartItem>,
  orders: Vec<Order>,
  order_items: Vec<OrderItem>,
  messages: Vec<Message>,
}

struct Channels {
  products: broadcast::Sender<TableChange>,
  cart_items: broadcast::Sender<TableChange>,
  orders: broadcast::Sender<TableChange>,
  order_items: broadcast::Sender<TableChange>,
  messages: broadcast::Sender<TableChange>,
}

impl Channels {
  fn new(capacity: usize) -> Self {
    let mk = || broadcast::channel(capacity).0;
    Self {
      products: mk(),
      cart_items: mk(),
      orders: mk(),
      order_items: mk(),
      messages: mk(),
    }
  }

  fn for_table(&self, table: Table) -> &broadcast::Sender<TableChange> {
    match table {
      Table::Products => &self.products,
      Table::CartItems => &self.cart_items,
      Table::Orders => &self.orders,
      Table::OrderItems => &self.order_items,
      Table::Messages => &self.messages,
    }
  }
}

pub struct MemoryDataService {
  state: RwLock<MemoryState>,
  session_user: Mutex<Option<Uuid>>,
  write_faults: Mutex<HashSet<Table>>,
  channels: Channels,
}

impl MemoryDataService {
  pub fn new() -> Self {
    Self::with_feed_capacity(64)
  }

  /// `capacity` bounds each table's broadcast channel; slow subscribers past
  /// it observe a lag and resynchronize.
  pub fn with_feed_capacity(capacity: usize) -> Self {
    Self {
      state: RwLock::new(MemoryState::default()),
      session_user: Mutex::new(None),
      write_faults: Mutex::new(HashSet::new()),
      channels: Channels::new(capacity),
    }
  }

  /// Simulates an authentication session starting.
  pub fn sign_in(&self, user_id: Uuid) {
    *self.session_user.lock() = Some(user_id);
  }

  /// Simulates sign-out; subsequent `current_user` calls see no user.
  pub fn sign_out(&self) {
    *self.session_user.lock() = None;
  }

  /// Arms a one-shot failure: the next write against `table` is rejected.
  pub fn fail_next_write(&self, table: Table) {
    self.write_faults.lock().insert(table);
  }

  fn gate_write(&self, table: Table) -> StoreResult<()> {
    if self.write_faults.lock().remove(&table) {
      warn!(?table, "rejecting write: injected fault");
      return Err(StoreError::backend(anyhow!("injected backend failure on {:?}", table)));
    }
    Ok(())
  }

  fn emit(&self, table: Table, kind: ChangeKind) {
    // A send error only means nobody is subscribed right now.
    let _ = self.channels.for_table(table).send(TableChange { table, kind });
  }
}

impl Default for MemoryDataService {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl DataService for MemoryDataService {
  async fn current_user(&self) -> StoreResult<Option<Uuid>> {
    Ok(*self.session_user.lock())
  }

  // --- products ---

  async fn list_products(&self) -> StoreResult<Vec<Product>> {
    let mut products = self.state.read().products.clone();
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(products)
  }

  async fn find_product(&self, product_id: Uuid) -> StoreResult<Option<Product>> {
    Ok(self.state.read().products.iter().find(|p| p.id == product_id).cloned())
  }

  async fn insert_product(&self, new_product: NewProduct) -> StoreResult<Product> {
    self.gate_write(Table::Products)?;
    let now = Utc::now();
    let product = Product {
      id: Uuid::new_v4(),
      name: new_product.name,
      description: new_product.description,
      price_cents: new_product.price_cents,
      category: new_product.category,
      stock_quantity: new_product.stock_quantity,
      image_url: new_product.image_url,
      created_at: now,
      updated_at: now,
    };
    self.state.write().products.push(product.clone());
    self.emit(Table::Products, ChangeKind::Insert);
    Ok(product)
  }

  async fn update_product(&self, product: &Product) -> StoreResult<()> {
    self.gate_write(Table::Products)?;
    let mut updated = false;
    {
      let mut state = self.state.write();
      if let Some(row) = state.products.iter_mut().find(|p| p.id == product.id) {
        *row = Product {
          updated_at: Utc::now(),
          ..product.clone()
        };
        updated = true;
      }
    }
    if updated {
      self.emit(Table::Products, ChangeKind::Update);
    }
    Ok(())
  }

  async fn delete_product(&self, product_id: Uuid) -> StoreResult<()> {
    self.gate_write(Table::Products)?;
    let removed = {
      let mut state = self.state.write();
      let before = state.products.len();
      state.products.retain(|p| p.id != product_id);
      before != state.products.len()
    };
    if removed {
      self.emit(Table::Products, ChangeKind::Delete);
    }
    Ok(())
  }

  // --- cart items ---

  async fn cart_items(&self, user_id: Uuid) -> StoreResult<Vec<CartItem>> {
    Ok(
      self
        .state
        .read()
        .cart_items
        .iter()
        .filter(|c| c.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn insert_cart_item(&self, user_id: Uuid, product_id: Uuid, quantity: u32) -> StoreResult<CartItem> {
    self.gate_write(Table::CartItems)?;
    if quantity == 0 {
      return Err(StoreError::Validation("cart rows must hold a positive quantity".to_string()));
    }
    let item = CartItem {
      id: Uuid::new_v4(),
      user_id,
      product_id,
      quantity,
      added_at: Utc::now(),
    };
    {
      let mut state = self.state.write();
      if state
        .cart_items
        .iter()
        .any(|c| c.user_id == user_id && c.product_id == product_id)
      {
        return Err(StoreError::backend(anyhow!(
          "cart row for user {user_id} and product {product_id} already exists"
        )));
      }
      state.cart_items.push(item.clone());
    }
    self.emit(Table::CartItems, ChangeKind::Insert);
    Ok(item)
  }

  async fn update_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: u32) -> StoreResult<()> {
    self.gate_write(Table::CartItems)?;
    if quantity == 0 {
      return Err(StoreError::Validation("cart rows must hold a positive quantity".to_string()));
    }
    let updated = {
      let mut state = self.state.write();
      match state
        .cart_items
        .iter_mut()
        .find(|c| c.user_id == user_id && c.product_id == product_id)
      {
        Some(row) => {
          row.quantity = quantity;
          true
        }
        None => false,
      }
    };
    if updated {
      self.emit(Table::CartItems, ChangeKind::Update);
    }
    Ok(())
  }

  async fn delete_cart_item(&self, user_id: Uuid, product_id: Uuid) -> StoreResult<()> {
    self.gate_write(Table::CartItems)?;
    let removed = {
      let mut state = self.state.write();
      let before = state.cart_items.len();
      state
        .cart_items
        .retain(|c| !(c.user_id == user_id && c.product_id == product_id));
      before != state.cart_items.len()
    };
    if removed {
      self.emit(Table::CartItems, ChangeKind::Delete);
    }
    Ok(())
  }

  async fn clear_cart(&self, user_id: Uuid) -> StoreResult<()> {
    self.gate_write(Table::CartItems)?;
    let removed = {
      let mut state = self.state.write();
      let before = state.cart_items.len();
      state.cart_items.retain(|c| c.user_id != user_id);
      before != state.cart_items.len()
    };
    if removed {
      self.emit(Table::CartItems, ChangeKind::Delete);
    }
    Ok(())
  }

  // --- orders ---

  async fn insert_order(&self, new_order: NewOrder) -> StoreResult<Order> {
    self.gate_write(Table::Orders)?;
    let order = Order {
      id: Uuid::new_v4(),
      user_id: new_order.user_id,
      status: new_order.status,
      total_amount_cents: new_order.total_amount_cents,
      delivery_address: new_order.delivery_address,
      phone_number: new_order.phone_number,
      payment_reference: new_order.payment_reference,
      created_at: Utc::now(),
    };
    self.state.write().orders.push(order.clone());
    self.emit(Table::Orders, ChangeKind::Insert);
    Ok(order)
  }

  async fn insert_order_items(&self, items: Vec<NewOrderItem>) -> StoreResult<()> {
    self.gate_write(Table::OrderItems)?;
    {
      let mut state = self.state.write();
      for item in items {
        state.order_items.push(OrderItem {
          id: Uuid::new_v4(),
          order_id: item.order_id,
          product_id: item.product_id,
          quantity: item.quantity,
          price_at_purchase_cents: item.price_at_purchase_cents,
        });
      }
    }
    self.emit(Table::OrderItems, ChangeKind::Insert);
    Ok(())
  }

  async fn find_order(&self, order_id: Uuid) -> StoreResult<Option<Order>> {
    Ok(self.state.read().orders.iter().find(|o| o.id == order_id).cloned())
  }

  async fn orders_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>> {
    let mut orders: Vec<Order> = self
      .state
      .read()
      .orders
      .iter()
      .filter(|o| o.user_id == user_id)
      .cloned()
      .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
  }

  async fn list_orders(&self) -> StoreResult<Vec<Order>> {
    let mut orders = self.state.read().orders.clone();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
  }

  async fn order_items(&self, order_id: Uuid) -> StoreResult<Vec<OrderItem>> {
    Ok(
      self
        .state
        .read()
        .order_items
        .iter()
        .filter(|i| i.order_id == order_id)
        .cloned()
        .collect(),
    )
  }

  async fn update_order_status(&self, order_id: Uuid, status: OrderStatus) -> StoreResult<()> {
    self.gate_write(Table::Orders)?;
    let updated = {
      let mut state = self.state.write();
      match state.orders.iter_mut().find(|o| o.id == order_id) {
        Some(order) => {
          order.status = status;
          true
        }
        None => false,
      }
    };
    if updated {
      self.emit(Table::Orders, ChangeKind::Update);
    }
    Ok(())
  }

  // --- messages ---

  async fn insert_message(&self, new_message: NewMessage) -> StoreResult<Message> {
    self.gate_write(Table::Messages)?;
    let message = Message {
      id: Uuid::new_v4(),
      name: new_message.name,
      email: new_message.email,
      phone: new_message.phone,
      body: new_message.body,
      status: MessageStatus::Unread,
      created_at: Utc::now(),
    };
    self.state.write().messages.push(message.clone());
    self.emit(Table::Messages, ChangeKind::Insert);
    Ok(message)
  }

  async fn list_messages(&self) -> StoreResult<Vec<Message>> {
    let mut messages = self.state.read().messages.clone();
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(messages)
  }

  async fn update_message_status(&self, message_id: Uuid, status: MessageStatus) -> StoreResult<()> {
    self.gate_write(Table::Messages)?;
    let updated = {
      let mut state = self.state.write();
      match state.messages.iter_mut().find(|m| m.id == message_id) {
        Some(message) => {
          message.status = status;
          true
        }
        None => false,
      }
    };
    if updated {
      self.emit(Table::Messages, ChangeKind::Update);
    }
    Ok(())
  }

  fn subscribe(&self, table: Table) -> ChangeFeed {
    self.channels.for_table(table).subscribe()
  }
}
