// till/src/model/mod.rs

//! Data structures mirroring the rows of the hosted backend.

pub mod cart_item;
pub mod message;
pub mod order;
pub mod order_item;
pub mod product;

pub use cart_item::CartItem;
pub use message::{Message, MessageStatus, NewMessage};
pub use order::{NewOrder, Order, OrderStatus};
pub use order_item::{NewOrderItem, OrderItem};
pub use product::{NewProduct, Product};
