//! Shared types for the POS platform
//!
//! Domain models and request payloads used by the server and by
//! register clients: catalog items, orders with their line-item
//! snapshots, and the cart payloads the register screen submits.

pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Item, Order, OrderItem, OrderStatus, OrderWithItems, PaymentType};
pub use order::{CartLine, CreateOrderRequest};
