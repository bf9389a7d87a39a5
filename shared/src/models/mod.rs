//! Domain Models
//!
//! Row-level types for the tenant-partitioned store. Every entity
//! carries its owning `company_id`; queries that omit it are a
//! correctness bug, not a performance one.

pub mod item;
pub mod order;

pub use item::Item;
pub use order::{Order, OrderItem, OrderStatus, OrderWithItems, PaymentType};
