//! Order domain: pricing & persistence engine, refund state machine
//!
//! Orders are rung up against the current catalog, snapshot-priced,
//! and written as header + line items. The store offers no
//! multi-statement transaction, so the engine owns cross-row
//! consistency: abort before any write on an unresolved item, and
//! delete the header when the line-item write fails.

pub mod error;
pub mod money;
pub mod service;


pub use error::OrderError;
pub use service::OrderService;
