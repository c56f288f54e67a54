//! duit-core
//!
//! Business logic and services over a [`duit_domain::Book`].
//! Depends on duit-domain. No CLI, no terminal I/O, no direct storage
//! interactions.

pub mod budget_service;
pub mod category_service;
pub mod error;
pub mod stats_service;
pub mod storage;
pub mod summary_service;
pub mod transaction_service;

pub use budget_service::*;
pub use category_service::*;
pub use error::CoreError;
pub use stats_service::*;
pub use storage::*;
pub use summary_service::*;
pub use transaction_service::*;
