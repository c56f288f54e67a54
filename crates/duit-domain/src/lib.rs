//! duit-domain
//!
//! Pure domain models (Book, Budget, Transaction, Category, FilterCriteria).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod book;
pub mod budget;
pub mod category;
pub mod common;
pub mod criteria;
pub mod sample;
pub mod transaction;

pub use book::*;
pub use budget::*;
pub use category::*;
pub use common::*;
pub use criteria::*;
pub use transaction::*;
