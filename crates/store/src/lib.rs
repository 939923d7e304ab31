//! Persistence boundary for todo entities.
//!
//! - [`TodoStore`] is the trait a backend implements; commits are atomic
//! - [`InMemoryTodoStore`] keeps everything in process memory
//! - [`UnitOfWork`] tracks changed entities, commits them and hands back the
//!   domain events they raised, but only when the commit succeeded

pub mod error;
pub mod memory;
pub mod store;
pub mod unit_of_work;

pub use error::{Result, StoreError};
pub use memory::InMemoryTodoStore;
pub use store::{ChangeSet, TodoStore};
pub use unit_of_work::UnitOfWork;
