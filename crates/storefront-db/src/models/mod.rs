//! Row models.
//!
//! `users` and `stores` are global tables queried with the plain pool
//! (login-time credential and store lookup happen before any subject
//! exists). `customers` and `orders` are tenant-governed: their
//! queries take `&mut PgConnection`, which in practice is only
//! obtainable inside the [`crate::with_store_context`] closure — the
//! types enforce bind-before-query ordering.

mod customer;
mod order;
mod store;
mod user;

pub use customer::Customer;
pub use order::Order;
pub use store::Store;
pub use user::User;
