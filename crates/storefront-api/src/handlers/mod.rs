//! Request handlers.

mod customers;
mod health;
mod login;
mod orders;

pub use customers::list_customers;
pub use health::health;
pub use login::login_handler;
pub use orders::list_orders;
