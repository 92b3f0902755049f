pub mod carts_handler;
pub mod events_handler;
pub mod problem;
pub mod products_handler;
