pub mod cart;
pub mod errors;
pub mod events;
pub mod product;
