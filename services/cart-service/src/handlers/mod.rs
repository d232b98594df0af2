pub mod cart;
pub mod docs;
pub mod health;
