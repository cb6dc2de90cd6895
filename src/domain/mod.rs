pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod errors;
pub mod notification;
pub mod ports;
pub mod user;
