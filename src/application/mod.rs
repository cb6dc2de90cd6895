pub mod auth_service;
pub mod cart_engine;
pub mod catalog_service;
pub mod checkout_service;
pub mod notifications;
pub mod pagination;
