pub mod admin;
pub mod auth;
pub mod bargains;
pub mod notification_handler;
pub mod orders;
pub mod products;
pub mod recommendations;
pub mod reviews;
