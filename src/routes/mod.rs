pub mod admin;
pub mod auth;
pub mod bargains;
pub mod feeds;
pub mod orders;
pub mod products;
