pub mod admin;
pub mod auth;
pub mod bargain;
pub mod catalog;
pub mod credit;
pub mod dice;
pub mod notification;
pub mod order;
pub mod payment;
pub mod recommend;
pub mod review;
