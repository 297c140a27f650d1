pub mod cart;
pub mod error;
pub mod notice;
pub mod recipe;
pub mod repository;
pub mod route;
pub mod session;
