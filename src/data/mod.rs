pub mod auth_client;
pub mod cart_client;
pub mod http;
pub mod memory;
pub mod recipe_client;
pub mod session_store;
