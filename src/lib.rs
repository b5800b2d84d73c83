pub mod core;
pub mod error;
pub mod server;
pub mod site;
pub mod types;
pub mod views;
