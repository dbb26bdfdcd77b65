pub mod auth;
pub mod export;
pub mod ports;
pub mod services;
pub mod table;
