pub mod export;
pub mod record;
pub mod session;
pub mod table;
