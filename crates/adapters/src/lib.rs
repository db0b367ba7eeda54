pub mod export;
pub mod mysql;
pub mod postgres;
