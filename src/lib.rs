pub mod config;
pub mod db;
pub mod error;
pub mod network;
pub mod seed;
pub mod tokens;
