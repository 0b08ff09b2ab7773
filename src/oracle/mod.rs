// src/oracle/mod.rs
pub mod client;
pub mod models;
