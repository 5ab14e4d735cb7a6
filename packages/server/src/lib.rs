// Copper Kettle - drinks API core
//
// This crate provides the backend API for the drink menu: CRUD over drink
// records, gated by permission claims carried in bearer tokens issued by an
// external identity provider.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
