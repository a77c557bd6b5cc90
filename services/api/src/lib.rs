pub mod adapters;
pub mod config;
pub mod error;
pub mod store;
pub mod web;
