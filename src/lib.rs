//! Digital medical product passport viewer.
//!
//! Serves the passport page, renders one product record per page load, and relays the
//! page's chat widget to the remote chat service.

pub mod api;
pub mod chat;
pub mod config;
pub mod fetcher;
pub mod page;
pub mod product;
pub mod region;
pub mod registration;
pub mod render;
pub mod script;
pub mod server;
pub mod upstream;
