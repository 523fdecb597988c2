// yummy-api: Async Rust client for the So Yummy recipe API

mod auth;
pub mod client;
pub mod error;
pub mod models;
mod recipes;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::AuthToken;
pub use transport::{TlsMode, TransportConfig};
