mod client;
mod models;

pub use client::{ApiClient, ApiError, FileDelivery, Result};
pub use models::ApiConfig;
