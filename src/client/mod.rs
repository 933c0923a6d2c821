pub mod api;
pub mod cache;
pub mod client_ext;
pub mod error;
pub mod session;

pub use api::{BillingApiClient, ClientConfig};
pub use client_ext::BillingClientExt;
pub use error::ApiError;
pub use session::Session;
