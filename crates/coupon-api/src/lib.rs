// coupon-api: Async Rust client for the coupon management backend

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::CouponClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
