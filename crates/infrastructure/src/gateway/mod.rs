mod cloudflare;
mod dto;
pub mod retry;

pub use cloudflare::CloudflareGatewayClient;
pub use retry::{retry_with_backoff, AttemptError, RetryPolicy};
