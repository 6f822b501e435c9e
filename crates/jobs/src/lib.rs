pub mod gateway_sync;
pub mod runner;

pub use gateway_sync::GatewaySyncJob;
pub use runner::JobRunner;
