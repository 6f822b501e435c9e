mod cleanup;
mod feeds;
pub mod purge_gateway;
pub mod sync_gateway;

pub use purge_gateway::PurgeGatewayUseCase;
pub use sync_gateway::SyncGatewayUseCase;
