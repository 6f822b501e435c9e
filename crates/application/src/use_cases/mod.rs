pub mod gateway;

pub use gateway::{PurgeGatewayUseCase, SyncGatewayUseCase};
