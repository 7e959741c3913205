//! Infrastructure layer: persistence, outbound gateways, orchestration.
//!
//! Ports and adapters around the pure domain in `frostmart-newsletter`:
//! storage backends for the subscription list, the notification gateway
//! capability with its concrete variants, the two-stage dispatcher, the
//! `SubscriptionService` orchestrator that UI surfaces call, and the polling
//! admin read model.

pub mod admin;
pub mod dispatcher;
pub mod gateway;
pub mod service;
pub mod store;


pub use admin::{AdminReadModel, CsvExport, RefreshWorker, WorkerHandle};
pub use dispatcher::{DispatchError, Dispatcher};
pub use gateway::{
    FormRelayConfig, FormRelayGateway, GatewayError, NotificationGateway, SimulatedGateway,
    TemplatedMailConfig, TemplatedMailGateway,
};
pub use service::{SubscribeError, SubscriptionService};
pub use store::{
    InMemorySubscriptionStore, JsonFileSubscriptionStore, StoreError, SubscriptionStore,
};
