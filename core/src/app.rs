//! Composition root: builds one of each collaborator and hands out
//! references, so nothing is looked up ambiently.

use std::sync::Arc;

use crate::client::HeroClient;
use crate::config::ClientConfig;
use crate::detail::{HeroDetail, History, RouteParams};
use crate::in_memory::InMemoryTransport;
use crate::messages::MessageLog;
use crate::service::HeroService;
use crate::transport::{Transport, UreqTransport};
use crate::types::Hero;

#[derive(Debug, Clone)]
pub struct HeroApp {
    messages: MessageLog,
    service: Arc<HeroService>,
}

impl HeroApp {
    /// Wire the service to the configured HTTP endpoint.
    pub fn connect(config: &ClientConfig) -> Self {
        tracing::info!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "connecting hero service");
        let transport = Arc::new(UreqTransport::new(config.timeout()));
        Self::with_transport(config, transport)
    }

    /// Wire the service to an in-memory store instead of a remote endpoint.
    pub fn in_memory(heroes: Vec<Hero>) -> Self {
        let config = ClientConfig::with_base_url("memory://local");
        Self::with_transport(&config, Arc::new(InMemoryTransport::new(heroes)))
    }

    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let messages = MessageLog::new();
        let service = HeroService::new(HeroClient::new(&config.base_url), transport, messages.clone())
            .with_name(config.service_name.clone());
        Self {
            messages,
            service: Arc::new(service),
        }
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn service(&self) -> Arc<HeroService> {
        Arc::clone(&self.service)
    }

    pub fn detail<R: RouteParams, H: History>(&self, route: R, history: H) -> HeroDetail<R, H> {
        HeroDetail::new(self.service(), route, history)
    }
}
