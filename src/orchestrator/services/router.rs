//! Category-based transport routing.

use crate::agent_registry::domain::AgentCategory;
use crate::orchestrator::ports::AgentTransport;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps agent categories to the transport that reaches them.
///
/// Categories without a route use the fallback transport when one is set.
#[derive(Clone, Default)]
pub struct TransportRouter {
    routes: HashMap<AgentCategory, Arc<dyn AgentTransport>>,
    fallback: Option<Arc<dyn AgentTransport>>,
}

impl TransportRouter {
    /// Creates a router with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router that sends every category to one transport.
    #[must_use]
    pub fn uniform(transport: Arc<dyn AgentTransport>) -> Self {
        Self::new().with_fallback(transport)
    }

    /// Routes one category to a transport, replacing any earlier route.
    #[must_use]
    pub fn route(mut self, category: AgentCategory, transport: Arc<dyn AgentTransport>) -> Self {
        self.routes.insert(category, transport);
        self
    }

    /// Sets the transport used for unrouted categories.
    #[must_use]
    pub fn with_fallback(mut self, transport: Arc<dyn AgentTransport>) -> Self {
        self.fallback = Some(transport);
        self
    }

    /// Returns the transport for a category.
    #[must_use]
    pub fn resolve(&self, category: AgentCategory) -> Option<Arc<dyn AgentTransport>> {
        self.routes
            .get(&category)
            .or(self.fallback.as_ref())
            .map(Arc::clone)
    }

    /// Returns the categories with an explicit route.
    pub fn routed_categories(&self) -> impl Iterator<Item = AgentCategory> + '_ {
        self.routes.keys().copied()
    }
}

impl std::fmt::Debug for TransportRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routed: Vec<&str> = self.routes.keys().map(|category| category.as_str()).collect();
        routed.sort_unstable();
        f.debug_struct("TransportRouter")
            .field("routes", &routed)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
