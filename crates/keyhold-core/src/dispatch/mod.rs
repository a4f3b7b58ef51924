//! Background message dispatch.
//!
//! One handler per [`MessageKind`], looked up in a single table.

mod handlers;

pub use handlers::*;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, warn};

use keyhold_protocols::{DispatchError, MessageKind, Request, Response};

/// Serves one kind of request.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Kind of request this handler answers.
    fn kind(&self) -> MessageKind;

    /// Handle a request. Requests of another kind yield
    /// [`DispatchError::WrongKind`].
    async fn handle(&self, request: Request) -> Result<Response, DispatchError>;
}

/// Dispatch table keyed by message kind.
pub struct Dispatcher {
    handlers: RwLock<HashMap<MessageKind, Arc<dyn MessageHandler>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler. Fails if its kind already has one.
    pub fn register(&self, handler: Arc<dyn MessageHandler>) -> Result<(), DispatchError> {
        let kind = handler.kind();
        let mut handlers = self.handlers.write();
        if handlers.contains_key(&kind) {
            return Err(DispatchError::AlreadyRegistered(kind));
        }
        handlers.insert(kind, handler);
        Ok(())
    }

    pub fn get(&self, kind: MessageKind) -> Option<Arc<dyn MessageHandler>> {
        self.handlers.read().get(&kind).cloned()
    }

    pub fn contains(&self, kind: MessageKind) -> bool {
        self.handlers.read().contains_key(&kind)
    }

    /// Registered kinds, in declaration order.
    pub fn kinds(&self) -> Vec<MessageKind> {
        let mut kinds: Vec<_> = self.handlers.read().keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Route a request to its handler.
    pub async fn dispatch(&self, request: Request) -> Result<Response, DispatchError> {
        let kind = request.kind();
        let handler = self.get(kind).ok_or(DispatchError::NoHandler(kind))?;

        debug!("Dispatching {}", kind);
        let result = handler.handle(request).await;
        if let Err(e) = &result {
            warn!("Handler for {} failed: {}", kind, e);
        }
        result
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
