//! Application state shared across handlers.

use std::sync::Arc;

use art_haus_core::{Catalog, OrderComposer};

use crate::config::StorefrontConfig;
use crate::services::{SessionLocks, ToastRegistry};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Per-shopper state lives in the
/// session; this holds only what every session shares.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    composer: OrderComposer,
    toasts: ToastRegistry,
    session_locks: SessionLocks,
}

impl AppState {
    /// Create application state serving the built-in catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_catalog(config, Catalog::builtin())
    }

    /// Create application state serving a specific catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let composer = config.order.composer();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                composer,
                toasts: ToastRegistry::new(),
                session_locks: SessionLocks::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the order composer.
    #[must_use]
    pub fn composer(&self) -> &OrderComposer {
        &self.inner.composer
    }

    /// Get a reference to the per-session toast queues.
    #[must_use]
    pub fn toasts(&self) -> &ToastRegistry {
        &self.inner.toasts
    }

    /// Get a reference to the per-session write locks.
    #[must_use]
    pub fn session_locks(&self) -> &SessionLocks {
        &self.inner.session_locks
    }
}
