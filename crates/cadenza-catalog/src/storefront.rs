// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::{Arc, RwLock};

/// Source of the current storefront (region) identifier, e.g. `"us"`.
///
/// Read once per request, so implementations may change their answer between calls.
pub trait StorefrontProvider: Send + Sync + 'static {
    fn storefront(&self) -> String;
}

/// A storefront fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticStorefront(String);

impl StaticStorefront {
    pub fn new(storefront: impl Into<String>) -> Self {
        Self(storefront.into())
    }
}

impl StorefrontProvider for StaticStorefront {
    fn storefront(&self) -> String {
        self.0.clone()
    }
}

/// A storefront that the session can switch at runtime. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct SharedStorefront {
    current: Arc<RwLock<String>>,
}

impl SharedStorefront {
    pub fn new(storefront: impl Into<String>) -> Self {
        Self {
            current: Arc::new(RwLock::new(storefront.into())),
        }
    }

    pub fn set(&self, storefront: impl Into<String>) {
        let storefront = storefront.into();
        tracing::debug!(target: "catalog", storefront = %storefront, "storefront changed");
        match self.current.write() {
            Ok(mut guard) => *guard = storefront,
            Err(poisoned) => *poisoned.into_inner() = storefront,
        }
    }
}

impl StorefrontProvider for SharedStorefront {
    fn storefront(&self) -> String {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
