//! Persistence adapters for the cart.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::item::CartItem;

/// Namespace the cart is persisted under.
pub const STORAGE_KEY: &str = "cart-storage";

/// Where a [`crate::CartStore`] reads its initial state from and writes every
/// change to.
pub trait CartStorage {
    /// Returns the persisted items, or an empty list when nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] when the backing store is unreadable or corrupt.
    fn load(&self) -> Result<Vec<CartItem>, CartError>;

    /// Replaces the persisted items.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] when the items cannot be written.
    fn save(&mut self, items: &[CartItem]) -> Result<(), CartError>;
}

/// On-disk document: `{"state": {"cartItems": [...]}, "version": 0}`.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCart {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    #[serde(default)]
    cart_items: Vec<CartItem>,
}

/// Stores the cart as a single JSON document in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/cart-storage.json`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CartError {
        CartError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CartItem>, CartError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let doc: PersistedCart =
            serde_json::from_str(&raw).map_err(|source| CartError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(doc.state.cart_items)
    }

    fn save(&mut self, items: &[CartItem]) -> Result<(), CartError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let doc = PersistedCart {
            state: PersistedState {
                cart_items: items.to_vec(),
            },
            version: 0,
        };
        let body = serde_json::to_string(&doc)?;

        // Write-then-rename so a crash never leaves a half-written cart.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

/// Keeps the cart in memory only. Counts saves so tests can assert that
/// every mutation was persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Vec<CartItem>,
    saves: usize,
}

impl MemoryStorage {
    #[must_use]
    pub fn with_items(items: Vec<CartItem>) -> Self {
        Self { items, saves: 0 }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<CartItem>, CartError> {
        Ok(self.items.clone())
    }

    fn save(&mut self, items: &[CartItem]) -> Result<(), CartError> {
        self.items = items.to_vec();
        self.saves += 1;
        Ok(())
    }
}
