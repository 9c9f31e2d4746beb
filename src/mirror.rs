//! Local Mirror
//!
//! Best-effort copy of rendered table state in browser storage, used to
//! repaint instantly on reload. The backend always supersedes it. Nothing
//! here raises to the caller: failures are logged and reads degrade to
//! "absent".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};
use crate::snapshot::{CourseCapacitySnapshot, TableSnapshot};
use crate::tables::TableId;

/// Current format of persisted values
pub const MIRROR_VERSION: u32 = 1;
/// Key of the capacity cell set
pub const CAPACITY_KEY: &str = "courseCapacity";

/// Durable string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// `window.localStorage`, tolerating browsers that refuse access to it
#[derive(Clone, Debug, Default)]
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[MIRROR] localStorage unavailable, mirror disabled");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| ErrorKind::Cache("localStorage unavailable".to_string()).into())
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> crate::error::Error {
    ErrorKind::Cache(format!("{:?}", e)).into()
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Either the versioned envelope or the bare arrays older pages wrote
#[derive(Deserialize)]
#[serde(untagged)]
enum Stored<T> {
    Versioned(Envelope<T>),
    Legacy(T),
}

#[derive(Clone, Debug)]
pub struct Mirror<S> {
    store: S,
}

impl<S: KeyValueStore> Mirror<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a table snapshot, replacing whatever was stored before
    pub fn save(&self, table: TableId, snapshot: &TableSnapshot) {
        match self.write(table.mirror_key(), snapshot) {
            Ok(()) => log::debug!("[MIRROR] saved {} ({} rows)", table.dom_id(), snapshot.rows().len()),
            Err(e) => log::error!("[MIRROR] failed to save {}: {}", table.dom_id(), e),
        }
    }

    /// Stored snapshot, or `None` when missing, unreadable or not rectangular
    pub fn load(&self, table: TableId) -> Option<TableSnapshot> {
        let key = table.mirror_key();
        match self.read::<TableSnapshot>(key).and_then(|s| s.map(TableSnapshot::validate).transpose()) {
            Ok(Some(snapshot)) => Some(snapshot),
            Ok(None) => {
                log::info!("[MIRROR] no saved data for {}", table.dom_id());
                None
            }
            Err(e) => {
                log::warn!("[MIRROR] discarding saved {}: {}", table.dom_id(), e);
                None
            }
        }
    }

    pub fn save_capacity(&self, cells: &CourseCapacitySnapshot) {
        match self.write(CAPACITY_KEY, cells) {
            Ok(()) => log::debug!("[MIRROR] saved {} capacity cells", cells.cells().len()),
            Err(e) => log::error!("[MIRROR] failed to save capacity cells: {}", e),
        }
    }

    pub fn load_capacity(&self) -> Option<CourseCapacitySnapshot> {
        match self.read::<CourseCapacitySnapshot>(CAPACITY_KEY) {
            Ok(Some(cells)) => Some(cells),
            Ok(None) => {
                log::info!("[MIRROR] no saved capacity cells");
                None
            }
            Err(e) => {
                log::warn!("[MIRROR] discarding saved capacity cells: {}", e);
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.store.remove(key)?;
        let json = serde_json::to_string(&EnvelopeRef { version: MIRROR_VERSION, data: value })?;
        self.store.set(key, &json)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        let stored: Stored<T> = serde_json::from_str(&raw)
            .map_err(|e| ErrorKind::Cache(format!("unreadable entry '{}': {}", key, e)))?;
        match stored {
            Stored::Versioned(Envelope { version: MIRROR_VERSION, data }) => Ok(Some(data)),
            Stored::Versioned(Envelope { version, .. }) => {
                Err(ErrorKind::Cache(format!("unsupported version {} for '{}'", version, key)).into())
            }
            Stored::Legacy(data) => Ok(Some(data)),
        }
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;

#[cfg(test)]
mod memory {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::KeyValueStore;
    use crate::error::{ErrorKind, Result};

    /// In-memory store; clones share contents
    #[derive(Clone, Default)]
    pub struct MemoryStorage {
        entries: Rc<RefCell<HashMap<String, String>>>,
        fail_writes: Rc<Cell<bool>>,
    }

    impl MemoryStorage {
        pub fn raw(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        pub fn put_raw(&self, key: &str, value: &str) {
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        }

        /// Make every `set` fail, as a full quota does
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.set(fail);
        }
    }

    impl KeyValueStore for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.raw(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.get() {
                return Err(ErrorKind::Cache("quota exceeded".to_string()).into());
            }
            self.put_raw(key, value);
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }
}
