use sheetfeed::songs::PreferenceStore;
use web_sys::Storage;

/// `window.localStorage`; when storage is unavailable (private mode, no
/// window) reads come back empty and writes are dropped.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"localStorage unavailable; playlists will not persist".into());
        }
        Self { storage }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: String) {
        if let Some(s) = &self.storage {
            let _ = s.set_item(key, &value);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(s) = &self.storage {
            let _ = s.remove_item(key);
        }
    }
}
