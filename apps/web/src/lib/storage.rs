//! Browser implementations of [`SessionBackend`]: `document.cookie` and
//! `localStorage`. Cookie values are percent-encoded on write and decoded on
//! read, which is the form the edge gate expects for `adminUser`.

use admin_session::{
    cookies::{clear_cookie, decode_component, encode_component, find_cookie, set_cookie, CookiePolicy},
    SessionBackend, SessionStore, StoreError,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Storage};

pub type BrowserSessionStore = SessionStore<CookieBackend, LocalStorageBackend>;

/// The session store for this page: cookies first, local storage second.
pub fn session_store() -> BrowserSessionStore {
    SessionStore::new(CookieBackend::for_current_page(), LocalStorageBackend)
}

fn js_reason(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn html_document() -> Result<HtmlDocument, StoreError> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.dyn_into::<HtmlDocument>().ok())
        .ok_or_else(|| StoreError::Unavailable("document is not available".to_string()))
}

pub struct CookieBackend {
    policy: CookiePolicy,
}

impl CookieBackend {
    /// Hardened cookies when the dashboard itself is served over HTTPS.
    pub fn for_current_page() -> Self {
        let protocol = web_sys::window()
            .and_then(|window| window.location().protocol().ok())
            .unwrap_or_default();
        Self {
            policy: CookiePolicy::for_protocol(&protocol),
        }
    }
}

impl SessionBackend for CookieBackend {
    fn name(&self) -> &'static str {
        "cookies"
    }

    fn read(&self, key: &'static str) -> Option<String> {
        let cookies = html_document().ok()?.cookie().ok()?;
        find_cookie(&cookies, key).and_then(decode_component)
    }

    fn write(&self, key: &'static str, value: &str) -> Result<(), StoreError> {
        html_document()?
            .set_cookie(&set_cookie(key, &encode_component(value), self.policy))
            .map_err(|err| StoreError::Write {
                key,
                reason: js_reason(&err),
            })
    }

    fn remove(&self, key: &'static str) -> Result<(), StoreError> {
        html_document()?
            .set_cookie(&clear_cookie(key))
            .map_err(|err| StoreError::Remove {
                key,
                reason: js_reason(&err),
            })
    }
}

/// `window.localStorage`. Also holds the settings and the Cybrid id cache.
pub struct LocalStorageBackend;

fn local_storage() -> Result<Storage, StoreError> {
    web_sys::window()
        .ok_or_else(|| StoreError::Unavailable("window is not available".to_string()))?
        .local_storage()
        .map_err(|err| StoreError::Unavailable(js_reason(&err)))?
        .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
}

impl SessionBackend for LocalStorageBackend {
    fn name(&self) -> &'static str {
        "localStorage"
    }

    fn read(&self, key: &'static str) -> Option<String> {
        local_storage().ok()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &'static str, value: &str) -> Result<(), StoreError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Write {
                key,
                reason: js_reason(&err),
            })
    }

    fn remove(&self, key: &'static str) -> Result<(), StoreError> {
        local_storage()?
            .remove_item(key)
            .map_err(|err| StoreError::Remove {
                key,
                reason: js_reason(&err),
            })
    }
}
