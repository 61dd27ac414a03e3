//! Persistent player identity.

use web_time::{SystemTime, UNIX_EPOCH};

/// Storage key the identity is persisted under.
pub const STORAGE_KEY: &str = "playerId";

/// Durable client-local key/value storage.
/// The browser implementation wraps `localStorage`; tests use a map.
pub trait IdentityStore {
    fn load(&self) -> Option<String>;
    /// Best-effort write. When storage is unavailable the identity simply
    /// stays fresh for the next load.
    fn save(&mut self, id: &str);
}

/// Returns the stored identity, or synthesizes and stores a new one.
pub fn get_or_create(store: &mut impl IdentityStore) -> String {
    if let Some(id) = store.load() {
        return id;
    }

    let id = synthesize(now_ms(), random_unit());
    store.save(&id);
    id
}

/// Millisecond timestamp concatenated with a base-36 random suffix.
pub fn synthesize(now_ms: u128, entropy: f64) -> String {
    let scaled = (entropy.clamp(0.0, 1.0) * u32::MAX as f64) as u64;
    format!("{now_ms}{}", to_base36(scaled))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = String::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    out.chars().rev().collect()
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn random_unit() -> f64 {
    js_sys::Math::random()
}

#[cfg(not(target_arch = "wasm32"))]
fn random_unit() -> f64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos())
        .unwrap_or(0);
    f64::from(nanos) / 1_000_000_000.0
}

/// `localStorage`-backed store. Storage may be denied entirely (privacy
/// modes); every access then degrades to "nothing stored".
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage(Option<web_sys::Storage>);

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn from_window(window: &web_sys::Window) -> Self {
        Self(window.local_storage().ok().flatten())
    }
}

#[cfg(target_arch = "wasm32")]
impl IdentityStore for LocalStorage {
    fn load(&self) -> Option<String> {
        self.0.as_ref()?.get_item(STORAGE_KEY).ok().flatten()
    }

    fn save(&mut self, id: &str) {
        if let Some(storage) = &self.0 {
            let _ = storage.set_item(STORAGE_KEY, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MapStore(Option<String>);

    impl IdentityStore for MapStore {
        fn load(&self) -> Option<String> {
            self.0.clone()
        }

        fn save(&mut self, id: &str) {
            self.0 = Some(id.to_string());
        }
    }

    /// Store whose writes never land, like a browser with storage denied.
    struct DeniedStore;

    impl IdentityStore for DeniedStore {
        fn load(&self) -> Option<String> {
            None
        }

        fn save(&mut self, _id: &str) {}
    }

    #[test]
    fn t01_identity_is_stable_within_one_store() {
        let mut store = MapStore::default();

        let first = get_or_create(&mut store);
        let second = get_or_create(&mut store);

        assert_eq!(first, second);
    }

    #[test]
    fn t02_existing_identity_is_returned_unchanged() {
        let mut store = MapStore(Some("1700000000000abc".to_string()));

        assert_eq!(get_or_create(&mut store), "1700000000000abc");
    }

    #[test]
    fn denied_storage_still_yields_an_identity() {
        let mut store = DeniedStore;

        let id = get_or_create(&mut store);

        assert!(!id.is_empty());
    }

    #[test]
    fn synthesized_identities_differ_across_inputs() {
        let a = synthesize(1_700_000_000_000, 0.12345);
        let b = synthesize(1_700_000_000_001, 0.12345);
        let c = synthesize(1_700_000_000_000, 0.54321);

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn synthesized_identity_starts_with_the_timestamp() {
        let id = synthesize(1_700_000_000_000, 0.5);

        assert!(id.starts_with("1700000000000"));
        assert!(id.len() > "1700000000000".len());
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 + 36 + 1), "111");
    }
}
