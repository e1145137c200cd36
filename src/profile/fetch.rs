use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::{Profile, lookup_url};
use crate::config::PageConfig;
use crate::error::{ProfileError, describe_js};

/// Sequence number handed out per load so late responses can be recognised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation(u64);

/// Issues lookups through the CORS relay. Clones share the generation counter,
/// so a clone moved into a future still sees newer loads started elsewhere.
#[derive(Clone, Debug)]
pub struct ProfileFetcher {
    lookup_base: String,
    relay_prefix: String,
    generation: Rc<Cell<u64>>,
}

impl ProfileFetcher {
    pub fn new(cfg: &PageConfig) -> Self {
        Self {
            lookup_base: cfg.lookup_base.clone(),
            relay_prefix: cfg.relay_prefix.clone(),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Mark the start of a load. Every earlier generation becomes stale.
    pub fn begin(&self) -> Generation {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        Generation(next)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation.get() == generation.0
    }

    /// Relay-wrapped URL for `user_id`.
    pub fn request_url(&self, user_id: &str) -> String {
        let target = lookup_url(&self.lookup_base, user_id);
        let encoded: String = js_sys::encode_uri_component(&target).into();
        format!("{}{}", self.relay_prefix, encoded)
    }

    pub async fn load(&self, user_id: &str) -> Result<Profile, ProfileError> {
        let url = self.request_url(user_id);
        tracing::debug!(%url, "fetching profile");
        let window = web_sys::window().ok_or_else(|| ProfileError::Network("no window".into()))?;

        let value = JsFuture::from(window.fetch_with_str(&url))
            .await
            .map_err(|e| ProfileError::Network(describe_js(&e)))?;
        let resp: Response = value
            .dyn_into()
            .map_err(|_| ProfileError::Network("fetch did not yield a Response".into()))?;
        if !resp.ok() {
            return Err(ProfileError::Transport { status: resp.status() });
        }

        let text = resp.text().map_err(|e| ProfileError::Network(describe_js(&e)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| ProfileError::Network(describe_js(&e)))?
            .as_string()
            .ok_or_else(|| ProfileError::Network("response body is not text".into()))?;

        let now: String = js_sys::Date::new_0().to_iso_string().into();
        Profile::from_json(&body, &now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_load_makes_older_generation_stale() {
        let fetcher = ProfileFetcher::new(&PageConfig::default());
        let first = fetcher.begin();
        assert!(fetcher.is_current(first));

        let in_flight = fetcher.clone();
        let second = fetcher.begin();
        assert!(!in_flight.is_current(first));
        assert!(in_flight.is_current(second));
    }
}
