//! Page controller: owns every component for the lifetime of the page and wires
//! them to the markup.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};

use crate::clipboard;
use crate::config::PageConfig;
use crate::decor::{self, ParticleField};
use crate::dom::{self, ids};
use crate::error::DomError;
use crate::notify::{Notifier, Severity};
use crate::profile::{Profile, ProfileFetcher};
use crate::render::{Presence, ProfileView};
use crate::snake::{Phase, SnakeDriver};

const LOADED_MESSAGE: &str = "Discord profile loaded!";
const LOAD_FAILED_MESSAGE: &str = "Failed to load Discord data";
const COPIED_MESSAGE: &str = "Name copied to clipboard!";
const COPY_FAILED_MESSAGE: &str = "Could not copy name to clipboard";
const PULSE_MS: i32 = 150;

struct Page {
    cfg: PageConfig,
    doc: Document,
    presence: Presence,
    fetcher: ProfileFetcher,
    notifier: Notifier,
    profile: RefCell<Option<Profile>>,
    snake: Rc<RefCell<SnakeDriver>>,
}

impl Page {
    fn start(cfg: PageConfig) -> Result<Rc<Self>, DomError> {
        let doc = dom::document()?;
        let mut rng = rand::thread_rng();

        decor::place_orbs(&doc, &mut rng)?;
        let field = ParticleField::spawn(&doc, cfg.particle_count, cfg.interaction_radius_px, &mut rng)?;
        tracing::debug!(particles = field.len(), "particle field ready");
        decor::bind_pointer(&doc, Rc::new(field))?;

        let snake = SnakeDriver::install(&doc, &cfg)?;
        let page = Rc::new(Page {
            presence: Presence::parse(&cfg.presence),
            fetcher: ProfileFetcher::new(&cfg),
            notifier: Notifier::new(cfg.toast_duration_ms),
            profile: RefCell::new(None),
            snake,
            doc,
            cfg,
        });

        let copy_button: HtmlElement = dom::by_id(&page.doc, ids::COPY_BUTTON)?;
        {
            let page = page.clone();
            dom::on(&copy_button, "click", move || spawn_local(page.clone().copy_name()))?;
        }
        let refresh_button: HtmlElement = dom::by_id(&page.doc, ids::REFRESH_BUTTON)?;
        {
            let page = page.clone();
            dom::on(&refresh_button, "click", move || spawn_local(page.clone().load()))?;
        }

        spawn_local(page.clone().load());
        Ok(page)
    }

    /// Fetch and render the profile. A response that arrives after a newer load
    /// started is dropped.
    async fn load(self: Rc<Self>) {
        let generation = self.fetcher.begin();
        let result = self.fetcher.load(&self.cfg.user_id).await;
        if !self.fetcher.is_current(generation) {
            tracing::debug!(?generation, "discarding stale profile response");
            return;
        }

        match result {
            Ok(profile) => {
                tracing::info!(username = %profile.username, id = %profile.id, "profile loaded");
                ProfileView::from_profile(&profile, &self.cfg.avatar_cdn, self.cfg.avatar_size, self.presence)
                    .apply(&self.doc);
                *self.profile.borrow_mut() = Some(profile);
                self.notifier.notify(LOADED_MESSAGE, Severity::Success);
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading profile");
                *self.profile.borrow_mut() = None;
                ProfileView::placeholder(self.presence).apply(&self.doc);
                self.notifier.notify(LOAD_FAILED_MESSAGE, Severity::Error);
            }
        }
    }

    async fn copy_name(self: Rc<Self>) {
        let text = clipboard::copy_text_for(self.profile.borrow().as_ref());
        self.pulse_copy_button();
        match clipboard::write_text(&text).await {
            Ok(()) => self.notifier.notify(COPIED_MESSAGE, Severity::Success),
            Err(e) => {
                tracing::warn!(error = %e, "copy failed");
                self.notifier.notify(COPY_FAILED_MESSAGE, Severity::Error);
            }
        }
    }

    fn pulse_copy_button(&self) {
        let Ok(button) = dom::by_id::<HtmlElement>(&self.doc, ids::COPY_BUTTON) else {
            return;
        };
        dom::set_style(&button, "transform", "scale(0.95)");
        dom::after(PULSE_MS, move || dom::set_style(&button, "transform", ""));
    }
}

/// Handle returned to JS by the start functions.
#[wasm_bindgen]
pub struct PageHandle {
    page: Rc<Page>,
}

#[wasm_bindgen]
impl PageHandle {
    /// Re-run the profile lookup.
    pub fn refresh(&self) {
        spawn_local(self.page.clone().load());
    }

    pub fn notify(&self, message: &str, severity: &str) {
        self.page.notifier.notify(message, Severity::parse(severity));
    }

    #[wasm_bindgen(js_name = snakeRunning)]
    pub fn snake_running(&self) -> bool {
        self.page.snake.borrow().phase() == Phase::Running
    }
}

pub(crate) fn start(cfg: PageConfig) -> Result<PageHandle, JsValue> {
    let page = Page::start(cfg)?;
    Ok(PageHandle { page })
}
