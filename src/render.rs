//! Maps a [`Profile`] onto the card.
//!
//! [`ProfileView`] is the full visible state of the card computed up front; applying
//! it only assigns properties, so rendering the same profile twice leaves the page
//! exactly as the first render did.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::dom::{self, ids};
use crate::profile::Profile;

pub const PLACEHOLDER_TEXT: &str = "Loading...";
pub const PLACEHOLDER_INITIAL: &str = "?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Online,
    Idle,
    DoNotDisturb,
    Offline,
}

impl Presence {
    /// Unknown names fall back to do-not-disturb.
    pub fn parse(name: &str) -> Self {
        match name {
            "online" => Presence::Online,
            "idle" => Presence::Idle,
            "offline" => Presence::Offline,
            _ => Presence::DoNotDisturb,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Presence::Online => "Online",
            Presence::Idle => "Idle",
            Presence::DoNotDisturb => "Do Not Disturb",
            Presence::Offline => "Offline",
        }
    }

    /// Extra class on the status dot; online uses the base style.
    pub fn dot_class(self) -> Option<&'static str> {
        match self {
            Presence::Online => None,
            Presence::Idle => Some("idle"),
            Presence::DoNotDisturb => Some("dnd"),
            Presence::Offline => Some("offline"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileView {
    pub display_name: String,
    pub handle: String,
    pub button_label: String,
    pub initial: String,
    pub avatar_url: Option<String>,
    pub presence: Presence,
}

/// First character of `name`, uppercased; `?` for an empty name.
pub fn initial_glyph(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| PLACEHOLDER_INITIAL.to_string())
}

impl ProfileView {
    pub fn from_profile(profile: &Profile, avatar_cdn: &str, avatar_size: u32, presence: Presence) -> Self {
        let display_name = profile.display_name().to_string();
        Self {
            initial: initial_glyph(&display_name),
            handle: profile.handle_label(),
            button_label: display_name.clone(),
            display_name,
            avatar_url: profile.avatar_url(avatar_cdn, avatar_size),
            presence,
        }
    }

    /// The "unavailable" card shown after a failed load.
    pub fn placeholder(presence: Presence) -> Self {
        Self {
            display_name: PLACEHOLDER_TEXT.to_string(),
            handle: PLACEHOLDER_TEXT.to_string(),
            button_label: PLACEHOLDER_TEXT.to_string(),
            initial: PLACEHOLDER_INITIAL.to_string(),
            avatar_url: None,
            presence,
        }
    }

    pub fn apply(&self, doc: &Document) {
        dom::set_text(doc, ids::DISPLAY_NAME, &self.display_name);
        dom::set_text(doc, ids::HANDLE, &self.handle);
        dom::set_text(doc, ids::COPY_BUTTON_TEXT, &self.button_label);
        dom::set_text(doc, ids::INITIAL, &self.initial);
        self.apply_avatar(doc);
        self.apply_presence(doc);
    }

    fn apply_avatar(&self, doc: &Document) {
        let avatar = dom::by_id::<HtmlImageElement>(doc, ids::AVATAR).ok();
        let initial = dom::by_id::<HtmlElement>(doc, ids::INITIAL).ok();
        let (Some(avatar), Some(initial)) = (avatar, initial) else {
            tracing::warn!("avatar elements missing; skipping avatar update");
            return;
        };

        install_avatar_fallback(&avatar, &initial);
        match &self.avatar_url {
            Some(url) => {
                // Reassign even when unchanged; a failing image then fires `error` again.
                avatar.set_src(url);
                dom::set_style(&avatar, "display", "block");
                dom::set_style(&initial, "display", "none");
            }
            None => {
                dom::set_style(&avatar, "display", "none");
                dom::set_style(&initial, "display", "block");
            }
        }
    }

    fn apply_presence(&self, doc: &Document) {
        dom::set_text(doc, ids::STATUS_TEXT, self.presence.text());
        if let Some(dot) = doc.get_element_by_id(ids::STATUS_DOT) {
            dot.set_class_name("status-dot");
            if let Some(class) = self.presence.dot_class() {
                let _ = dot.class_list().add_1(class);
            }
        }
    }
}

/// One `error` handler per avatar element for the life of the page.
fn install_avatar_fallback(avatar: &HtmlImageElement, initial: &HtmlElement) {
    if avatar.onerror().is_some() {
        return;
    }
    let (img, glyph) = (avatar.clone(), initial.clone());
    let on_error = Closure::wrap(Box::new(move || {
        tracing::warn!("avatar failed to load; showing initial");
        dom::set_style(&img, "display", "none");
        dom::set_style(&glyph, "display", "block");
    }) as Box<dyn FnMut()>);
    avatar.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(json: &str) -> Profile {
        Profile::from_json(json, "now").unwrap()
    }

    #[test]
    fn view_prefers_display_name() {
        let p = profile(r#"{"username":"ferris","id":"1","global_name":"ferris the crab"}"#);
        let v = ProfileView::from_profile(&p, "https://cdn", 128, Presence::DoNotDisturb);
        assert_eq!(v.display_name, "ferris the crab");
        assert_eq!(v.button_label, "ferris the crab");
        assert_eq!(v.handle, "@ferris");
        assert_eq!(v.initial, "F");
        assert_eq!(v.avatar_url, None);
    }

    #[test]
    fn view_falls_back_to_username_and_legacy_tag() {
        let p = profile(r#"{"username":"örjan","id":"1","discriminator":"0001","avatar":"h"}"#);
        let v = ProfileView::from_profile(&p, "https://cdn", 64, Presence::Online);
        assert_eq!(v.display_name, "örjan");
        assert_eq!(v.handle, "#0001");
        assert_eq!(v.initial, "Ö");
        assert_eq!(v.avatar_url.as_deref(), Some("https://cdn/avatars/1/h.png?size=64"));
    }

    #[test]
    fn same_profile_gives_same_view() {
        let p = profile(r#"{"username":"ferris","id":"1"}"#);
        let a = ProfileView::from_profile(&p, "c", 128, Presence::Idle);
        let b = ProfileView::from_profile(&p, "c", 128, Presence::Idle);
        assert_eq!(a, b);
    }

    #[test]
    fn placeholder_hides_identity() {
        let v = ProfileView::placeholder(Presence::DoNotDisturb);
        assert_eq!(v.display_name, "Loading...");
        assert_eq!(v.handle, "Loading...");
        assert_eq!(v.initial, "?");
        assert!(v.avatar_url.is_none());
    }

    #[test]
    fn presence_parsing_and_labels() {
        assert_eq!(Presence::parse("idle"), Presence::Idle);
        assert_eq!(Presence::parse("streaming"), Presence::DoNotDisturb);
        assert_eq!(Presence::DoNotDisturb.text(), "Do Not Disturb");
        assert_eq!(Presence::Online.dot_class(), None);
        assert_eq!(Presence::Offline.dot_class(), Some("offline"));
    }

    #[test]
    fn initial_of_empty_name_is_question_mark() {
        assert_eq!(initial_glyph(""), "?");
    }
}
