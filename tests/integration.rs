// Integration tests (native) for the `profile-card` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use profile_card::profile::Profile;
use profile_card::render::{Presence, ProfileView};
use profile_card::{PageConfig, ProfileError};

const NOW: &str = "2026-10-19T00:00:00.000Z";

// A lookup that the upstream rejects ends in the placeholder card.
#[test]
fn unknown_user_falls_back_to_placeholder() {
    let body = r#"{"success":false,"error":{"message":"User not found"}}"#;
    let err = Profile::from_json(body, NOW).unwrap_err();
    assert!(matches!(err, ProfileError::Upstream { .. }));
    assert_eq!(err.to_string(), "User not found");

    let view = ProfileView::placeholder(Presence::parse(&PageConfig::default().presence));
    assert_eq!(view.display_name, "Loading...");
    assert_eq!(view.handle, "Loading...");
    assert_eq!(view.presence, Presence::DoNotDisturb);
}

#[test]
fn handle_account_renders_at_username() {
    let body = r#"{"id":"1009588950962286673","username":"crab","avatar":"a1b2",
                   "global_name":"Crab","discriminator":"0","public_flags":0}"#;
    let profile = Profile::from_json(body, NOW).unwrap();
    let cfg = PageConfig::default();
    let view = ProfileView::from_profile(&profile, &cfg.avatar_cdn, cfg.avatar_size, Presence::Online);

    assert_eq!(view.display_name, "Crab");
    assert_eq!(view.handle, "@crab");
    assert_eq!(view.initial, "C");
    assert_eq!(
        view.avatar_url.as_deref(),
        Some("https://cdn.discordapp.com/avatars/1009588950962286673/a1b2.png?size=128")
    );
}

#[test]
fn payload_without_id_is_rejected() {
    let err = Profile::from_json(r#"{"username":"crab"}"#, NOW).unwrap_err();
    assert!(matches!(err, ProfileError::Validation { missing: "id" }));
}

#[test]
fn config_round_trip_from_page_json() {
    let cfg = PageConfig::from_json(r#"{"presence":"idle","particle_count":10}"#).unwrap();
    assert_eq!(Presence::parse(&cfg.presence), Presence::Idle);
    assert_eq!(cfg.particle_count, 10);
    assert_eq!(cfg.toast_duration_ms, 4000);
}
