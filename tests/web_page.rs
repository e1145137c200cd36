// Browser test for the whole page: run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

mod common;

use profile_card::dom::ids;
use profile_card::snake::ACTIVATION_PHRASE;
use profile_card::start_page_with_config;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

// The relay prefix turns the request into a data: URL whose body is
// `{"success":false,"error":{"message":"Unknown User"},"pad":"/"}`,
// so the rejected-lookup path runs without any network access.
fn rejecting_lookup_config() -> String {
    serde_json::json!({
        "relay_prefix": "data:application/json,",
        "lookup_base": r#"{"success":false,"error":{"message":"Unknown User"},"pad":""#,
        "user_id": r#""}"#,
    })
    .to_string()
}

#[wasm_bindgen_test]
async fn rejected_lookup_shows_error_toast_and_placeholder() {
    let doc = common::mount_page();
    profile_card::dom::set_text(&doc, ids::DISPLAY_NAME, "stale name");
    profile_card::dom::set_text(&doc, ids::INITIAL, "S");

    let handle = start_page_with_config(&rejecting_lookup_config()).unwrap();
    let toast_shown = common::wait_until(
        || doc.query_selector(".notification-error").ok().flatten().is_some(),
        3000,
    )
    .await;
    assert!(toast_shown);

    let toast = doc.query_selector(".notification-error").unwrap().unwrap();
    assert!(toast.text_content().unwrap().contains("Failed to load Discord data"));
    assert_eq!(common::text_of(&doc, ids::DISPLAY_NAME), "Loading...");
    assert_eq!(common::text_of(&doc, ids::HANDLE), "Loading...");
    assert_eq!(common::text_of(&doc, ids::COPY_BUTTON_TEXT), "Loading...");
    assert_eq!(common::text_of(&doc, ids::INITIAL), "?");
    assert_eq!(common::display_of(&doc, ids::AVATAR), "none");

    assert!(!handle.snake_running());
    common::type_keys(&doc, &ACTIVATION_PHRASE);
    assert!(handle.snake_running());
    assert!(common::element(&doc, ids::SNAKE_SURFACE).class_list().contains("show"));

    common::element(&doc, ids::SNAKE_CLOSE).click();
    assert!(!handle.snake_running());
}
