//! Profile model and lookup payload normalisation.
//!
//! The lookup endpoint answers with a loosely shaped JSON object. [`LookupPayload`]
//! mirrors it with every field optional; [`Profile::from_payload`] turns it into a
//! [`Profile`] or one of the [`ProfileError`] variants. Keeping this step free of
//! browser calls lets it run under plain `cargo test`.

mod fetch;

pub use fetch::{Generation, ProfileFetcher};

use serde::Deserialize;
use serde_json::Value;

use crate::error::ProfileError;

/// Discriminator value meaning "this account uses a unique handle".
pub const LEGACY_DISCRIMINATOR: &str = "0";

const DEFAULT_UPSTREAM_MESSAGE: &str = "API returned error";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub discriminator: String,
    pub id: String,
    pub avatar: Option<String>,
    pub display_name: Option<String>,
    pub flags: u64,
    pub created_at: String,
}

/// Raw lookup response. Fields are kept as loose JSON values: a field of an
/// unexpected type falls back to its default instead of rejecting the payload.
#[derive(Debug, Default, Deserialize)]
pub struct LookupPayload {
    #[serde(default)]
    pub success: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub discriminator: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub avatar: Option<Value>,
    #[serde(default)]
    pub global_name: Option<Value>,
    #[serde(default)]
    pub public_flags: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Value>,
}

/// Non-empty string content only.
fn string_field(v: Option<Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Non-empty string, or a number rendered as text (snowflakes, timestamps).
fn text_field(v: Option<Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn flags_field(v: Option<Value>) -> u64 {
    match v {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

fn upstream_message(error: Option<Value>) -> Option<String> {
    match error? {
        Value::Object(mut fields) => string_field(fields.remove("message")),
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

impl Profile {
    /// Parse a response body and normalise it.
    pub fn from_json(body: &str, fallback_created_at: &str) -> Result<Self, ProfileError> {
        let payload: LookupPayload = serde_json::from_str(body)?;
        Self::from_payload(payload, fallback_created_at)
    }

    /// Normalise a decoded payload. `fallback_created_at` is used when the
    /// payload carries no creation timestamp (callers pass "now").
    pub fn from_payload(
        payload: LookupPayload,
        fallback_created_at: &str,
    ) -> Result<Self, ProfileError> {
        if payload.success == Some(Value::Bool(false)) {
            let message = upstream_message(payload.error)
                .unwrap_or_else(|| DEFAULT_UPSTREAM_MESSAGE.to_string());
            return Err(ProfileError::Upstream { message });
        }
        let username =
            text_field(payload.username).ok_or(ProfileError::Validation { missing: "username" })?;
        let id = text_field(payload.id).ok_or(ProfileError::Validation { missing: "id" })?;

        Ok(Profile {
            username,
            discriminator: text_field(payload.discriminator)
                .unwrap_or_else(|| LEGACY_DISCRIMINATOR.to_string()),
            id,
            avatar: string_field(payload.avatar),
            display_name: string_field(payload.global_name),
            flags: flags_field(payload.public_flags),
            created_at: text_field(payload.created_at)
                .unwrap_or_else(|| fallback_created_at.to_string()),
        })
    }

    /// Human display name when set, else the raw username.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    pub fn uses_legacy_discriminator(&self) -> bool {
        self.discriminator != LEGACY_DISCRIMINATOR
    }

    /// Secondary identity label: `@username` for handle accounts, `#1234` otherwise.
    pub fn handle_label(&self) -> String {
        if self.uses_legacy_discriminator() {
            format!("#{}", self.discriminator)
        } else {
            format!("@{}", self.username)
        }
    }

    /// Text placed on the clipboard by the copy button.
    pub fn clipboard_label(&self) -> String {
        if self.uses_legacy_discriminator() {
            format!("{}#{}", self.display_name(), self.discriminator)
        } else {
            format!("@{}", self.username)
        }
    }

    /// CDN URL of the avatar, if the account has one.
    pub fn avatar_url(&self, cdn: &str, size: u32) -> Option<String> {
        self.avatar.as_ref().map(|hash| {
            format!(
                "{}/avatars/{}/{}.png?size={}",
                cdn.trim_end_matches('/'),
                self.id,
                hash,
                size
            )
        })
    }
}

/// Lookup URL for a user, before relay wrapping.
pub fn lookup_url(base: &str, user_id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2026-01-01T00:00:00.000Z";

    fn parse(body: &str) -> Result<Profile, ProfileError> {
        Profile::from_json(body, NOW)
    }

    #[test]
    fn minimal_payload_gets_defaults() {
        let p = parse(r#"{"username":"ferris","id":"42"}"#).unwrap();
        assert_eq!(p.discriminator, "0");
        assert_eq!(p.flags, 0);
        assert_eq!(p.created_at, NOW);
        assert_eq!(p.avatar, None);
        assert_eq!(p.display_name, None);
    }

    #[test]
    fn full_payload_is_kept() {
        let p = parse(
            r#"{"username":"ferris","id":"42","discriminator":"1234","avatar":"abc",
                "global_name":"Ferris","public_flags":64,"created_at":"2020-05-05T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(p.discriminator, "1234");
        assert_eq!(p.flags, 64);
        assert_eq!(p.display_name(), "Ferris");
        assert_eq!(p.created_at, "2020-05-05T00:00:00Z");
    }

    #[test]
    fn numeric_id_is_accepted() {
        let p = parse(r#"{"username":"ferris","id":1009588950962286673}"#).unwrap();
        assert_eq!(p.id, "1009588950962286673");
    }

    #[test]
    fn mistyped_optional_fields_fall_back_to_defaults() {
        let p = parse(r#"{"username":"crab","id":"1","created_at":1690000000000}"#).unwrap();
        assert_eq!(p.created_at, "1690000000000");

        let p = parse(r#"{"username":"crab","id":"1","discriminator":0}"#).unwrap();
        assert_eq!(p.discriminator, "0");
        assert_eq!(p.handle_label(), "@crab");

        let p = parse(
            r#"{"username":"crab","id":"1","discriminator":null,"avatar":42,
                "global_name":{"text":"Crab"},"public_flags":"64","created_at":false}"#,
        )
        .unwrap();
        assert_eq!(p.discriminator, "0");
        assert_eq!(p.avatar, None);
        assert_eq!(p.display_name, None);
        assert_eq!(p.flags, 64);
        assert_eq!(p.created_at, NOW);

        let p = parse(r#"{"username":"crab","id":"1","public_flags":-3}"#).unwrap();
        assert_eq!(p.flags, 0);
    }

    #[test]
    fn odd_error_shapes_still_report_upstream_failure() {
        let err = parse(r#"{"success":false,"error":"rate limited"}"#).unwrap_err();
        assert!(matches!(err, ProfileError::Upstream { ref message } if message == "rate limited"));

        let err = parse(r#"{"success":false,"error":{"message":7}}"#).unwrap_err();
        assert!(
            matches!(err, ProfileError::Upstream { ref message } if message == "API returned error")
        );
    }

    #[test]
    fn explicit_failure_carries_upstream_message() {
        let err = parse(r#"{"success":false,"error":{"message":"Unknown User"}}"#).unwrap_err();
        assert!(matches!(err, ProfileError::Upstream { ref message } if message == "Unknown User"));

        let err = parse(r#"{"success":false}"#).unwrap_err();
        assert!(
            matches!(err, ProfileError::Upstream { ref message } if message == "API returned error")
        );
    }

    #[test]
    fn missing_identity_is_validation_error() {
        assert!(matches!(
            parse(r#"{"id":"42"}"#),
            Err(ProfileError::Validation { missing: "username" })
        ));
        assert!(matches!(
            parse(r#"{"username":"ferris","id":""}"#),
            Err(ProfileError::Validation { missing: "id" })
        ));
        assert!(matches!(
            parse(r#"{"username":"","id":"1"}"#),
            Err(ProfileError::Validation { missing: "username" })
        ));
    }

    #[test]
    fn non_json_body_is_decode_error() {
        assert!(matches!(parse("<html>"), Err(ProfileError::Decode(_))));
    }

    #[test]
    fn labels_follow_discriminator() {
        let mut p = parse(r#"{"username":"ferris","id":"42","global_name":"Ferris"}"#).unwrap();
        assert_eq!(p.handle_label(), "@ferris");
        assert_eq!(p.clipboard_label(), "@ferris");

        p.discriminator = "0420".to_string();
        assert_eq!(p.handle_label(), "#0420");
        assert_eq!(p.clipboard_label(), "Ferris#0420");
    }

    #[test]
    fn avatar_url_uses_cdn_layout() {
        let p = parse(r#"{"username":"ferris","id":"42","avatar":"abc"}"#).unwrap();
        assert_eq!(
            p.avatar_url("https://cdn.discordapp.com/", 128).as_deref(),
            Some("https://cdn.discordapp.com/avatars/42/abc.png?size=128")
        );
        let bare = parse(r#"{"username":"ferris","id":"42"}"#).unwrap();
        assert_eq!(bare.avatar_url("https://cdn.discordapp.com", 128), None);
    }

    #[test]
    fn lookup_url_appends_user_id() {
        assert_eq!(
            lookup_url("https://host/api/public/tools/user_lookup/", "7"),
            "https://host/api/public/tools/user_lookup/7"
        );
    }
}
