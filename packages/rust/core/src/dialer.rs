//! Dialer intents: call and messaging URIs for a contact's primary number.
//!
//! Only the first phone number is ever used. Formatting strips everything but
//! ASCII digits; a contact with no usable number produces no intent.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;
use url::Url;

use contactbook_shared::{AppConfig, ContactBookError, ContactRecord, PhoneNumber, Platform, Result};

/// Native messaging-app scheme prefix; the digits are appended.
const MESSAGE_SCHEME_PREFIX: &str = "whatsapp://send?phone=";

/// URIs for messaging a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageIntent {
    /// Opens the native messaging app.
    pub native: Url,
    /// Web page to open when the native scheme cannot be handled.
    pub web_fallback: Url,
}

/// Builds dialer intents for one platform.
#[derive(Debug, Clone)]
pub struct Dialer {
    platform: Platform,
    web_fallback_base: Url,
}

impl Dialer {
    pub fn new(platform: Platform, web_fallback_base: Url) -> Self {
        Self {
            platform,
            web_fallback_base,
        }
    }

    /// Build from `[defaults] platform` and `[dialer] web_fallback_base`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let base = &config.dialer.web_fallback_base;
        let url = Url::parse(base).map_err(|e| {
            ContactBookError::config(format!("invalid dialer.web_fallback_base '{base}': {e}"))
        })?;
        Ok(Self::new(config.defaults.platform, url))
    }

    /// Same settings on a different platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// `tel:` on Android, `telprompt:` on iOS. `None` when there is nothing to call.
    pub fn call_uri(&self, record: &ContactRecord) -> Result<Option<Url>> {
        let Some(digits) = dialable_digits(record) else {
            return Ok(None);
        };
        let scheme = match self.platform {
            Platform::Android => "tel",
            Platform::Ios => "telprompt",
        };
        debug!(contact = %record.id, platform = %self.platform, "building call URI");
        parse_uri(&format!("{scheme}:{digits}")).map(Some)
    }

    /// Native messaging URI plus its web fallback. `None` when there is no number.
    pub fn message_intent(&self, record: &ContactRecord) -> Result<Option<MessageIntent>> {
        let Some(digits) = dialable_digits(record) else {
            return Ok(None);
        };
        debug!(contact = %record.id, "building message intent");
        let native = parse_uri(&format!("{MESSAGE_SCHEME_PREFIX}{digits}"))?;
        let web_fallback = self.web_fallback_base.join(&digits).map_err(|e| {
            ContactBookError::validation(format!("cannot build fallback URI for '{digits}': {e}"))
        })?;
        Ok(Some(MessageIntent {
            native,
            web_fallback,
        }))
    }
}

/// The first phone number, the only one shown and dialed.
pub fn primary_number(record: &ContactRecord) -> Option<&PhoneNumber> {
    record.phone_numbers.first()
}

/// Remove every character that is not an ASCII decimal digit.
pub fn digits_only(number: &str) -> String {
    static NON_DIGIT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^0-9]").expect("valid regex"));
    NON_DIGIT_RE.replace_all(number, "").into_owned()
}

fn dialable_digits(record: &ContactRecord) -> Option<String> {
    let digits = digits_only(&primary_number(record)?.number);
    (!digits.is_empty()).then_some(digits)
}

fn parse_uri(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| ContactBookError::validation(format!("invalid URI '{raw}': {e}")))
}
