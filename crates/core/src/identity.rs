//! Sign-in display state.
//!
//! The browser-side sign-in widget hands back `{email, displayName, token}`
//! as raw text. Only the e-mail and display name matter here; the token is
//! carried but never verified or otherwise used.

use serde::{Deserialize, Serialize};

/// Raw payload produced by the sign-in widget.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// What the navigation bar should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthDisplay {
    SignedIn {
        email: String,
        display_name: Option<String>,
    },
    SignedOut,
}

impl AuthDisplay {
    /// Interpret the widget's raw text.
    ///
    /// Anything other than a JSON object carrying a non-empty string
    /// `email` is treated as signed out.
    pub fn from_widget_payload(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return AuthDisplay::SignedOut;
        };

        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring undecodable sign-in payload");
                return AuthDisplay::SignedOut;
            }
        };
        if !value.is_object() {
            return AuthDisplay::SignedOut;
        }

        // Mistyped optional fields (e.g. a numeric display name) should not
        // sign the user out, so read the e-mail straight from the value.
        let email = value.get("email").and_then(|e| e.as_str()).unwrap_or_default();
        if email.is_empty() {
            return AuthDisplay::SignedOut;
        }
        let display_name = serde_json::from_value::<SignInPayload>(value.clone())
            .ok()
            .and_then(|p| p.display_name)
            .filter(|n| !n.is_empty());

        AuthDisplay::SignedIn {
            email: email.to_string(),
            display_name,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthDisplay::SignedIn { .. })
    }

    /// Preference-store key for a signed-in user.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthDisplay::SignedIn { email, .. } => Some(email),
            AuthDisplay::SignedOut => None,
        }
    }
}

/// Web configuration the browser needs to start the sign-in popup.
///
/// Every field is passed through as configured; missing values serialise as
/// empty strings so the client script always sees the same shape.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClientConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl IdentityClientConfig {
    /// Whether enough is configured for the popup to work at all.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.auth_domain.is_empty()
    }
}
