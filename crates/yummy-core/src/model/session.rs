use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use yummy_api::AuthToken;

/// UI colour scheme stored on the user's profile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// The signed-in user's profile. Owned by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub theme: Theme,
}

/// Authentication state handed back by `register`, `login` and `session()`.
///
/// A non-`None` token means the API client attaches it to every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<AuthToken>,
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn authenticated(token: AuthToken, user: UserProfile) -> Self {
        Self {
            token: Some(token),
            is_authenticated: true,
            user: Some(user),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggles_and_parses() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(Theme::Light.to_string(), "light");
    }
}
