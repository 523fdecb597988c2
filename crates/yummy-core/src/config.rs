// ── Runtime client configuration ──
//
// Describes *where* the API lives and where state is persisted. The CLI
// builds a `ClientConfig` from its profile and hands it in; core never
// reads config files.

use std::path::PathBuf;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Built-in root store.
    #[default]
    SystemDefaults,
    /// Additional CA certificate (PEM file).
    CustomCa(PathBuf),
}

/// Stored sign-in credentials, used when the front end does not prompt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://so-yummy.example.com/api/`.
    pub api_url: Url,
    pub tls: TlsVerification,
    /// Directory holding persisted slices.
    pub data_dir: PathBuf,
    pub credentials: Option<Credentials>,
}

impl ClientConfig {
    pub fn new(api_url: Url, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            data_dir: data_dir.into(),
            credentials: None,
        }
    }

    #[must_use]
    pub fn with_tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, email: impl Into<String>, password: SecretString) -> Self {
        self.credentials = Some(Credentials {
            email: email.into(),
            password,
        });
        self
    }
}
