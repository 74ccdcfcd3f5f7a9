use crate::Error;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Where `b2_authorize_account` lives. Everything else comes from its response
pub const DEFAULT_API_URL: &str = "https://api.backblazeb2.com";
/// Per-request timeout used when none is given
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Credentials and client settings for a [B2Service](crate::B2Service)
///
/// `account_id` is the application key id (or the master account id) \
/// The timeout is handed to the HTTP client as-is and applies to every single request
#[derive(Clone, PartialEq, Eq)]
pub struct B2Config {
    pub account_id: String,
    pub application_key: String,
    pub timeout: Duration,
    pub api_url: String,
}

impl B2Config {
    pub fn new<T: Into<String>, Q: Into<String>>(account_id: T, application_key: Q) -> Self {
        B2Config {
            account_id: account_id.into(),
            application_key: application_key.into(),
            timeout: DEFAULT_TIMEOUT,
            api_url: DEFAULT_API_URL.to_owned(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point authorization at another host, e.g. a local mock
    pub fn with_api_url<T: Into<String>>(mut self, api_url: T) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Reads `B2_ACCOUNT_ID` and `B2_APPLICATION_KEY` \
    /// `B2_TIMEOUT_MS` and `B2_API_URL` are optional
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, Error> {
        let account_id = lookup("B2_ACCOUNT_ID")
            .ok_or_else(|| Error::Config("B2_ACCOUNT_ID is not set".to_owned()))?;
        let application_key = lookup("B2_APPLICATION_KEY")
            .ok_or_else(|| Error::Config("B2_APPLICATION_KEY is not set".to_owned()))?;
        let mut config = B2Config::new(account_id, application_key);

        if let Some(ms) = lookup("B2_TIMEOUT_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("B2_TIMEOUT_MS is not a number: {:?}", ms)))?;
            config = config.with_timeout(Duration::from_millis(ms));
        }
        if let Some(url) = lookup("B2_API_URL") {
            config = config.with_api_url(url);
        }
        Ok(config)
    }

    /// Load credentials from a file
    /// The key-file must have the same format as b2_authorize_account expects: "applicationKeyId:applicationKey"
    pub fn from_key_file<T: AsRef<Path>>(file: T) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(file)?;
        Self::from_key_string(contents.trim())
    }

    /// Parse a "applicationKeyId:applicationKey" string
    pub fn from_key_string(keystring: &str) -> Result<Self, Error> {
        match keystring.split_once(':') {
            Some((id, key)) if !id.is_empty() && !key.is_empty() => Ok(B2Config::new(id, key)),
            _ => Err(Error::InvalidInput(
                "expected a key string like \"applicationKeyId:applicationKey\"".to_owned(),
            )),
        }
    }

    /// The "applicationKeyId:applicationKey" string b2_authorize_account wants
    pub fn key_string(&self) -> String {
        format!("{}:{}", self.account_id, self.application_key)
    }
}

// Keep the application key out of logs
impl fmt::Debug for B2Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("B2Config")
            .field("account_id", &self.account_id)
            .field("application_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("api_url", &self.api_url)
            .finish()
    }
}
