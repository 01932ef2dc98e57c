//! Connection parameters for the underlying driver.
//!
//! The locator (DSN or full connection string) is opaque to this crate and is
//! handed to the driver verbatim. One options key is interpreted here:
//! [`OPTION_CHARSET`], which selects the target encoding for fetched strings.

use std::collections::HashMap;
use std::fmt;

/// Options key selecting the target output encoding.
pub const OPTION_CHARSET: &str = "charset";

/// Parameters for establishing a connection through a legacy driver.
#[derive(Clone)]
pub struct ConnectParams {
    /// Data-source locator, passed to the driver verbatim
    locator: String,

    /// Optional credentials
    credentials: Option<Credentials>,

    /// Free-form driver options
    options: HashMap<String, String>,
}

impl ConnectParams {
    /// Create parameters with a locator and no credentials or options.
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            credentials: None,
            options: HashMap::new(),
        }
    }

    /// Create a new builder seeded with a locator.
    pub fn builder(locator: impl Into<String>) -> ConnectParamsBuilder {
        ConnectParamsBuilder::new(locator)
    }

    /// Get the data-source locator.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Get the credentials, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Get the options mapping.
    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }

    /// Get the requested target charset label, if configured.
    pub fn charset(&self) -> Option<&str> {
        self.options.get(OPTION_CHARSET).map(String::as_str)
    }
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("locator", &self.locator)
            .field("username", &self.credentials.as_ref().map(|c| &c.username))
            .field("options", &self.options)
            .finish()
    }
}

/// User credentials for authentication.
#[derive(Clone)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Password (cleared from memory on drop)
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Get the password (never logged).
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        // Clear password bytes (basic security measure)
        self.password.clear();
    }
}

/// Builder for [`ConnectParams`].
#[derive(Debug, Clone)]
pub struct ConnectParamsBuilder {
    locator: String,
    username: Option<String>,
    password: Option<String>,
    options: HashMap<String, String>,
}

impl ConnectParamsBuilder {
    /// Create a builder seeded with a locator.
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            username: None,
            password: None,
            options: HashMap::new(),
        }
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set an arbitrary driver option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Set the target output charset (shorthand for the `charset` option).
    pub fn charset(self, label: impl Into<String>) -> Self {
        self.option(OPTION_CHARSET, label)
    }

    /// Build the final parameters.
    pub fn build(self) -> ConnectParams {
        let credentials = match self.username {
            Some(username) => Some(Credentials::new(
                username,
                self.password.unwrap_or_default(),
            )),
            None => None,
        };

        ConnectParams {
            locator: self.locator,
            credentials,
            options: self.options,
        }
    }
}
