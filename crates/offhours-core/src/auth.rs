//! Bearer-token storage for the management API.
//!
//! The token lives in the OS keyring under the `offhours` service name.
//! `OFFHOURS_TOKEN` overrides the keyring for headless environments.

const SERVICE: &str = "offhours";
const TOKEN_KEY: &str = "management_token";

/// Environment variable consulted before the keyring.
pub const TOKEN_ENV: &str = "OFFHOURS_TOKEN";

/// The token to authenticate remote calls with, if any is available.
pub fn stored_token() -> Result<Option<String>, Box<dyn std::error::Error>> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.is_empty() {
            return Ok(Some(token));
        }
    }
    let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
    match entry.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Persist the token to the OS keyring.
pub fn store_token(token: &str) -> Result<(), Box<dyn std::error::Error>> {
    let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
    entry.set_password(token)?;
    Ok(())
}

/// Remove the stored token. Removing an absent token is not an error.
pub fn clear_token() -> Result<(), Box<dyn std::error::Error>> {
    let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
