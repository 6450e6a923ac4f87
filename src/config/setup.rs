//! Interactive setup wizard for first-time configuration
//!
//! Runs when no API token is available from the config file or the
//! environment.

use super::{ApiToken, AppConfig};
use config::ConfigError;
use dialoguer::{Password, theme::ColorfulTheme};

/// Interactive first-time setup - prompts for the API token
///
/// Stores the token in the default config file, leaving the file's other
/// settings as they are, and returns `config` with the token filled in.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - User input cannot be read
/// - The configuration cannot be saved
pub fn first_time_setup(mut config: AppConfig) -> Result<AppConfig, ConfigError> {
    println!("Welcome to dropsearch! An API token is needed to search your bookmarks.");
    println!("Create a test token at https://app.raindrop.io/settings/integrations\n");

    let token: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Raindrop.io API token")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Token cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let path = AppConfig::config_path()?;
    AppConfig::update_file(&path, "token", &token)?;
    config.token = Some(ApiToken::new(token));

    println!("\nConfiguration saved to {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_module_compiles() {
        // Ensures the module compiles and the function signature is correct
        let _: fn(AppConfig) -> Result<AppConfig, ConfigError> = first_time_setup;
    }
}
