//! Identity Provider Module
//!
//! Implementations of the core `IdentityProviderTrait`:
//!
//! - **Vonage**: production provider talking to the Vonage network APIs
//! - **Mock**: development provider with no network access
//!
//! Use [`create_identity_provider`] to build the one selected by configuration.

pub mod keys;
pub mod mock;
pub mod vonage;

pub use keys::ApplicationKey;
pub use mock::MockIdentityProvider;
pub use vonage::{VonageConfig, VonageIdentityProvider};

use nv_core::services::verification::IdentityProviderTrait;
use nv_shared::config::{ProviderConfig, ProviderKind};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create the identity provider selected by configuration
///
/// # Arguments
///
/// * `config` - Provider configuration
/// * `redirect_url` - Callback URL registered with the provider
///
/// # Returns
///
/// A boxed provider, or an error if the Vonage credentials are incomplete or
/// the private key cannot be loaded
pub fn create_identity_provider(
    config: &ProviderConfig,
    redirect_url: String,
) -> Result<Box<dyn IdentityProviderTrait>, InfrastructureError> {
    match config.kind {
        ProviderKind::Mock => {
            tracing::warn!("Using mock identity provider; numbers are not checked against a carrier");
            Ok(Box::new(MockIdentityProvider::new(redirect_url)))
        }
        ProviderKind::Vonage => {
            let vonage_config = VonageConfig::from_provider_config(config, redirect_url)?;
            Ok(Box::new(VonageIdentityProvider::new(vonage_config)?))
        }
    }
}
