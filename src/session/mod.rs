//! Session resolution against the external account API.

pub mod api_provider;
pub mod provider;
pub mod resolver;

pub use api_provider::ApiProfileProvider;
pub use provider::{AccountProvider, ProfileProvider, SessionError};
pub use resolver::SessionResolver;
