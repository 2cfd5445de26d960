pub mod provider;

pub use provider::HostedAuthClient;
