mod send;
mod server;

pub use send::{provider_report, providers, send};
pub use server::serve;
