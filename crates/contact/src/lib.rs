mod error;
mod fallback;
mod form;

pub use error::*;
pub use fallback::*;
pub use form::*;
