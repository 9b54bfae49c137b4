mod dispatcher;
mod formsubmit;
mod http;
mod message;
mod notifier;
mod resend;
mod sendgrid;
mod smtp;

pub use dispatcher::*;
pub use formsubmit::*;
pub use message::*;
pub use notifier::*;
pub use resend::*;
pub use sendgrid::*;
pub use smtp::*;
