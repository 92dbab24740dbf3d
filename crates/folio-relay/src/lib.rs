pub mod contracts;
pub mod error;
pub mod mailer;
pub mod server;
pub mod validation;

pub use contracts::*;
pub use error::RelayError;
pub use mailer::*;
pub use server::*;
