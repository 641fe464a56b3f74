//! Cross-cutting collaborator traits.
//!
//! These traits sit below the entity layer so that services, the realtime
//! gateway, and the worker can depend on them without circular imports.

pub mod clock;
pub mod mailer;
pub mod push;

pub use self::clock::{Clock, SystemClock};
pub use self::mailer::{LogMailer, Mailer};
pub use self::push::PushChannel;
