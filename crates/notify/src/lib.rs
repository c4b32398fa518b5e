pub mod context;
pub mod dispatcher;
pub mod email;
pub mod sms;
pub mod template;

pub use context::{SenderIdentity, TransportContext};
pub use dispatcher::NotificationDispatcher;
