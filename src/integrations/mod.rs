//! External service integrations.

pub mod resend_client {
    pub use crate::resend_client::*;
}

pub mod notification {
    pub use crate::notification::*;
}
