//! Interaction pipeline: typed events, dispatch, and response envelopes.
//!
//! ```text
//! raw bytes → SignatureVerifier → Interaction → CommandRegistry → InteractionResponse
//! ```

pub mod dispatch;
pub mod response;
pub mod types;

pub use dispatch::{dispatch, DispatchError};
pub use response::{InteractionResponse, ResponseData, ResponseType, EPHEMERAL};
pub use types::{CommandData, CommandOption, Interaction, PayloadError};
