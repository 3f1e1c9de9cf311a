//! Domain layer: strong types with validation and invariants (no I/O).

mod config;
mod message;
mod response;
mod validation;
mod value;

pub use config::{Config, DEFAULT_ENDPOINT};
pub use message::{
    Chunk, Message, MessageOptions, RecipientVariables, SEND_SMS_MAX_RECIPIENTS,
};
pub use response::SendResponse;
pub use validation::ValidationError;
pub use value::{
    Charset, EncodingSchema, MessageText, Method, Password, PhoneNumber, RawPhoneNumber,
    ResolvedSender, Sender, UserReference, Username, ValidityPeriod,
};
