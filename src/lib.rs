//! Typed Rust client for the Skebby legacy SMS HTTP gateway.
//!
//! The design is a small layered layout: a domain layer of strong types, a
//! transport layer for wire-format quirks, and a client layer that splits a
//! message into gateway-sized recipient chunks and performs one form POST
//! per chunk, strictly in order.
//!
//! ```rust,no_run
//! use skebby::{
//!     Config, Message, MessageOptions, MessageText, Method, Password, RawPhoneNumber, Sender,
//!     SkebbyClient, Username,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), skebby::SkebbyError> {
//!     let config = Config::new(
//!         Username::new("username")?,
//!         Password::new("password")?,
//!         Sender::new("+393331234567")?,
//!         Method::Classic,
//!     );
//!     let client = SkebbyClient::new(config)?;
//!
//!     let message = Message::new(
//!         vec![RawPhoneNumber::new("+393339876543")?],
//!         MessageText::new("hello")?,
//!         MessageOptions::default(),
//!     );
//!     for response in client.send(&message).await? {
//!         println!("{}", response.raw());
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{SkebbyClient, SkebbyClientBuilder, SkebbyError};
pub use domain::{
    Charset, Chunk, Config, DEFAULT_ENDPOINT, EncodingSchema, Message, MessageOptions,
    MessageText, Method, Password, PhoneNumber, RawPhoneNumber, RecipientVariables,
    ResolvedSender, SEND_SMS_MAX_RECIPIENTS, SendResponse, Sender, UserReference, Username,
    ValidationError, ValidityPeriod,
};
