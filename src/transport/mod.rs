//! Transport layer: wire-format details (form serialization).

mod send_sms;

pub use send_sms::encode_send_sms_form;
