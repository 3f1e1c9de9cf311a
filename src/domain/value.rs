use std::str::FromStr;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Form field name used by the gateway (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Form field name used by the gateway (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Configured message originator, either a phone number or an alphanumeric id.
///
/// Invariant: non-empty after trimming. Which of the two wire fields it ends
/// up in is decided by [`Sender::resolve`] at request-build time.
pub struct Sender(String);

/// How a configured [`Sender`] goes on the wire: exactly one of the two
/// gateway fields is populated per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSender {
    /// `sender_number`: E.164 digits without the leading `+`.
    Number(String),
    /// `sender_string`: alphanumeric id, at most
    /// [`Sender::MAX_ALPHANUMERIC_CHARS`] characters.
    Alphanumeric(String),
}

impl Sender {
    /// Configuration key naming this value (`sender`).
    pub const FIELD: &'static str = "sender";
    /// Form field name for numeric senders (`sender_number`).
    pub const NUMBER_FIELD: &'static str = "sender_number";
    /// Form field name for alphanumeric senders (`sender_string`).
    pub const STRING_FIELD: &'static str = "sender_string";
    /// Maximum length the gateway accepts for an alphanumeric sender.
    pub const MAX_ALPHANUMERIC_CHARS: usize = 11;

    /// Create a validated [`Sender`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the sender as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decide the wire representation of this sender.
    ///
    /// A sender that parses as a phone number becomes
    /// [`ResolvedSender::Number`]; anything else falls back to
    /// [`ResolvedSender::Alphanumeric`], truncated to the gateway limit.
    /// Failing to parse is an expected branch here, not an error.
    pub fn resolve(&self) -> ResolvedSender {
        match PhoneNumber::parse(self.as_str()) {
            Ok(phone) => ResolvedSender::Number(phone.msisdn().to_owned()),
            Err(_) => ResolvedSender::Alphanumeric(
                self.0.chars().take(Self::MAX_ALPHANUMERIC_CHARS).collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including
/// whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by the gateway (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Caller-supplied correlation reference echoed back by the gateway
/// (`user_reference`).
///
/// Invariant: non-empty after trimming.
pub struct UserReference(String);

impl UserReference {
    /// Form field name used by the gateway (`user_reference`).
    pub const FIELD: &'static str = "user_reference";

    /// Create a validated [`UserReference`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number as supplied by the caller.
///
/// Invariant: non-empty after trimming. This type does not normalize; the
/// request builder parses it into a [`PhoneNumber`] when encoding, and a
/// recipient that cannot be parsed aborts the whole send.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Form field name used by the gateway (`recipients`).
    pub const FIELD: &'static str = "recipients";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as supplied.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number in the form the gateway accepts: E.164 digits without
/// the leading `+`.
///
/// Equality, ordering, and hashing are based on the MSISDN form.
pub struct PhoneNumber {
    raw: String,
    msisdn: String,
}

impl PhoneNumber {
    /// Form field name used by the gateway (`recipients`).
    pub const FIELD: &'static str = "recipients";

    /// Parse and normalize a phone number.
    ///
    /// A leading `00` international prefix is rewritten to `+`; input with
    /// neither prefix gets `+` prepended, since the gateway only routes
    /// international-format numbers.
    pub fn parse(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let international = if let Some(rest) = raw.strip_prefix("00") {
            format!("+{rest}")
        } else if raw.starts_with('+') {
            raw.clone()
        } else {
            format!("+{raw}")
        };

        let parsed = phonenumber::parse(None, &international)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        let msisdn = e164.trim_start_matches('+').to_owned();

        Ok(Self { raw, msisdn })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 digits without the leading `+`.
    pub fn msisdn(&self) -> &str {
        &self.msisdn
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.msisdn == other.msisdn
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.msisdn.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.msisdn.cmp(&other.msisdn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Gateway send method (`method`).
pub enum Method {
    Classic,
    ClassicPlus,
    Basic,
    TestClassic,
    TestClassicPlus,
    TestBasic,
}

impl Method {
    /// Form field name used by the gateway (`method`).
    pub const FIELD: &'static str = "method";

    /// Wire value sent in the form body.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Classic => "send_sms_classic",
            Self::ClassicPlus => "send_sms_classic_report",
            Self::Basic => "send_sms_basic",
            Self::TestClassic => "test_send_sms_classic",
            Self::TestClassicPlus => "test_send_sms_classic_report",
            Self::TestBasic => "test_send_sms_basic",
        }
    }
}

impl FromStr for Method {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "send_sms_classic" => Self::Classic,
            "send_sms_classic_report" => Self::ClassicPlus,
            "send_sms_basic" => Self::Basic,
            "test_send_sms_classic" => Self::TestClassic,
            "test_send_sms_classic_report" => Self::TestClassicPlus,
            "test_send_sms_basic" => Self::TestBasic,
            other => {
                return Err(ValidationError::UnknownValue {
                    field: Self::FIELD,
                    value: other.to_owned(),
                });
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Character set of the message text (`charset`).
pub enum Charset {
    IsoLatin1,
    #[default]
    Utf8,
}

impl Charset {
    /// Form field name used by the gateway (`charset`).
    pub const FIELD: &'static str = "charset";

    /// Wire value sent in the form body.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::IsoLatin1 => "ISO-8859-1",
            Self::Utf8 => "UTF-8",
        }
    }
}

impl FromStr for Charset {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "ISO-8859-1" => Self::IsoLatin1,
            "UTF-8" => Self::Utf8,
            other => {
                return Err(ValidationError::UnknownValue {
                    field: Self::FIELD,
                    value: other.to_owned(),
                });
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Payload encoding schema (`encoding_scheme`).
pub enum EncodingSchema {
    #[default]
    Normal,
    Ucs2,
}

impl EncodingSchema {
    /// Form field name used by the gateway (`encoding_scheme`).
    pub const FIELD: &'static str = "encoding_scheme";

    /// Wire value sent in the form body.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Ucs2 => "UCS2",
        }
    }
}

impl FromStr for EncodingSchema {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "normal" => Self::Normal,
            "UCS2" => Self::Ucs2,
            other => {
                return Err(ValidationError::UnknownValue {
                    field: Self::FIELD,
                    value: other.to_owned(),
                });
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delivery validity window in minutes (`validity_period`).
///
/// Invariant: `5..=2880`.
pub struct ValidityPeriod(u16);

impl ValidityPeriod {
    /// Form field name used by the gateway (`validity_period`).
    pub const FIELD: &'static str = "validity_period";

    /// Minimum allowed validity in minutes.
    pub const MIN: u16 = 5;
    /// Maximum allowed validity in minutes.
    pub const MAX: u16 = 2880;

    /// Create a validated validity period.
    pub fn new(minutes: u16) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&minutes) {
            return Err(ValidationError::ValidityPeriodOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: minutes,
            });
        }
        Ok(Self(minutes))
    }

    /// Get the validity in minutes.
    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl Default for ValidityPeriod {
    /// Gateway default of 2800 minutes, inside the allowed range.
    fn default() -> Self {
        Self(2800)
    }
}
