use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    ValidityPeriodOutOfRange { min: u16, max: u16, actual: u16 },
    InvalidEndpoint { input: String },
    UnknownValue { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::ValidityPeriodOutOfRange { min, max, actual } => {
                write!(
                    f,
                    "validity period minutes out of range: {actual} (expected {min}..={max})"
                )
            }
            Self::InvalidEndpoint { input } => write!(f, "invalid endpoint url: {input}"),
            Self::UnknownValue { field, value } => {
                write!(f, "unknown {field} value: {value}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "username" };
        assert_eq!(err.to_string(), "username must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::ValidityPeriodOutOfRange {
            min: 5,
            max: 2880,
            actual: 2881,
        };
        assert_eq!(
            err.to_string(),
            "validity period minutes out of range: 2881 (expected 5..=2880)"
        );

        let err = ValidationError::InvalidEndpoint {
            input: "not a url".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid endpoint url: not a url");

        let err = ValidationError::UnknownValue {
            field: "method",
            value: "send_sms_turbo".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown method value: send_sms_turbo");
    }
}
