use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    Charset, EncodingSchema, Method, Password, Sender, Username, ValidityPeriod,
};

/// Default gateway endpoint for the REST send API.
pub const DEFAULT_ENDPOINT: &str = "https://gateway.skebby.it/api/send/smseasy/advanced/rest.php";

#[derive(Debug, Clone)]
/// Resolved client configuration, immutable once constructed.
///
/// Required values are validated by their constructors; optional values fall
/// back to the gateway defaults. All configuration failures surface while
/// building this type, never at send time.
pub struct Config {
    username: Username,
    password: Password,
    sender: Sender,
    method: Method,
    delivery_start: Option<DateTime<Utc>>,
    charset: Charset,
    validity_period: ValidityPeriod,
    encoding_schema: EncodingSchema,
    endpoint: String,
}

impl Config {
    /// Create a configuration with the required values and gateway defaults
    /// for everything else.
    pub fn new(username: Username, password: Password, sender: Sender, method: Method) -> Self {
        Self {
            username,
            password,
            sender,
            method,
            delivery_start: None,
            charset: Charset::default(),
            validity_period: ValidityPeriod::default(),
            encoding_schema: EncodingSchema::default(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }

    /// Default delivery start applied to messages that do not override it.
    pub fn with_delivery_start(mut self, delivery_start: DateTime<Utc>) -> Self {
        self.delivery_start = Some(delivery_start);
        self
    }

    /// Character set of outgoing message text.
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Default validity period applied to messages that do not override it.
    pub fn with_validity_period(mut self, validity_period: ValidityPeriod) -> Self {
        self.validity_period = validity_period;
        self
    }

    /// Payload encoding schema.
    pub fn with_encoding_schema(mut self, encoding_schema: EncodingSchema) -> Self {
        self.encoding_schema = encoding_schema;
        self
    }

    /// Override the gateway endpoint. The value must be an absolute URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, ValidationError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint).map_err(|_| ValidationError::InvalidEndpoint {
            input: endpoint.clone(),
        })?;
        self.endpoint = endpoint;
        Ok(self)
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn delivery_start(&self) -> Option<DateTime<Utc>> {
        self.delivery_start
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn validity_period(&self) -> ValidityPeriod {
        self.validity_period
    }

    pub fn encoding_schema(&self) -> EncodingSchema {
        self.encoding_schema
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
