use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::{
    Charset, Chunk, Config, EncodingSchema, MessageText, Method, Password, PhoneNumber,
    RawPhoneNumber, ResolvedSender, Sender, UserReference, Username, ValidationError,
    ValidityPeriod,
};

/// Form field name for the delivery start timestamp (`delivery_start`).
const DELIVERY_START_FIELD: &str = "delivery_start";

/// JSON key carrying the recipient number inside a variables entry.
const RECIPIENT_KEY: &str = "recipient";

/// Encode one chunk as the gateway's form body, as ordered pairs.
///
/// The gateway expects every field present in a fixed order; omitted optional
/// values are emitted with an empty value. Every recipient must normalize to
/// an MSISDN or the whole request is rejected.
pub fn encode_send_sms_form(
    config: &Config,
    chunk: &Chunk,
) -> Result<Vec<(String, String)>, ValidationError> {
    let mut params = Vec::with_capacity(12);

    params.push((
        Username::FIELD.to_owned(),
        config.username().as_str().to_owned(),
    ));
    params.push((
        Password::FIELD.to_owned(),
        config.password().as_str().to_owned(),
    ));
    params.push((Method::FIELD.to_owned(), config.method().as_wire().to_owned()));

    let (sender_number, sender_string) = match config.sender().resolve() {
        ResolvedSender::Number(msisdn) => (msisdn, String::new()),
        ResolvedSender::Alphanumeric(name) => (String::new(), name),
    };
    params.push((Sender::NUMBER_FIELD.to_owned(), sender_number));
    params.push((Sender::STRING_FIELD.to_owned(), sender_string));

    params.push((RawPhoneNumber::FIELD.to_owned(), encode_recipients(chunk)?));
    params.push((
        MessageText::FIELD.to_owned(),
        chunk.text().as_str().to_owned(),
    ));
    params.push((
        UserReference::FIELD.to_owned(),
        chunk
            .options()
            .user_reference
            .as_ref()
            .map(UserReference::as_str)
            .unwrap_or_default()
            .to_owned(),
    ));

    let delivery_start = chunk.options().delivery_start.or(config.delivery_start());
    params.push((
        DELIVERY_START_FIELD.to_owned(),
        delivery_start
            .map(|start| start.to_rfc2822())
            .unwrap_or_default(),
    ));

    let validity_period = chunk
        .options()
        .validity_period
        .unwrap_or(config.validity_period());
    params.push((
        ValidityPeriod::FIELD.to_owned(),
        validity_period.minutes().to_string(),
    ));

    params.push((
        EncodingSchema::FIELD.to_owned(),
        config.encoding_schema().as_wire().to_owned(),
    ));
    params.push((Charset::FIELD.to_owned(), config.charset().as_wire().to_owned()));

    Ok(params)
}

/// Serialize the chunk's recipients as the JSON payload embedded in the
/// `recipients` form value.
///
/// Without variables the payload is a plain array of MSISDN strings; with
/// variables each recipient becomes an object carrying its variable set.
fn encode_recipients(chunk: &Chunk) -> Result<String, ValidationError> {
    let with_variables = !chunk.variables().is_empty();

    let entries = chunk
        .recipients()
        .iter()
        .map(|recipient| {
            let phone = PhoneNumber::parse(recipient.raw())?;
            Ok(if with_variables {
                recipient_entry(&phone, chunk.variables().get(recipient))
            } else {
                Value::String(phone.msisdn().to_owned())
            })
        })
        .collect::<Result<Vec<Value>, ValidationError>>()?;

    Ok(Value::Array(entries).to_string())
}

fn recipient_entry(phone: &PhoneNumber, variables: Option<&BTreeMap<String, String>>) -> Value {
    let mut entry = Map::new();
    entry.insert(
        RECIPIENT_KEY.to_owned(),
        Value::String(phone.msisdn().to_owned()),
    );
    if let Some(variables) = variables {
        for (name, value) in variables {
            // The recipient key is written first and a variable of the same
            // name must not override it.
            if name == RECIPIENT_KEY {
                continue;
            }
            entry.insert(name.clone(), Value::String(value.clone()));
        }
    }
    Value::Object(entry)
}
