use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value::{MessageText, RawPhoneNumber, UserReference, ValidityPeriod};

/// Maximum number of recipients the gateway accepts in a single request.
/// Messages addressed to more recipients are split into ordered chunks.
pub const SEND_SMS_MAX_RECIPIENTS: usize = 500;

/// Per-recipient template variables, keyed by the recipient as supplied.
pub type RecipientVariables = BTreeMap<RawPhoneNumber, BTreeMap<String, String>>;

#[derive(Debug, Clone, Default)]
/// Per-message overrides of the client-wide defaults.
pub struct MessageOptions {
    pub user_reference: Option<UserReference>,
    pub delivery_start: Option<DateTime<Utc>>,
    pub validity_period: Option<ValidityPeriod>,
}

#[derive(Debug, Clone)]
/// A message to send: text, ordered recipients, and optional per-recipient
/// template variables.
///
/// Recipients may repeat; uniqueness is not enforced. Variables keyed by a
/// phone number that is not among the recipients are ignored. An empty
/// recipient list is representable and rejected by the client at send time,
/// before any network activity.
pub struct Message {
    recipients: Vec<RawPhoneNumber>,
    text: MessageText,
    variables: RecipientVariables,
    options: MessageOptions,
}

impl Message {
    /// Create a message without per-recipient variables.
    pub fn new(recipients: Vec<RawPhoneNumber>, text: MessageText, options: MessageOptions) -> Self {
        Self {
            recipients,
            text,
            variables: RecipientVariables::new(),
            options,
        }
    }

    /// Create a message with per-recipient template variables.
    pub fn with_variables(
        recipients: Vec<RawPhoneNumber>,
        text: MessageText,
        variables: RecipientVariables,
        options: MessageOptions,
    ) -> Self {
        Self {
            recipients,
            text,
            variables,
            options,
        }
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn variables(&self) -> &RecipientVariables {
        &self.variables
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }

    /// Split this message into gateway-sized chunks.
    ///
    /// Chunk `i` holds recipients `[i*MAX, (i+1)*MAX)` in their original
    /// order, so concatenating the chunks reproduces the recipient list.
    /// Each chunk carries fresh copies of the text and options, and only the
    /// variable entries whose key is a recipient of that chunk.
    pub fn chunks(&self) -> Vec<Chunk> {
        self.recipients
            .chunks(SEND_SMS_MAX_RECIPIENTS)
            .map(|recipients| Chunk {
                recipients: recipients.to_vec(),
                text: self.text.clone(),
                variables: recipients
                    .iter()
                    .filter_map(|recipient| {
                        self.variables
                            .get(recipient)
                            .map(|set| (recipient.clone(), set.clone()))
                    })
                    .collect(),
                options: self.options.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
/// A recipient-bounded subset of a [`Message`], corresponding to exactly one
/// HTTP request.
pub struct Chunk {
    recipients: Vec<RawPhoneNumber>,
    text: MessageText,
    variables: RecipientVariables,
    options: MessageOptions,
}

impl Chunk {
    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn variables(&self) -> &RecipientVariables {
        &self.variables
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(index: usize) -> RawPhoneNumber {
        RawPhoneNumber::new(format!("+39333{index:07}")).unwrap()
    }

    fn message_with(count: usize) -> Message {
        let recipients = (0..count).map(phone).collect();
        Message::new(
            recipients,
            MessageText::new("hello").unwrap(),
            MessageOptions::default(),
        )
    }

    #[test]
    fn chunk_count_is_ceil_of_recipients_over_max() {
        assert_eq!(message_with(1).chunks().len(), 1);
        assert_eq!(message_with(SEND_SMS_MAX_RECIPIENTS).chunks().len(), 1);
        assert_eq!(message_with(SEND_SMS_MAX_RECIPIENTS + 1).chunks().len(), 2);
        assert_eq!(message_with(2 * SEND_SMS_MAX_RECIPIENTS + 1).chunks().len(), 3);
    }

    #[test]
    fn chunk_concatenation_reproduces_recipient_order() {
        let message = message_with(2 * SEND_SMS_MAX_RECIPIENTS + 7);
        let chunks = message.chunks();

        let rejoined: Vec<RawPhoneNumber> = chunks
            .iter()
            .flat_map(|chunk| chunk.recipients().iter().cloned())
            .collect();
        assert_eq!(rejoined, message.recipients());

        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.recipients().len(), SEND_SMS_MAX_RECIPIENTS);
        }
        assert_eq!(chunks.last().unwrap().recipients().len(), 7);
    }

    #[test]
    fn empty_message_produces_no_chunks() {
        assert!(message_with(0).chunks().is_empty());
    }

    #[test]
    fn chunk_variables_keep_only_own_recipients() {
        let in_first = phone(0);
        let in_second = phone(SEND_SMS_MAX_RECIPIENTS);
        let absent = RawPhoneNumber::new("+491701234567").unwrap();

        let mut variables = RecipientVariables::new();
        for key in [&in_first, &in_second, &absent] {
            variables.insert(
                key.clone(),
                BTreeMap::from([("name".to_owned(), "Bob".to_owned())]),
            );
        }

        let recipients = (0..SEND_SMS_MAX_RECIPIENTS + 1).map(phone).collect();
        let message = Message::with_variables(
            recipients,
            MessageText::new("hello").unwrap(),
            variables,
            MessageOptions::default(),
        );

        let chunks = message.chunks();
        assert_eq!(chunks.len(), 2);

        assert!(chunks[0].variables().contains_key(&in_first));
        assert!(!chunks[0].variables().contains_key(&in_second));
        assert!(chunks[1].variables().contains_key(&in_second));
        assert!(!chunks[1].variables().contains_key(&in_first));
        for chunk in &chunks {
            assert!(!chunk.variables().contains_key(&absent));
        }
    }

    #[test]
    fn chunks_carry_message_options() {
        let options = MessageOptions {
            user_reference: Some(UserReference::new("order-42").unwrap()),
            delivery_start: Some("2026-08-06T10:00:00Z".parse().unwrap()),
            validity_period: Some(ValidityPeriod::new(60).unwrap()),
        };
        let message = Message::new(
            vec![phone(0)],
            MessageText::new("hello").unwrap(),
            options,
        );

        let chunks = message.chunks();
        let chunk_options = chunks[0].options();
        assert_eq!(
            chunk_options.user_reference.as_ref().map(UserReference::as_str),
            Some("order-42")
        );
        assert!(chunk_options.delivery_start.is_some());
        assert_eq!(
            chunk_options.validity_period.map(ValidityPeriod::minutes),
            Some(60)
        );
    }

    #[test]
    fn duplicate_recipients_keep_their_variables_in_each_chunk() {
        let repeated = phone(1);
        let variables = RecipientVariables::from([(
            repeated.clone(),
            BTreeMap::from([("code".to_owned(), "1234".to_owned())]),
        )]);

        let message = Message::with_variables(
            vec![repeated.clone(), repeated.clone()],
            MessageText::new("hello").unwrap(),
            variables,
            MessageOptions::default(),
        );

        let chunks = message.chunks();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].recipients().len(), 2);
        assert!(chunks[0].variables().contains_key(&repeated));
    }
}
