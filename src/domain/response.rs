/// Raw gateway reply for one sent chunk.
///
/// The gateway answers with a small line-oriented text protocol that is not
/// modeled by this crate; the body is exposed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResponse {
    body: String,
}

impl SendResponse {
    pub(crate) fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Borrow the raw response body.
    pub fn raw(&self) -> &str {
        &self.body
    }

    /// Consume the response and take the raw body.
    pub fn into_raw(self) -> String {
        self.body
    }
}
