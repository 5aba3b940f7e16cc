/// Knobs shared by the hook constructors that may see query text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Attach raw query text to start and failure entries.
    pub log_query: bool,
}

impl Options {
    pub fn with_log_query(mut self) -> Self {
        self.log_query = true;
        self
    }

    /// `query` field when query logging is on.
    pub(crate) fn query_field(&self, key: &str, query: &str) -> Option<crate::field::Field> {
        self.log_query.then(|| crate::field::Field::string(key, query))
    }
}
