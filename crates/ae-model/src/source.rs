/// One raw source row: an ordered list of `(field name, value)` pairs.
///
/// Source exports carry no fixed schema, so access is by name with an
/// explicit empty default rather than by position. Field names are matched
/// case-insensitively because export headers vary between sites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRow {
    fields: Vec<(String, String)>,
}

impl SourceRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        SourceRow { fields }
    }

    /// Value of the named field, or `""` when the field is absent.
    pub fn get(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// True when the field exists and holds a non-empty value.
    pub fn has_value(&self, name: &str) -> bool {
        !self.get(name).trim().is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
