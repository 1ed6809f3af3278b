//! Platform-neutral rendering of an event.

/// Structured content of a published event message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDocument {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<DocumentField>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl DisplayDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
            footer: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(DocumentField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}
