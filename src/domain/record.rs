use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecordId {
    pub id: String,
}

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// The kinds of work item a forecast can be requested for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Record {
    Feature(RecordId),
    Requirement(RecordId),
    Epic(RecordId),
}

impl Record {
    pub fn id(&self) -> &RecordId {
        match self {
            Record::Feature(id) | Record::Requirement(id) | Record::Epic(id) => id,
        }
    }

    /// Plural path segment used by HTTP data sources.
    pub fn collection_name(&self) -> &'static str {
        match self {
            Record::Feature(_) => "features",
            Record::Requirement(_) => "requirements",
            Record::Epic(_) => "epics",
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id().fmt(f)
    }
}
