use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// A field-selection request, possibly nested through link columns.
///
/// Ephemeral; constructed per API call. The JSON shape is
/// `{ "fields": ["..."] | "*", "nested": { "<link title>": { ... } } }`
/// where both keys are optional and a comma-separated string is accepted
/// for `fields`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Query {
    pub fields: FieldSelection,

    /// Sub-queries for link columns, keyed by column title.
    pub nested: IndexMap<String, Query>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldSelection {
    /// Wildcard; also the default when `fields` is omitted.
    #[default]
    All,
    /// Explicit allow-list of column titles.
    List(Vec<String>),
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn select<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query {
            fields: FieldSelection::List(fields.into_iter().map(Into::into).collect()),
            nested: IndexMap::new(),
        }
    }

    pub fn nest(mut self, title: impl Into<String>, query: Query) -> Self {
        self.nested.insert(title.into(), query);
        self
    }
}

impl FieldSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::All => None,
            Self::List(fields) => Some(fields),
        }
    }
}

impl<'de> Deserialize<'de> for FieldSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            List(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Str(s) if s == "*" => FieldSelection::All,
            Raw::Str(s) => FieldSelection::List(
                s.split(',')
                    .map(|field| field.trim().to_string())
                    .filter(|field| !field.is_empty())
                    .collect(),
            ),
            Raw::List(fields) => FieldSelection::List(fields),
        })
    }
}
