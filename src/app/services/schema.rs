//! Record schema declarations
//!
//! A [`Schema`] is an ordered list of field descriptors for a record type `R`.
//! Every descriptor carries a getter/setter pair, so the decoder never looks
//! fields up by name at runtime. Schemas are declared with [`FieldSpec`]s whose
//! tags keep the familiar meaning:
//!
//! - binding tag: a regular expression matched against header text; `"-"`
//!   means "match the field identifier"
//! - format tag: one of `tc`, `uc`, `lc`, `fp`, `ss`, or `"-"` for raw
//!   assignment (which is not the same as declaring no format at all)
//!
//! ```rust
//! use csvparse::{FieldRole, FieldSpec, Schema};
//!
//! #[derive(Default)]
//! struct Lead {
//!     name: String,
//!     phone: String,
//! }
//!
//! let schema = Schema::builder()
//!     .field(
//!         FieldSpec::<Lead>::text("Name", |r| r.name.as_str(), |r, v| r.name = v)
//!             .binding("(?i)name")
//!             .format("tc")
//!             .role(FieldRole::FullName),
//!     )
//!     .field(
//!         FieldSpec::<Lead>::text("Phone", |r| r.phone.as_str(), |r, v| r.phone = v)
//!             .format("fp"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.len(), 2);
//! ```

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::field_formatter::FormatDirective;
use crate::app::models::Timestamp;
use crate::config::AnnotationPolicy;
use crate::constants::DEFAULT_TAG;
use crate::{Error, Result};

/// Reads a text field
pub type TextGetter<R> = fn(&R) -> &str;
/// Writes a text field
pub type TextSetter<R> = fn(&mut R, String);
/// Reads a temporal field
pub type TimestampGetter<R> = fn(&R) -> Timestamp;
/// Writes a temporal field
pub type TimestampSetter<R> = fn(&mut R, Timestamp);

/// Types that can be decoded from CSV rows
pub trait CsvRecord: Default + Sized {
    /// Declare the schema for this record type
    ///
    /// Errors (bad patterns, unknown directives) fail the decode call that
    /// asked for the schema.
    fn schema() -> Result<Schema<Self>>;
}

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Temporal,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => f.write_str("text"),
            FieldKind::Temporal => f.write_str("temporal"),
        }
    }
}

/// Part a field plays in cross-field post-processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Full name, split into first/middle/last when those are empty
    FullName,
    FirstName,
    MiddleName,
    LastName,
    /// ZIP code, normalized to its 5-digit part
    PostalCode,
    /// ZIP+4 extension, overwritten only when already present
    PlusFour,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldRole::FullName => "full_name",
            FieldRole::FirstName => "first_name",
            FieldRole::MiddleName => "middle_name",
            FieldRole::LastName => "last_name",
            FieldRole::PostalCode => "postal_code",
            FieldRole::PlusFour => "plus_four",
        };
        f.write_str(name)
    }
}

/// Getter/setter pair for one field; the variant is the field's semantic type
pub enum FieldAccessor<R> {
    Text {
        get: TextGetter<R>,
        set: TextSetter<R>,
    },
    Temporal {
        get: TimestampGetter<R>,
        set: TimestampSetter<R>,
    },
}

impl<R> FieldAccessor<R> {
    /// Semantic type of the accessed field
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldAccessor::Text { .. } => FieldKind::Text,
            FieldAccessor::Temporal { .. } => FieldKind::Temporal,
        }
    }
}

/// Field declaration as written by the schema author, validated by [`SchemaBuilder::build`]
pub struct FieldSpec<R> {
    id: String,
    accessor: FieldAccessor<R>,
    binding: Option<String>,
    format: Option<String>,
    role: Option<FieldRole>,
}

impl<R> FieldSpec<R> {
    /// Declare a text field
    pub fn text(id: impl Into<String>, get: TextGetter<R>, set: TextSetter<R>) -> Self {
        Self::new(id.into(), FieldAccessor::Text { get, set })
    }

    /// Declare a temporal field
    pub fn temporal(
        id: impl Into<String>,
        get: TimestampGetter<R>,
        set: TimestampSetter<R>,
    ) -> Self {
        Self::new(id.into(), FieldAccessor::Temporal { get, set })
    }

    fn new(id: String, accessor: FieldAccessor<R>) -> Self {
        Self {
            id,
            accessor,
            binding: None,
            format: None,
            role: None,
        }
    }

    /// Set the binding tag (header regex, or `"-"` for the field identifier)
    pub fn binding(mut self, tag: impl Into<String>) -> Self {
        self.binding = Some(tag.into());
        self
    }

    /// Set the format tag (directive token, or `"-"` for raw assignment)
    pub fn format(mut self, tag: impl Into<String>) -> Self {
        self.format = Some(tag.into());
        self
    }

    /// Mark the field for cross-field post-processing
    pub fn role(mut self, role: FieldRole) -> Self {
        self.role = Some(role);
        self
    }

    fn compile(self) -> Result<FieldDescriptor<R>> {
        let pattern = match self.binding.as_deref() {
            None | Some(DEFAULT_TAG) => regex::escape(&self.id),
            Some(tag) => tag.to_string(),
        };
        let matcher = Regex::new(&pattern)
            .map_err(|e| Error::invalid_pattern(&self.id, &pattern, e))?;

        let directive = self
            .format
            .as_deref()
            .map(str::parse::<FormatDirective>)
            .transpose()?;

        if directive.is_some() && self.accessor.kind() == FieldKind::Temporal {
            return Err(Error::schema(format!(
                "temporal field '{}' cannot declare a format directive",
                self.id
            )));
        }

        Ok(FieldDescriptor {
            id: self.id,
            accessor: self.accessor,
            matcher,
            explicit_binding: self.binding.is_some(),
            directive,
            role: self.role,
        })
    }
}

/// Validated field descriptor
pub struct FieldDescriptor<R> {
    id: String,
    accessor: FieldAccessor<R>,
    matcher: Regex,
    explicit_binding: bool,
    directive: Option<FormatDirective>,
    role: Option<FieldRole>,
}

impl<R> FieldDescriptor<R> {
    /// Field identifier, unique within the schema
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Semantic type
    pub fn kind(&self) -> FieldKind {
        self.accessor.kind()
    }

    /// Getter/setter pair
    pub fn accessor(&self) -> &FieldAccessor<R> {
        &self.accessor
    }

    /// Compiled binding pattern
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// Declared format directive, `None` when the field has no format tag
    pub fn directive(&self) -> Option<FormatDirective> {
        self.directive
    }

    /// Cross-field role, if any
    pub fn role(&self) -> Option<FieldRole> {
        self.role
    }

    /// Whether a header cell selects this field
    pub fn matches_header(&self, header: &str) -> bool {
        self.matcher.is_match(header)
    }

    /// Whether the field takes part in header binding under `policy`
    ///
    /// Under [`AnnotationPolicy::Strict`] text fields need a format tag and
    /// temporal fields need a binding tag.
    pub fn participates(&self, policy: AnnotationPolicy) -> bool {
        match policy {
            AnnotationPolicy::PassThrough => true,
            AnnotationPolicy::Strict => match self.kind() {
                FieldKind::Text => self.directive.is_some(),
                FieldKind::Temporal => self.explicit_binding,
            },
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("pattern", &self.pattern())
            .field("directive", &self.directive)
            .field("role", &self.role)
            .finish()
    }
}

/// Ordered, validated field descriptors for record type `R`
pub struct Schema<R> {
    fields: Vec<FieldDescriptor<R>>,
    roles: HashMap<FieldRole, usize>,
}

impl<R> Schema<R> {
    /// Start declaring a schema
    pub fn builder() -> SchemaBuilder<R> {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Descriptors in declaration order
    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    /// Look up a descriptor by identifier
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor<R>> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a built schema
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptor holding `role`, if the schema declares one
    pub fn role_field(&self, role: FieldRole) -> Option<&FieldDescriptor<R>> {
        self.roles.get(&role).map(|&index| &self.fields[index])
    }

    /// Current value of the text field holding `role`
    pub fn role_text<'a>(&self, record: &'a R, role: FieldRole) -> Option<&'a str> {
        match self.role_field(role)?.accessor {
            FieldAccessor::Text { get, .. } => Some(get(record)),
            FieldAccessor::Temporal { .. } => None,
        }
    }

    /// Overwrite the text field holding `role`; returns false when the schema has no such field
    pub fn set_role_text(&self, record: &mut R, role: FieldRole, value: String) -> bool {
        match self.role_field(role).map(|field| &field.accessor) {
            Some(FieldAccessor::Text { set, .. }) => {
                set(record, value);
                true
            }
            _ => false,
        }
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields)
            .finish()
    }
}

/// Collects [`FieldSpec`]s and validates them into a [`Schema`]
pub struct SchemaBuilder<R> {
    fields: Vec<FieldSpec<R>>,
}

impl<R> SchemaBuilder<R> {
    /// Append a field; declaration order is binding and materialization order
    pub fn field(mut self, spec: FieldSpec<R>) -> Self {
        self.fields.push(spec);
        self
    }

    /// Validate the declarations and compile patterns and directives
    pub fn build(self) -> Result<Schema<R>> {
        if self.fields.is_empty() {
            return Err(Error::schema("schema declares no fields"));
        }

        let mut fields: Vec<FieldDescriptor<R>> = Vec::with_capacity(self.fields.len());
        let mut roles = HashMap::new();

        for spec in self.fields {
            if fields.iter().any(|field| field.id == spec.id) {
                return Err(Error::schema(format!(
                    "field identifier '{}' declared more than once",
                    spec.id
                )));
            }

            let descriptor = spec.compile()?;

            if let Some(role) = descriptor.role {
                if descriptor.kind() != FieldKind::Text {
                    return Err(Error::schema(format!(
                        "role {} requires a text field, '{}' is temporal",
                        role, descriptor.id
                    )));
                }
                if roles.insert(role, fields.len()).is_some() {
                    return Err(Error::schema(format!(
                        "role {} assigned to more than one field",
                        role
                    )));
                }
            }

            fields.push(descriptor);
        }

        Ok(Schema { fields, roles })
    }
}
