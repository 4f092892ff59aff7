//! In-memory model of one source schema.
//!
//! Types reference each other by name only. Resolving a reference always goes through the owning
//! [SchemaDefinition].

mod builtins;
mod directives;
mod type_reference;
mod value;

pub use self::{
    builtins::{is_builtin_directive, is_builtin_scalar, is_introspection_field, is_introspection_type},
    directives::{DirectiveApplication, Directives, HasDirectives},
    type_reference::TypeReference,
    value::Value,
};

use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// One source schema (subgraph) participating in composition.
#[derive(Debug, Clone, Default)]
pub struct SchemaDefinition {
    /// The display name used in diagnostics. Assigned by the composition context when not
    /// explicitly given.
    pub(crate) name: Option<String>,
    pub(crate) root_operation_types: RootOperationTypes,
    pub(crate) types: IndexMap<String, TypeDefinition>,
    pub(crate) directive_definitions: IndexMap<String, DirectiveDefinition>,
}

/// The names of the root operation types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootOperationTypes {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl SchemaDefinition {
    /// Parse SDL into a schema. See [crate::ingest].
    pub fn parse(sdl: &str) -> Result<Self, crate::IngestError> {
        crate::ingest::ingest_schema(sdl)
    }

    /// Give the schema an explicit display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn root_operation_types(&self) -> &RootOperationTypes {
        &self.root_operation_types
    }

    /// The query root type, if the schema has one.
    pub fn query_type(&self) -> Option<&TypeDefinition> {
        self.root_operation_types
            .query
            .as_deref()
            .and_then(|name| self.type_by_name(name))
    }

    /// Resolve a type by name. Absence is not an error, callers decide how to report it.
    pub fn type_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// All type definitions, in source order.
    pub fn types(&self) -> impl ExactSizeIterator<Item = &TypeDefinition> {
        self.types.values()
    }

    pub fn directive_definitions(&self) -> impl ExactSizeIterator<Item = &DirectiveDefinition> {
        self.directive_definitions.values()
    }

    /// Insert or replace a type definition.
    pub fn insert_type(&mut self, definition: TypeDefinition) {
        self.types.insert(definition.name.clone(), definition);
    }

    pub fn set_root_operation_types(&mut self, root_operation_types: RootOperationTypes) {
        self.root_operation_types = root_operation_types;
    }
}

/// A named type in a source schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub directives: Directives,
    pub body: TypeBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeBody {
    Scalar,
    Object(CompositeBody),
    Interface(CompositeBody),
    /// Member type names.
    Union(IndexSet<String>),
    Enum(Vec<EnumValueDefinition>),
    InputObject(IndexMap<String, InputValueDefinition>),
}

/// Fields and implemented interfaces of an object or interface type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeBody {
    pub fields: IndexMap<String, FieldDefinition>,
    pub implements: IndexSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DefinitionKind::Scalar => "scalar",
            DefinitionKind::Object => "object",
            DefinitionKind::Interface => "interface",
            DefinitionKind::Union => "union",
            DefinitionKind::Enum => "enum",
            DefinitionKind::InputObject => "input object",
        })
    }
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, body: TypeBody) -> Self {
        TypeDefinition {
            name: name.into(),
            description: None,
            directives: Directives::default(),
            body,
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        match self.body {
            TypeBody::Scalar => DefinitionKind::Scalar,
            TypeBody::Object(_) => DefinitionKind::Object,
            TypeBody::Interface(_) => DefinitionKind::Interface,
            TypeBody::Union(_) => DefinitionKind::Union,
            TypeBody::Enum(_) => DefinitionKind::Enum,
            TypeBody::InputObject(_) => DefinitionKind::InputObject,
        }
    }

    /// Objects, interfaces and unions: the types a selection set can be applied to.
    pub fn is_composite(&self) -> bool {
        matches!(
            self.kind(),
            DefinitionKind::Object | DefinitionKind::Interface | DefinitionKind::Union
        )
    }

    /// Output fields of an object or interface type. Empty for other kinds.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        let fields = match &self.body {
            TypeBody::Object(body) | TypeBody::Interface(body) => Some(body.fields.values()),
            _ => None,
        };

        fields.into_iter().flatten()
    }

    /// Resolve an output field on an object or interface type.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        match &self.body {
            TypeBody::Object(body) | TypeBody::Interface(body) => body.fields.get(name),
            _ => None,
        }
    }

    /// Fields of an input object type. Empty for other kinds.
    pub fn input_fields(&self) -> impl Iterator<Item = &InputValueDefinition> {
        let fields = match &self.body {
            TypeBody::InputObject(fields) => Some(fields.values()),
            _ => None,
        };

        fields.into_iter().flatten()
    }

    pub fn input_field_by_name(&self, name: &str) -> Option<&InputValueDefinition> {
        match &self.body {
            TypeBody::InputObject(fields) => fields.get(name),
            _ => None,
        }
    }

    pub fn enum_values(&self) -> &[EnumValueDefinition] {
        match &self.body {
            TypeBody::Enum(values) => values,
            _ => &[],
        }
    }

    pub fn implements_interface(&self, interface_name: &str) -> bool {
        match &self.body {
            TypeBody::Object(body) | TypeBody::Interface(body) => body.implements.contains(interface_name),
            _ => false,
        }
    }

    pub fn has_union_member(&self, member_name: &str) -> bool {
        match &self.body {
            TypeBody::Union(members) => members.contains(member_name),
            _ => false,
        }
    }
}

impl HasDirectives for TypeDefinition {
    fn directives(&self) -> &Directives {
        &self.directives
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    /// ```graphql,ignore
    /// type Query {
    ///   findManyUser(filters: FindManyUserFilter!): [User!]!
    ///                                               ^^^^^^^^
    /// }
    /// ```
    pub ty: TypeReference,
    pub arguments: IndexMap<String, InputValueDefinition>,
    pub directives: Directives,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        FieldDefinition {
            name: name.into(),
            description: None,
            ty,
            arguments: IndexMap::new(),
            directives: Directives::default(),
        }
    }

    pub fn argument_by_name(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments.get(name)
    }
}

impl HasDirectives for FieldDefinition {
    fn directives(&self) -> &Directives {
        &self.directives
    }
}

/// An argument on an output field, an input object field or a directive argument.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeReference,
    pub default_value: Option<Value>,
    pub directives: Directives,
}

pub type ArgumentDefinition = InputValueDefinition;
pub type InputFieldDefinition = InputValueDefinition;

impl InputValueDefinition {
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        InputValueDefinition {
            name: name.into(),
            description: None,
            ty,
            default_value: None,
            directives: Directives::default(),
        }
    }

    /// Non-null without a default value: must always be provided.
    pub fn is_required(&self) -> bool {
        self.ty.is_required() && self.default_value.is_none()
    }
}

impl HasDirectives for InputValueDefinition {
    fn directives(&self) -> &Directives {
        &self.directives
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub directives: Directives,
}

impl HasDirectives for EnumValueDefinition {
    fn directives(&self) -> &Directives {
        &self.directives
    }
}

/// A `directive @name(...) on ...` definition. Only the arguments matter for validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub name: String,
    pub arguments: IndexMap<String, InputValueDefinition>,
}
