//! Names reserved by the GraphQL specification.

pub(crate) const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

pub(crate) const BUILTIN_DIRECTIVES: [&str; 4] = ["skip", "include", "deprecated", "specifiedBy"];

pub(crate) const INTROSPECTION_TYPES: [&str; 8] = [
    "__Schema",
    "__Type",
    "__TypeKind",
    "__Field",
    "__InputValue",
    "__EnumValue",
    "__Directive",
    "__DirectiveLocation",
];

/// Meta-fields available on root or every composite type.
const INTROSPECTION_FIELDS: [&str; 3] = ["__schema", "__type", "__typename"];

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

pub fn is_builtin_directive(name: &str) -> bool {
    BUILTIN_DIRECTIVES.contains(&name)
}

/// The introspection types, plus the built-in scalars they are built on.
pub fn is_introspection_type(name: &str) -> bool {
    INTROSPECTION_TYPES.contains(&name) || is_builtin_scalar(name)
}

/// Fields of introspection types and the `__schema`/`__type`/`__typename` meta-fields.
pub fn is_introspection_field(type_name: &str, field_name: &str) -> bool {
    INTROSPECTION_TYPES.contains(&type_name) || INTROSPECTION_FIELDS.contains(&field_name)
}
