use std::fmt;

/// The type of a field, argument or input field.
///
/// ```graphql,ignore
/// type MyObject {
///   nested: [Nested!]!
///           ^^^^^^^^^^
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeReference {
    Named(String),
    List(Box<TypeReference>),
    NonNull(Box<TypeReference>),
}

impl TypeReference {
    pub fn named(name: impl Into<String>) -> Self {
        TypeReference::Named(name.into())
    }

    pub fn list(inner: TypeReference) -> Self {
        TypeReference::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeReference) -> Self {
        TypeReference::NonNull(Box::new(inner))
    }

    /// The innermost named type.
    ///
    /// ```graphql,ignore
    /// nested: [Nested!]!
    ///          ^^^^^^
    /// ```
    pub fn named_type(&self) -> &str {
        match self {
            TypeReference::Named(name) => name,
            TypeReference::List(inner) | TypeReference::NonNull(inner) => inner.named_type(),
        }
    }

    /// Is the outermost wrapper a non-null?
    pub fn is_required(&self) -> bool {
        matches!(self, TypeReference::NonNull(_))
    }

    /// Strips the outer non-null wrappers, but not lists.
    pub fn nullable(&self) -> &TypeReference {
        match self {
            TypeReference::NonNull(inner) => inner.nullable(),
            other => other,
        }
    }

    /// Is there a list wrapper at any depth?
    pub fn is_list(&self) -> bool {
        match self {
            TypeReference::Named(_) => false,
            TypeReference::List(_) => true,
            TypeReference::NonNull(inner) => inner.is_list(),
        }
    }

    /// Number of list wrappers, ignoring nullability.
    pub fn list_depth(&self) -> usize {
        match self {
            TypeReference::Named(_) => 0,
            TypeReference::List(inner) => 1 + inner.list_depth(),
            TypeReference::NonNull(inner) => inner.list_depth(),
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeReference::Named(name) => f.write_str(name),
            TypeReference::List(inner) => write!(f, "[{inner}]"),
            TypeReference::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
