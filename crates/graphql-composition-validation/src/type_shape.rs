use crate::schema::TypeReference;

/// Can the two types be merged into one? Nullability, at any depth, is ignored. The list
/// nesting and the named type must be identical.
///
/// ```graphql,ignore
/// [String!]  ~  [String]!  ~  [String]
/// String     ≁  DateTime
/// [String]   ≁  String
/// ```
pub fn shapes_match(a: &TypeReference, b: &TypeReference) -> bool {
    match (strip_non_null(a), strip_non_null(b)) {
        (TypeReference::Named(a), TypeReference::Named(b)) => a == b,
        (TypeReference::List(a), TypeReference::List(b)) => shapes_match(a, b),
        _ => false,
    }
}

fn strip_non_null(ty: &TypeReference) -> &TypeReference {
    match ty {
        TypeReference::NonNull(inner) => strip_non_null(inner),
        other => other,
    }
}
