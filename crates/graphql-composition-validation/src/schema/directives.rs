use super::Value;
use indexmap::IndexMap;

/// A directive applied to a schema element.
///
/// ```graphql,ignore
/// type Product @key(fields: "id") {
///              ^^^^^^^^^^^^^^^^^^
///   id: ID!
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveApplication {
    pub name: String,
    pub arguments: IndexMap<String, Value>,
}

impl DirectiveApplication {
    pub fn new(name: impl Into<String>) -> Self {
        DirectiveApplication {
            name: name.into(),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: Value) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }
}

/// The directives applied to one schema element, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives(Vec<DirectiveApplication>);

impl Directives {
    pub fn iter(&self) -> std::slice::Iter<'_, DirectiveApplication> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All the applications of a (possibly repeatable) directive.
    pub fn iter_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a DirectiveApplication> + 'n
    where
        'a: 'n,
    {
        self.0.iter().filter(move |directive| directive.name == name)
    }

    /// The first application of the directive with that name.
    pub fn get(&self, name: &str) -> Option<&DirectiveApplication> {
        self.0.iter().find(|directive| directive.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn inaccessible(&self) -> bool {
        self.contains("inaccessible")
    }

    pub fn internal(&self) -> bool {
        self.contains("internal")
    }

    pub fn external(&self) -> bool {
        self.contains("external")
    }

    pub fn lookup(&self) -> bool {
        self.contains("lookup")
    }

    pub fn keys(&self) -> impl Iterator<Item = &DirectiveApplication> {
        self.iter_named("key")
    }

    pub fn provides(&self) -> Option<&DirectiveApplication> {
        self.get("provides")
    }

    pub fn requires(&self) -> Option<&DirectiveApplication> {
        self.get("requires")
    }

    /// ```graphql,ignore
    /// type Query {
    ///   getRandomMammoth: Mammoth @override(from: "steppe")
    ///                             ^^^^^^^^^^^^^^^^^^^^^^^^^
    /// }
    /// ```
    pub fn r#override(&self) -> Option<&str> {
        self.get("override")
            .and_then(|directive| directive.argument("from"))
            .and_then(Value::as_str)
    }

    pub(crate) fn push(&mut self, directive: DirectiveApplication) {
        self.0.push(directive);
    }
}

impl From<Vec<DirectiveApplication>> for Directives {
    fn from(directives: Vec<DirectiveApplication>) -> Self {
        Directives(directives)
    }
}

impl<'a> IntoIterator for &'a Directives {
    type Item = &'a DirectiveApplication;
    type IntoIter = std::slice::Iter<'a, DirectiveApplication>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Schema elements that can carry directives.
pub trait HasDirectives {
    fn directives(&self) -> &Directives;

    /// Is the element part of the composed, externally visible schema? `@inaccessible` and
    /// `@internal` both hide an element.
    fn is_accessible(&self) -> bool {
        let directives = self.directives();
        !directives.inaccessible() && !directives.internal()
    }
}
