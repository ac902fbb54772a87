use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One step from a container to its child
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object member lookup by key
    Key(String),
    /// Array element lookup by 0-based position
    Index(usize),
}

/// Location of a value inside a JSON document, as a sequence of typed segments.
///
/// The textual form (`Display`) is the familiar dotted/indexed notation:
/// `users[0].name`. Keys are kept verbatim in the segments, so a key that
/// itself contains `.` or `[` never gets confused with nesting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    /// The empty path, pointing at the document itself
    pub fn root() -> Self {
        JsonPath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// Path to the member `key` of the object at this path
    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.push(PathSegment::Key(key.into()));
        child
    }

    /// Path to element `index` of the array at this path
    pub fn child_index(&self, index: usize) -> Self {
        let mut child = self.clone();
        child.push(PathSegment::Index(index));
        child
    }

    /// Walk this path into `document`, returning the value it points at.
    ///
    /// Returns `None` when a segment does not match the shape of the
    /// document (missing key, index out of bounds, or indexing a scalar).
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(document, |current, segment| match (segment, current) {
                (PathSegment::Key(key), Value::Object(map)) => map.get(key),
                (PathSegment::Index(idx), Value::Array(items)) => items.get(*idx),
                _ => None,
            })
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if pos == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// One generated statement: `identifier = <root><accessors>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// Sanitized variable name on the left-hand side
    pub identifier: String,

    /// Location of the leaf in the source document
    pub path: JsonPath,

    /// Right-hand side, e.g. `json_data["items"][0]`
    pub expression: String,

    /// The leaf value the expression evaluates to
    pub value: Value,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.identifier, self.expression)
    }
}

/// What to do when two paths sanitize to the same identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Append `_2`, `_3`, ... until the name is unused
    #[default]
    Disambiguate,
    /// Emit the duplicate name; later assignments shadow earlier ones
    Overwrite,
}

/// Configuration for code generation
#[derive(Debug, Clone)]
pub struct CodegenConfig {
    /// Variable the accessor chains are rooted at
    pub root_name: String,

    /// Prepended to identifiers that would otherwise start with a digit
    pub digit_prefix: String,

    /// Identifier used when the whole document is a single scalar
    pub scalar_name: String,

    /// Handling of identifiers shared by several paths
    pub collisions: CollisionPolicy,

    /// Append the leaf value as a trailing `# ...` comment
    pub value_comments: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig {
            root_name: String::from("json_data"),
            digit_prefix: String::from("v_"),
            scalar_name: String::from("root"),
            collisions: CollisionPolicy::Disambiguate,
            value_comments: false,
        }
    }
}
