//! Render flattened leaves as variable assignments
//!
//! Each leaf becomes one line of the form
//!
//! ```text
//! items_0_name = json_data["items"][0]["name"]
//! ```
//!
//! Keys become double-quoted string lookups and array positions become
//! integer lookups, so the output is valid in any host language with
//! bracket indexing on a loaded document (Python being the primary target).

use crate::flatten::flatten;
use crate::sanitize::Sanitizer;
use crate::types::{Assignment, CodegenConfig, CollisionPolicy, JsonPath, PathSegment};
use serde_json::Value;
use std::collections::HashSet;

/// Python keywords; a leaf named like one would not be a legal assignment target
const RESERVED_WORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
    "yield",
];

/// Generates assignment listings from JSON documents
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    config: CodegenConfig,
    sanitizer: Sanitizer,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        CodeGenerator::new(CodegenConfig::default())
    }
}

impl CodeGenerator {
    pub fn new(config: CodegenConfig) -> Self {
        let sanitizer = Sanitizer::new(&config.digit_prefix);
        CodeGenerator { config, sanitizer }
    }

    /// Build one assignment per leaf, in document order
    pub fn assignments(&self, document: &Value) -> Vec<Assignment> {
        let flat = flatten(document);
        let mut names = NameTable::new(self.config.collisions, &self.config.root_name);
        let mut assignments = Vec::with_capacity(flat.len());

        for (path, value) in flat {
            let base = self.base_identifier(&path, &mut names);
            let identifier = names.claim(base);
            let expression = self.expression(&path);

            assignments.push(Assignment {
                identifier,
                path,
                expression,
                value,
            });
        }

        tracing::debug!(
            lines = assignments.len(),
            renamed = names.renamed,
            "generated assignments"
        );
        assignments
    }

    /// Render the full listing, one assignment per line.
    ///
    /// A document without leaves (`{}`, `[]`) renders as an empty string.
    pub fn generate(&self, document: &Value) -> String {
        self.assignments(document)
            .iter()
            .map(|assignment| self.render_line(assignment))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render a single assignment according to the configuration
    pub fn render_line(&self, assignment: &Assignment) -> String {
        let mut line = assignment.to_string();
        if self.config.value_comments {
            line.push_str(&format!("  # {}", assignment.value));
        }
        line
    }

    /// Right-hand side for `path`: root name followed by one lookup per segment
    pub fn expression(&self, path: &JsonPath) -> String {
        let mut expr = self.config.root_name.clone();
        for segment in path.segments() {
            match segment {
                PathSegment::Key(key) => {
                    // JSON string literal syntax is also a valid Python literal
                    expr.push_str(&format!("[{}]", Value::String(key.clone())));
                }
                PathSegment::Index(idx) => {
                    expr.push_str(&format!("[{}]", idx));
                }
            }
        }
        expr
    }

    fn base_identifier(&self, path: &JsonPath, names: &mut NameTable) -> String {
        if path.is_root() {
            return self
                .sanitizer
                .sanitize(&self.config.scalar_name)
                .unwrap_or_else(|| String::from("root"));
        }

        match self.sanitizer.sanitize(&path.to_string()) {
            Some(ident) => ident,
            None => names.anonymous(self.sanitizer.digit_prefix()),
        }
    }
}

/// Identifiers handed out so far within one listing
struct NameTable {
    policy: CollisionPolicy,
    taken: HashSet<String>,
    anonymous: usize,
    renamed: usize,
}

impl NameTable {
    /// Under `Disambiguate` the root variable and host keywords start out taken,
    /// so no leaf can rebind the root or use a keyword as its name
    fn new(policy: CollisionPolicy, root_name: &str) -> Self {
        let mut taken = HashSet::new();
        if policy == CollisionPolicy::Disambiguate {
            taken.insert(root_name.to_string());
            taken.extend(RESERVED_WORDS.iter().map(|word| word.to_string()));
        }
        NameTable {
            policy,
            taken,
            anonymous: 0,
            renamed: 0,
        }
    }

    /// Name for a path with no usable characters: `v_0`, `v_1`, ...
    fn anonymous(&mut self, prefix: &str) -> String {
        let name = format!("{}{}", prefix, self.anonymous);
        self.anonymous += 1;
        name
    }

    /// Reserve `base`, or a suffixed variant of it if already taken
    fn claim(&mut self, base: String) -> String {
        if self.policy == CollisionPolicy::Overwrite || !self.taken.contains(&base) {
            self.taken.insert(base.clone());
            return base;
        }

        let mut suffix = 2usize;
        let name = loop {
            let candidate = format!("{}_{}", base, suffix);
            if !self.taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };

        tracing::debug!(identifier = %name, "renamed colliding identifier");
        self.renamed += 1;
        self.taken.insert(name.clone());
        name
    }
}

/// Generate a listing for `document` with the default configuration
pub fn generate(document: &Value) -> String {
    CodeGenerator::default().generate(document)
}
