//! # json-vars - JSON to variable assignments
//!
//! Converts a JSON document into a flat listing of assignment statements,
//! one per leaf value, each reproducing the access path to that value:
//!
//! ```text
//! user_name = json_data["user"]["name"]
//! user_tags_0 = json_data["user"]["tags"][0]
//! ```
//!
//! ## Modules
//!
//! - **flatten**: walk a document into an ordered map of leaf paths
//! - **sanitize**: turn a path into a legal, lowercase identifier
//! - **codegen**: pair identifiers with accessor chains and render the listing
//!
//! ## Quick Start
//!
//! ```rust
//! # fn main() -> Result<(), json_vars::Error> {
//! let code = json_vars::generate_code(r#"{"a": 1, "b": {"c": 2}}"#)?;
//!
//! assert_eq!(code, "a = json_data[\"a\"]\nb_c = json_data[\"b\"][\"c\"]");
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom configuration
//!
//! ```rust
//! use json_vars::{CodeGenerator, CodegenConfig};
//! use serde_json::json;
//!
//! let config = CodegenConfig {
//!     root_name: String::from("payload"),
//!     ..CodegenConfig::default()
//! };
//! let generator = CodeGenerator::new(config);
//!
//! let code = generator.generate(&json!({"items": [10, 20]}));
//! assert_eq!(code, "items_0 = payload[\"items\"][0]\nitems_1 = payload[\"items\"][1]");
//! ```

use serde_json::Value;

pub mod codegen;
pub mod error;
pub mod flatten;
pub mod logging;
pub mod sanitize;
pub mod types;

// Re-export commonly used types for convenience
pub use codegen::{generate, CodeGenerator};
pub use error::{Error, Result};
pub use flatten::{flatten, flatten_with_prefix, FlatMap};
pub use sanitize::{sanitize_identifier, Sanitizer};
pub use types::{Assignment, CodegenConfig, CollisionPolicy, JsonPath, PathSegment};

/// Parse raw JSON text into a document.
///
/// Whitespace-only input is reported as [`Error::EmptyInput`] rather than a
/// parse failure, so callers can show a prompt instead of an error.
pub fn parse_document(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let value = serde_json::from_str(text)?;
    Ok(value)
}

/// Main entry point: parse `text` and render its assignment listing
pub fn generate_code(text: &str) -> Result<String> {
    generate_code_with(text, &CodegenConfig::default())
}

/// Like [`generate_code`], with an explicit configuration
pub fn generate_code_with(text: &str, config: &CodegenConfig) -> Result<String> {
    let document = parse_document(text)?;
    Ok(CodeGenerator::new(config.clone()).generate(&document))
}
