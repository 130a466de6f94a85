//! Query definitions from TOML (`[queries.<name>]` sections)
//!
//! ```toml
//! [queries.createUser]
//! validators = [{ kind = "non_empty", pointer = "/name", message = "name required" }]
//!
//! [queries.createUser.config]
//! name = { "$param" = 0 }
//! source = "cli"
//! ```
//!
//! Inside `config`, a table with exactly one `$`-prefixed key is a marker:
//!
//! | marker                 | becomes                                    |
//! |------------------------|--------------------------------------------|
//! | `{ "$param" = N }`     | the N-th invocation parameter              |
//! | `{ "$params" = true }` | all invocation parameters as an array      |
//! | `{ "$env" = "NAME" }`  | environment variable, read per invocation  |
//! | `{ "$literal" = ... }` | the value verbatim, markers not expanded   |

use super::super::error::ConfigLoadError;
use crate::builtins::{
    AllParamsResolver, EnvResolver, NonEmptyValidator, ParamCountValidator, ParamResolver,
    PatternValidator, RequiredValidator,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use switchboard_domain::{ConfigNode, QueryDefinition, Validator, escape_pointer};

const MARKER_PREFIX: char = '$';

/// Raw query configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueryConfig {
    /// Free-form description shown by `switchboard list`
    pub description: Option<String>,
    /// Validators, in the order their failures are reported
    pub validators: Vec<FileValidatorConfig>,
    /// Configuration tree resolved per invocation
    pub config: Value,
}

/// Built-in validator selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileValidatorConfig {
    NonEmpty {
        pointer: String,
        message: Option<String>,
    },
    Required {
        pointers: Vec<String>,
        message: Option<String>,
    },
    Matches {
        pointer: String,
        pattern: String,
        message: Option<String>,
    },
    ParamCount {
        min: usize,
        message: Option<String>,
    },
}

impl FileQueryConfig {
    /// Build the domain definition for the query registered as `query`
    pub fn to_definition(&self, query: &str) -> Result<QueryDefinition, ConfigLoadError> {
        let config = config_node(query, &self.config, String::new())?;
        let validators = self
            .validators
            .iter()
            .map(|validator| validator.to_validator(query))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QueryDefinition::with_validators(validators, config))
    }
}

impl FileValidatorConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            FileValidatorConfig::NonEmpty { .. } => "non_empty",
            FileValidatorConfig::Required { .. } => "required",
            FileValidatorConfig::Matches { .. } => "matches",
            FileValidatorConfig::ParamCount { .. } => "param_count",
        }
    }

    fn to_validator(&self, query: &str) -> Result<Arc<dyn Validator>, ConfigLoadError> {
        let validator: Arc<dyn Validator> = match self {
            FileValidatorConfig::NonEmpty { pointer, message } => {
                check_pointer(query, pointer)?;
                Arc::new(NonEmptyValidator::new(pointer.clone(), message.clone()))
            }
            FileValidatorConfig::Required { pointers, message } => {
                for pointer in pointers {
                    check_pointer(query, pointer)?;
                }
                Arc::new(RequiredValidator::new(pointers.clone(), message.clone()))
            }
            FileValidatorConfig::Matches {
                pointer,
                pattern,
                message,
            } => {
                check_pointer(query, pointer)?;
                let pattern =
                    Regex::new(pattern).map_err(|source| ConfigLoadError::InvalidPattern {
                        query: query.to_string(),
                        source,
                    })?;
                Arc::new(PatternValidator::new(pointer.clone(), pattern, message.clone()))
            }
            FileValidatorConfig::ParamCount { min, message } => {
                Arc::new(ParamCountValidator::new(*min, message.clone()))
            }
        };
        Ok(validator)
    }
}

fn check_pointer(query: &str, pointer: &str) -> Result<(), ConfigLoadError> {
    if pointer.is_empty() || pointer.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigLoadError::InvalidPointer {
            query: query.to_string(),
            pointer: pointer.to_string(),
        })
    }
}

/// Classify a raw TOML value into a configuration node, expanding markers
fn config_node(query: &str, value: &Value, path: String) -> Result<ConfigNode, ConfigLoadError> {
    match value {
        Value::Object(map) => {
            if let Some((marker, argument)) = single_marker(map) {
                return marker_node(query, marker, argument, &path);
            }
            if let Some(key) = map.keys().find(|key| key.starts_with(MARKER_PREFIX)) {
                return Err(invalid_marker(
                    query,
                    &path,
                    format!("\"{}\" must be the only key of its table", key),
                ));
            }

            let entries = map
                .iter()
                .map(|(key, child)| {
                    let node =
                        config_node(query, child, format!("{}/{}", path, escape_pointer(key)))?;
                    Ok((key.clone(), node))
                })
                .collect::<Result<Vec<_>, ConfigLoadError>>()?;
            Ok(ConfigNode::object(entries))
        }
        Value::Array(items) => {
            let nodes = items
                .iter()
                .enumerate()
                .map(|(index, child)| config_node(query, child, format!("{}/{}", path, index)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ConfigNode::List(nodes))
        }
        other => Ok(ConfigNode::Literal(other.clone())),
    }
}

fn single_marker(map: &Map<String, Value>) -> Option<(&str, &Value)> {
    if map.len() != 1 {
        return None;
    }
    map.iter()
        .next()
        .filter(|(key, _)| key.starts_with(MARKER_PREFIX))
        .map(|(key, value)| (key.as_str(), value))
}

fn marker_node(
    query: &str,
    marker: &str,
    argument: &Value,
    path: &str,
) -> Result<ConfigNode, ConfigLoadError> {
    match marker {
        "$param" => argument
            .as_u64()
            .and_then(|index| usize::try_from(index).ok())
            .map(|index| ConfigNode::resolver(ParamResolver::new(index)))
            .ok_or_else(|| invalid_marker(query, path, "$param expects a non-negative integer")),
        "$params" => match argument {
            Value::Bool(true) => Ok(ConfigNode::resolver(AllParamsResolver)),
            _ => Err(invalid_marker(query, path, "$params expects `true`")),
        },
        "$env" => argument
            .as_str()
            .filter(|name| !name.is_empty())
            .map(|name| ConfigNode::resolver(EnvResolver::new(name)))
            .ok_or_else(|| invalid_marker(query, path, "$env expects a variable name")),
        "$literal" => Ok(ConfigNode::Literal(argument.clone())),
        other => Err(invalid_marker(
            query,
            path,
            format!("unknown marker \"{}\"", other),
        )),
    }
}

fn invalid_marker(query: &str, path: &str, message: impl Into<String>) -> ConfigLoadError {
    ConfigLoadError::InvalidMarker {
        query: query.to_string(),
        path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use switchboard_application::ConfigResolver;
    use switchboard_domain::InvocationParams;

    fn query_config(config: Value) -> FileQueryConfig {
        FileQueryConfig {
            config,
            ..FileQueryConfig::default()
        }
    }

    async fn resolve(config: Value, params: Vec<Value>) -> Value {
        let definition = query_config(config).to_definition("q").unwrap();
        ConfigResolver::new()
            .resolve(definition.config(), &InvocationParams::new(params))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_markers_become_resolvers() {
        let resolved = resolve(
            json!({
                "name": {"$param": 0},
                "all": {"$params": true},
                "tags": [{"$param": 1}, "static"],
                "raw": {"$literal": {"$param": 5}}
            }),
            vec![json!("Alice"), json!("admin")],
        )
        .await;

        assert_eq!(
            resolved,
            json!({
                "name": "Alice",
                "all": ["Alice", "admin"],
                "tags": ["admin", "static"],
                "raw": {"$param": 5}
            })
        );
    }

    #[test]
    fn test_plain_values_stay_literal() {
        let definition = query_config(json!({"a": {"b": [1, true]}}))
            .to_definition("q")
            .unwrap();
        assert!(definition.config().is_static());
        assert!(definition.validators().is_empty());
    }

    #[test]
    fn test_unknown_marker_rejected() {
        let error = query_config(json!({"x": {"$nope": 1}}))
            .to_definition("q")
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Query \"q\": invalid marker at /x: unknown marker \"$nope\""
        );
    }

    #[test]
    fn test_marker_error_path_escapes_keys() {
        let error = query_config(json!({"a/b": {"c~d": {"$nope": 1}}}))
            .to_definition("q")
            .unwrap_err();
        assert!(
            matches!(error, ConfigLoadError::InvalidMarker { ref path, .. } if path == "/a~1b/c~0d")
        );
    }

    #[test]
    fn test_marker_mixed_with_keys_rejected() {
        let error = query_config(json!({"$param": 0, "other": 1}))
            .to_definition("q")
            .unwrap_err();
        assert!(matches!(error, ConfigLoadError::InvalidMarker { ref path, .. } if path == "/"));
    }

    #[test]
    fn test_param_marker_requires_index() {
        let error = query_config(json!([{"$param": "zero"}]))
            .to_definition("q")
            .unwrap_err();
        assert!(error.to_string().contains("$param expects a non-negative integer"));
    }

    #[test]
    fn test_validators_built_in_order() {
        let config = FileQueryConfig {
            description: None,
            validators: vec![
                FileValidatorConfig::NonEmpty {
                    pointer: "/name".to_string(),
                    message: None,
                },
                FileValidatorConfig::ParamCount {
                    min: 1,
                    message: None,
                },
            ],
            config: json!({}),
        };
        let definition = config.to_definition("q").unwrap();
        assert_eq!(definition.validators().len(), 2);
        assert_eq!(config.validators[1].kind(), "param_count");
    }

    #[test]
    fn test_invalid_pointer_rejected() {
        let config = FileQueryConfig {
            validators: vec![FileValidatorConfig::Required {
                pointers: vec!["/ok".to_string(), "name".to_string()],
                message: None,
            }],
            ..FileQueryConfig::default()
        };
        let error = config.to_definition("q").unwrap_err();
        assert!(matches!(error, ConfigLoadError::InvalidPointer { ref pointer, .. } if pointer == "name"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = FileQueryConfig {
            validators: vec![FileValidatorConfig::Matches {
                pointer: "/email".to_string(),
                pattern: "([".to_string(),
                message: None,
            }],
            ..FileQueryConfig::default()
        };
        assert!(matches!(
            config.to_definition("q"),
            Err(ConfigLoadError::InvalidPattern { .. })
        ));
    }
}
