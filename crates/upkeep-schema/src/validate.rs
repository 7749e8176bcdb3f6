//! # Schema Validation
//!
//! Runtime validation of untyped payloads against the embedded JSON Schema
//! documents (Draft 2020-12) in `schemas/`.
//!
//! ## Trust Boundary
//!
//! Every payload entering an entity store passes through
//! [`SchemaValidator::validate`]. A payload either comes back narrowed to
//! the schema's declared properties, or fails with a [`ValidationError`]
//! carrying one short corrective phrase that is shown to the user verbatim.
//!
//! ## Which Violation Wins
//!
//! The jsonschema crate reports violations in keyword-evaluation order,
//! which is not the order a form presents its fields. Each schema declares
//! an `x-field-order` array; violations are ranked by the position of the
//! field they concern, root-level shape errors first. The winning field's
//! `x-message` annotation is the message returned.
//!
//! ## Full and Partial Variants
//!
//! Every schema compiles twice. The partial variant drops `required` but
//! still checks every field that is present, so `{"title": ""}` fails a
//! partial work-order update just as it fails a create.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use jsonschema::error::ValidationErrorKind;
use jsonschema::Validator;
use serde_json::{Map, Value};
use thiserror::Error;
use upkeep_core::ValidationError;

/// Message for a payload that is not a JSON object at all.
pub const NOT_AN_OBJECT_MESSAGE: &str = "Request body must be an object";

/// Annotation holding a property's corrective message.
const MESSAGE_KEYWORD: &str = "x-message";
/// Annotation holding the field ranking.
const FIELD_ORDER_KEYWORD: &str = "x-field-order";

// ─── Schema identifiers ──────────────────────────────────────────────

/// The named schemas shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaName {
    Property,
    WorkOrder,
    Personnel,
    MaintenanceRecord,
    Note,
    Attachment,
}

impl SchemaName {
    pub const ALL: [SchemaName; 6] = [
        Self::Property,
        Self::WorkOrder,
        Self::Personnel,
        Self::MaintenanceRecord,
        Self::Note,
        Self::Attachment,
    ];

    /// The identifier callers use to name the schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::WorkOrder => "workOrder",
            Self::Personnel => "personnel",
            Self::MaintenanceRecord => "maintenanceRecord",
            Self::Note => "note",
            Self::Attachment => "attachment",
        }
    }

    fn document(&self) -> &'static str {
        match self {
            Self::Property => include_str!("../schemas/property.schema.json"),
            Self::WorkOrder => include_str!("../schemas/work-order.schema.json"),
            Self::Personnel => include_str!("../schemas/personnel.schema.json"),
            Self::MaintenanceRecord => include_str!("../schemas/maintenance-record.schema.json"),
            Self::Note => include_str!("../schemas/note.schema.json"),
            Self::Attachment => include_str!("../schemas/attachment.schema.json"),
        }
    }
}

/// Create (`Full`) or update (`Partial`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaMode {
    Full,
    Partial,
}

/// A schema name plus its variant, e.g. `workOrder` or `workOrder.partial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId {
    pub name: SchemaName,
    pub mode: SchemaMode,
}

impl SchemaId {
    pub const fn full(name: SchemaName) -> Self {
        Self {
            name,
            mode: SchemaMode::Full,
        }
    }

    pub const fn partial(name: SchemaName) -> Self {
        Self {
            name,
            mode: SchemaMode::Partial,
        }
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            SchemaMode::Full => f.write_str(self.name.as_str()),
            SchemaMode::Partial => write!(f, "{}.partial", self.name.as_str()),
        }
    }
}

impl FromStr for SchemaId {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, mode) = match s.strip_suffix(".partial") {
            Some(base) => (base, SchemaMode::Partial),
            None => (s, SchemaMode::Full),
        };
        SchemaName::ALL
            .into_iter()
            .find(|n| n.as_str() == base)
            .map(|name| SchemaId { name, mode })
            .ok_or_else(|| SchemaError::UnknownSchema(s.to_string()))
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised while loading schemas or resolving schema names.
///
/// Payload failures are not schema errors; they are [`ValidationError`]s.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// An embedded schema document is not valid JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// No schema is registered under this name.
    #[error("unknown schema '{0}'")]
    UnknownSchema(String),

    /// The payload failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Top-level payload field the violation concerns, `None` at the root.
    pub field: Option<String>,
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// The corrective message for this violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

// ─── Validator ───────────────────────────────────────────────────────

struct CompiledSchema {
    validator: Validator,
    declared: Vec<String>,
    field_order: Vec<String>,
    messages: HashMap<String, String>,
}

impl CompiledSchema {
    fn compile(id: SchemaId) -> Result<Self, SchemaError> {
        let mut document: Value = serde_json::from_str(id.name.document()).map_err(|e| {
            SchemaError::SchemaLoadError {
                schema_name: id.to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        if id.mode == SchemaMode::Partial {
            if let Some(obj) = document.as_object_mut() {
                obj.remove("required");
            }
        }

        let properties = document
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let declared: Vec<String> = properties.keys().cloned().collect();
        let messages: HashMap<String, String> = properties
            .iter()
            .filter_map(|(field, schema)| {
                schema
                    .get(MESSAGE_KEYWORD)
                    .and_then(Value::as_str)
                    .map(|m| (field.clone(), m.to_string()))
            })
            .collect();
        let field_order: Vec<String> = document
            .get(FIELD_ORDER_KEYWORD)
            .and_then(Value::as_array)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&document)
            .map_err(|e| SchemaError::ValidatorBuildError {
                schema_name: id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            validator,
            declared,
            field_order,
            messages,
        })
    }

    fn rank(&self, field: Option<&str>) -> usize {
        match field {
            None => 0,
            Some(f) => self
                .field_order
                .iter()
                .position(|known| known == f)
                .map_or(self.field_order.len() + 1, |i| i + 1),
        }
    }

    fn message_for(&self, field: Option<&str>) -> String {
        match field {
            None => NOT_AN_OBJECT_MESSAGE.to_string(),
            Some(f) => self
                .messages
                .get(f)
                .cloned()
                .unwrap_or_else(|| format!("Invalid {f}")),
        }
    }

    /// Keep only declared properties.
    fn narrow(&self, payload: &Value) -> Value {
        let mut out = Map::new();
        if let Some(obj) = payload.as_object() {
            for field in &self.declared {
                if let Some(v) = obj.get(field) {
                    out.insert(field.clone(), v.clone());
                }
            }
        }
        Value::Object(out)
    }
}

/// Validator over every embedded schema, compiled once at construction.
///
/// `SchemaValidator` is `Send + Sync`; a single instance is shared by all
/// entity stores.
pub struct SchemaValidator {
    compiled: HashMap<SchemaId, CompiledSchema>,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schemas", &self.schema_names())
            .finish()
    }
}

impl SchemaValidator {
    /// Compile the full and partial variant of every embedded schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaLoadError` or
    /// `SchemaError::ValidatorBuildError` if an embedded document is broken.
    pub fn new() -> Result<Self, SchemaError> {
        let mut compiled = HashMap::new();
        for name in SchemaName::ALL {
            for id in [SchemaId::full(name), SchemaId::partial(name)] {
                compiled.insert(id, CompiledSchema::compile(id)?);
            }
        }
        Ok(Self { compiled })
    }

    /// Returns the identifiers of all compiled schemas, sorted.
    pub fn schema_names(&self) -> Vec<String> {
        let mut ids: Vec<&SchemaId> = self.compiled.keys().collect();
        ids.sort();
        ids.into_iter().map(ToString::to_string).collect()
    }

    fn schema(&self, id: SchemaId) -> Result<&CompiledSchema, SchemaError> {
        self.compiled
            .get(&id)
            .ok_or_else(|| SchemaError::UnknownSchema(id.to_string()))
    }

    /// All violations of `payload`, most relevant first.
    pub fn violations(&self, id: SchemaId, payload: &Value) -> Result<Vec<Violation>, SchemaError> {
        let schema = self.schema(id)?;
        let mut ranked: Vec<(usize, Violation)> = schema
            .validator
            .iter_errors(payload)
            .map(|e| {
                let instance_path = e.instance_path.to_string();
                let field = match &e.kind {
                    ValidationErrorKind::Required { property } if instance_path.is_empty() => {
                        property.as_str().map(str::to_string)
                    }
                    _ => top_level_field(&instance_path),
                };
                let violation = Violation {
                    message: schema.message_for(field.as_deref()),
                    field,
                    instance_path,
                    schema_path: e.schema_path.to_string(),
                };
                (schema.rank(violation.field.as_deref()), violation)
            })
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);
        Ok(ranked.into_iter().map(|(_, v)| v).collect())
    }

    /// Validate `payload` against `id`.
    ///
    /// On success returns the payload narrowed to the schema's declared
    /// properties; unknown fields are dropped, not rejected.
    ///
    /// # Errors
    ///
    /// Returns the first violation's corrective message as a
    /// [`ValidationError`].
    pub fn validate(&self, id: SchemaId, payload: &Value) -> Result<Value, ValidationError> {
        let schema = match self.schema(id) {
            Ok(schema) => schema,
            Err(e) => return Err(ValidationError::new(e.to_string())),
        };
        if schema.validator.is_valid(payload) {
            return Ok(schema.narrow(payload));
        }
        let first = self
            .violations(id, payload)
            .ok()
            .and_then(|vs| vs.into_iter().next());
        Err(ValidationError::new(match first {
            Some(v) => v.message,
            None => NOT_AN_OBJECT_MESSAGE.to_string(),
        }))
    }

    /// Validate against a schema named by string, e.g. `"personnel.partial"`.
    pub fn validate_named(&self, schema: &str, payload: &Value) -> Result<Value, SchemaError> {
        let id: SchemaId = schema.parse()?;
        Ok(self.validate(id, payload)?)
    }
}

/// First segment of a JSON Pointer, unescaped.
fn top_level_field(pointer: &str) -> Option<String> {
    pointer
        .strip_prefix('/')
        .and_then(|rest| rest.split('/').next())
        .filter(|seg| !seg.is_empty())
        .map(|seg| seg.replace("~1", "/").replace("~0", "~"))
}
