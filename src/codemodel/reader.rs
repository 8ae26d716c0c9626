//! Two-level codemodel flattening.

use serde_json::Value;
use tracing::debug;

use super::error::{BoxError, ReadError};
use super::target::Target;

/// Produces the parsed detail document for a target's `jsonFile`.
///
/// Implemented for plain closures so tests and callers can inject any lookup,
/// and by [`crate::reply::ReplyDirectory`] for on-disk reply trees.
pub trait ResolveSecondary {
    /// Loads and parses the document referenced by `json_file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be found, read or parsed.
    fn resolve(&self, json_file: &str) -> Result<Value, BoxError>;
}

impl<F> ResolveSecondary for F
where
    F: Fn(&str) -> Result<Value, BoxError>,
{
    fn resolve(&self, json_file: &str) -> Result<Value, BoxError> {
        self(json_file)
    }
}

/// One entry of `configurations[0].targets`. Only `name` and `jsonFile` are required.
#[derive(Debug)]
struct TargetReference<'a> {
    name: &'a str,
    json_file: &'a str,
    id: Option<&'a str>,
    directory_index: Option<u64>,
    project_index: Option<u64>,
}

impl<'a> TargetReference<'a> {
    fn parse(index: usize, entry: &'a Value) -> Result<Self, ReadError> {
        let field = |key: &str| entry.get(key).and_then(Value::as_str);
        let (Some(name), Some(json_file)) = (field("name"), field("jsonFile")) else {
            return Err(ReadError::MalformedTargetEntry { index });
        };
        Ok(Self {
            name,
            json_file,
            id: field("id"),
            directory_index: entry.get("directoryIndex").and_then(Value::as_u64),
            project_index: entry.get("projectIndex").and_then(Value::as_u64),
        })
    }
}

/// Returns the `name` of the configuration [`read`] selects, if it has one.
#[must_use]
pub fn selected_configuration_name(root: &Value) -> Option<&str> {
    root.get("configurations")?.get(0)?.get("name")?.as_str()
}

/// Flattens the first configuration of `root` into target records.
///
/// Output order and count match the configuration's target entries. The
/// resolver is called exactly once per entry, in order.
///
/// # Errors
///
/// Fails on the first malformed entry, unresolvable detail document or
/// malformed detail document. No partial list is returned.
pub fn read<R>(root: &Value, resolver: &R) -> Result<Vec<Target>, ReadError>
where
    R: ResolveSecondary + ?Sized,
{
    let configuration = root
        .get("configurations")
        .ok_or_else(|| ReadError::codemodel("missing `configurations`"))?
        .as_array()
        .ok_or_else(|| ReadError::codemodel("`configurations` is not a list"))?
        .first()
        .ok_or_else(|| ReadError::codemodel("`configurations` is empty"))?;

    let entries = configuration
        .get("targets")
        .and_then(Value::as_array)
        .ok_or_else(|| ReadError::codemodel("first configuration has no `targets` list"))?;

    let mut targets = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let reference = TargetReference::parse(index, entry)?;
        debug!(
            target_name = reference.name,
            json_file = reference.json_file,
            id = reference.id,
            directory_index = reference.directory_index,
            project_index = reference.project_index,
            "resolving target"
        );

        let detail = resolver.resolve(reference.json_file).map_err(|source| {
            ReadError::SecondaryResolutionFailed { path: reference.json_file.to_string(), source }
        })?;
        targets.push(flatten(&reference, &detail)?);
    }

    Ok(targets)
}

fn flatten(reference: &TargetReference<'_>, detail: &Value) -> Result<Target, ReadError> {
    let json_file = reference.json_file;
    let artifacts = path_list(detail, "artifacts", json_file)?;
    let sources = path_list(detail, "sources", json_file)?;
    let target_type = detail
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ReadError::detail(json_file, "missing `type`"))?;

    Ok(Target::new(reference.name, target_type, artifacts, sources))
}

/// Collects `detail[key][*].path`. An absent key is an empty list.
fn path_list(detail: &Value, key: &str, json_file: &str) -> Result<Vec<String>, ReadError> {
    let items = match detail.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ReadError::detail(json_file, format!("`{key}` is not a list"))),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.get("path")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ReadError::detail(json_file, format!("`{key}[{i}]` has no `path`")))
        })
        .collect()
}
