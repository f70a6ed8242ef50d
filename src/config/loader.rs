//! Load evaluation specifications from YAML

use super::schema::EvalSpec;
use super::validate::validate_spec;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Parse an evaluation spec from a YAML string
pub fn parse_spec(yaml: &str) -> Result<EvalSpec> {
    serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("Failed to parse YAML config: {e}")))
}

/// Read, parse and validate an evaluation spec.
///
/// # Example
///
/// ```no_run
/// use alinear::config::load_spec;
///
/// let spec = load_spec("eval.yaml")?;
/// println!("{} classes", spec.model.n_classes);
/// # Ok::<(), alinear::Error>(())
/// ```
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<EvalSpec> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    let spec = parse_spec(&yaml)?;
    validate_spec(&spec)?;
    Ok(spec)
}
