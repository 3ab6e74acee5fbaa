//! Error types with clear, actionable messages

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading site content (blog posts, gallery data)
#[derive(Error, Debug)]
pub enum ContentError {
    /// The content file could not be read
    #[error("Failed to read content file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content file is not valid JSON for the expected shape
    #[error("Failed to parse content file (invalid JSON or missing fields)")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// Two posts share the same slug
    #[error("Duplicate post slug '{slug}'. Every post needs a unique slug.")]
    DuplicateSlug { slug: String },

    /// A post has an empty slug
    #[error("Post at position {position} has an empty slug")]
    EmptySlug { position: usize },
}

/// Errors fetching or decoding the world topology
#[derive(Error, Debug)]
pub enum TopologyError {
    /// The download itself failed
    #[error("Failed to fetch world topology from {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The document is not valid TopoJSON
    #[error("Failed to parse world topology")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// The requested object is not present in the topology
    #[error("Topology has no object named '{name}'")]
    MissingObject { name: String },

    /// A geometry references an arc that does not exist
    #[error("Geometry references arc {index} but the topology only has {available} arcs")]
    ArcOutOfRange { index: i64, available: usize },
}

/// Errors submitting the contact form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A required field is empty
    #[error("Please fill in the {field} field.")]
    MissingField { field: &'static str },

    /// The phone number is not ten digits
    #[error("Please enter a valid 10-digit phone number.")]
    InvalidPhone,

    /// The email address is malformed
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// Client-side advisory limit between successful submissions
    #[error("Please wait {limit_seconds} seconds before submitting another request.")]
    RateLimited { limit_seconds: u64, retry_in: u64 },

    /// The request never produced a usable response
    #[error("Network error. Please make sure you have a stable connection and try again.")]
    Network { reason: String },
}

/// Errors validating ROI calculator input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    /// A field was left empty
    #[error("Fill all fields and press Calculate ({field} is missing)")]
    MissingField { field: &'static str },

    /// A field is not a number
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    /// A field is negative
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    /// A field has a fractional part
    #[error("{field} must be a whole number")]
    NotAWholeNumber { field: &'static str },
}

/// Errors loading or saving site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No platform config directory could be determined
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// The config file could not be read
    #[error("Failed to read site config: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML
    #[error("Failed to parse site config: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A config value is out of range
    #[error("Invalid site config: {0}")]
    Invalid(String),
}
