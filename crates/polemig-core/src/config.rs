//! Configuration types for polemig.
//!
//! Two layers live here:
//!
//! - [`Defaults`] is what the engine consumes: per-role wire sizes and
//!   conductor properties used to fill blank primary, neutral and open
//!   secondary wires. The engine never invents these values.
//! - [`Config`] is what the host loads. [`Config::load`] layers the embedded
//!   TOML defaults, the user config file, an optional explicit file and
//!   `POLEMIG__*` environment variables. [`Config::defaults`] returns the
//!   embedded defaults without touching the filesystem (useful in tests).

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[wire.primary]
size = "1/0 ACSR"

[wire.primary.conductor_properties]
diameter = 0.398
weight   = 0.1452

[wire.neutral]
size = "2 ACSR"

[wire.neutral.conductor_properties]
diameter = 0.316
weight   = 0.0913

[wire.secondary_open]
size = "1/0 AAC"

[wire.secondary_open.conductor_properties]
diameter = 0.368
weight   = 0.0992

[output]
prefix = "transformed_"
pretty = true
"#;

// ---------------------------------------------------------------------------
// Engine defaults
// ---------------------------------------------------------------------------

/// Caller-supplied defaults for the structural normalizer.
///
/// Accepts both the snake_case TOML layout and the camelCase JSON layout
/// (`{"wire": {"secondaryOpen": {"conductorProperties": ...}}}`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub wire: WireDefaults,
}

/// Per-role wire defaults. A role left out means blank wires of that type
/// keep their blank size.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WireDefaults {
    #[serde(default)]
    pub primary: Option<WireRoleDefaults>,
    #[serde(default)]
    pub neutral: Option<WireRoleDefaults>,
    #[serde(default, alias = "secondaryOpen", alias = "secondaryopen")]
    pub secondary_open: Option<WireRoleDefaults>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireRoleDefaults {
    pub size: String,
    #[serde(alias = "conductorProperties", alias = "conductorproperties")]
    pub conductor_properties: ConductorProperties,
}

/// `conductorProperties` as written into wires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConductorProperties {
    pub diameter: f64,
    pub weight: f64,
}

impl Defaults {
    /// Parse defaults from the JSON shape the original export tooling used.
    pub fn from_json_str(src: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(src)?)
    }
}

// ---------------------------------------------------------------------------
// Host config
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/polemig/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wire: WireDefaults,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Prepended to the input file name to form the output file name.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Pretty-print (2-space indent) instead of compact JSON.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_prefix() -> String { "transformed_".to_string() }
fn default_pretty() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            pretty: default_pretty(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered on top of the built-in defaults.
    ///
    /// Order (later wins): embedded defaults, the user config file (if it
    /// exists), `explicit` (must exist when given), `POLEMIG__*` env vars.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let user = canonical_layer(&config_path(), false)?;
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(&user, config::FileFormat::Json));

        if let Some(path) = explicit {
            let layer = canonical_layer(path, true)
                .with_context(|| format!("loading config {}", path.display()))?;
            builder = builder.add_source(config::File::from_str(&layer, config::FileFormat::Json));
        }

        let cfg: Self = builder
            .add_source(
                config::Environment::with_prefix("POLEMIG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The subset of the config the engine consumes.
    pub fn engine_defaults(&self) -> Defaults {
        Defaults {
            wire: self.wire.clone(),
        }
    }

    /// Reject role defaults that would write unusable wires.
    pub fn validate(&self) -> anyhow::Result<()> {
        let roles = [
            ("primary", &self.wire.primary),
            ("neutral", &self.wire.neutral),
            ("secondary_open", &self.wire.secondary_open),
        ];
        for (name, role) in roles {
            let Some(role) = role else { continue };
            anyhow::ensure!(!role.size.trim().is_empty(), "wire.{name}.size must not be empty");
            let props = role.conductor_properties;
            anyhow::ensure!(
                props.diameter.is_finite() && props.diameter > 0.0,
                "wire.{name}.conductor_properties.diameter must be positive"
            );
            anyhow::ensure!(
                props.weight.is_finite() && props.weight > 0.0,
                "wire.{name}.conductor_properties.weight must be positive"
            );
        }
        anyhow::ensure!(!self.output.prefix.contains(['/', '\\']), "output.prefix must not contain path separators");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Key spelling
// ---------------------------------------------------------------------------

/// camelCase spellings accepted in config files, with their TOML names.
const KEY_SPELLINGS: &[(&str, &str)] = &[
    ("conductorProperties", "conductor_properties"),
    ("secondaryOpen", "secondary_open"),
];

fn canonical_key(key: &str) -> &str {
    KEY_SPELLINGS
        .iter()
        .find(|(camel, _)| key.eq_ignore_ascii_case(camel))
        .map(|(_, snake)| *snake)
        .unwrap_or(key)
}

/// Rewrite camelCase keys to the embedded TOML spelling so layers merge
/// into the same table entries.
pub fn canonical_keys(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (canonical_key(&k).to_string(), canonical_keys(v)))
                .collect(),
        ),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(canonical_keys).collect())
        }
        other => other,
    }
}

/// Read one config file (format by extension) as canonical JSON text.
/// A missing optional file yields an empty table.
fn canonical_layer(path: &Path, required: bool) -> anyhow::Result<String> {
    let raw: serde_json::Value = config::Config::builder()
        .add_source(config::File::from(path).required(required))
        .build()?
        .try_deserialize()?;
    Ok(serde_json::to_string(&canonical_keys(raw))?)
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("polemig")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
