//! CLI configuration: logging plus the ABI sets that make up the catalog.
//!
//! ```yaml
//! log:
//!   level: info
//!   components:
//!     errorsig-core: debug
//! catalog:
//!   version: "2024-06-deploy"
//!   bundled: true
//!   sets:
//!     - name: Escrow
//!       abi: ./artifacts/Escrow.json
//! ```

use anyhow::{anyhow, Context, Result};
use errorsig_core::Catalog;
use errorsig_evm::{bundled, error_set_from_path};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::logging::LogConfig;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Which ABI sets to search, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Version tag for the catalog (defaults to the bundled data version)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Append the bundled ABI sets after the configured ones
    #[serde(default = "bool_true")]
    pub bundled: bool,
    /// Project ABI files, searched before the bundled sets
    #[serde(default)]
    pub sets: Vec<SetSource>,
}

fn bool_true() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            version: None,
            bundled: true,
            sets: vec![],
        }
    }
}

/// One ABI file contributing a named error set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSource {
    pub name: String,
    pub abi: PathBuf,
}

/// `NAME=PATH`, as given to `--abi`.
impl FromStr for SetSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, path) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=PATH, got {s:?}"))?;
        if name.trim().is_empty() || path.trim().is_empty() {
            return Err(format!("expected NAME=PATH, got {s:?}"));
        }
        Ok(Self {
            name: name.trim().to_string(),
            abi: PathBuf::from(path.trim()),
        })
    }
}

impl Config {
    /// Load a YAML or JSON (by `.json` extension) config file. Relative ABI
    /// paths are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let mut config: Config = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing JSON config {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing YAML config {}", path.display()))?
        };
        if let Some(base) = path.parent() {
            config.catalog.resolve_paths(base);
        }
        Ok(config)
    }
}

impl CatalogConfig {
    fn resolve_paths(&mut self, base: &Path) {
        for set in &mut self.sets {
            if set.abi.is_relative() {
                set.abi = base.join(&set.abi);
            }
        }
    }

    /// Load every configured ABI and freeze the catalog.
    pub fn build(&self) -> Result<Catalog> {
        let mut builder = Catalog::builder().version(
            self.version
                .clone()
                .unwrap_or_else(|| bundled::BUNDLED_VERSION.to_string()),
        );

        for source in &self.sets {
            let set = error_set_from_path(&source.name, &source.abi)
                .with_context(|| format!("loading ABI set {}", source.name))?;
            tracing::info!(set = %source.name, path = %source.abi.display(), errors = set.errors.len(), "loaded ABI set");
            builder = builder.set(set);
        }
        if self.bundled {
            builder = builder.sets(bundled::bundled_sets()?);
        }

        let catalog = builder.build()?;
        if catalog.is_empty() {
            return Err(anyhow!(
                "catalog is empty: enable the bundled sets or pass --abi NAME=PATH"
            ));
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_source_from_str() {
        let s: SetSource = "Escrow=./abi/Escrow.json".parse().unwrap();
        assert_eq!(s.name, "Escrow");
        assert_eq!(s.abi, PathBuf::from("./abi/Escrow.json"));
        assert!("Escrow".parse::<SetSource>().is_err());
        assert!("=x.json".parse::<SetSource>().is_err());
    }

    #[test]
    fn yaml_defaults() {
        let cfg: Config = serde_yaml::from_str("catalog:\n  sets: []\n").unwrap();
        assert!(cfg.catalog.bundled);
        assert!(cfg.catalog.version.is_none());
        assert_eq!(cfg.log, LogConfig::default());
    }

    #[test]
    fn yaml_full() {
        let yaml = r#"
log:
  level: debug
  json: true
catalog:
  version: "v2"
  bundled: false
  sets:
    - name: Escrow
      abi: abis/Escrow.json
"#;
        let mut cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.log.level, "debug");
        assert!(cfg.log.json);
        assert!(!cfg.catalog.bundled);
        cfg.catalog.resolve_paths(Path::new("/etc/errorsig"));
        assert_eq!(cfg.catalog.sets[0].abi, PathBuf::from("/etc/errorsig/abis/Escrow.json"));
    }

    #[test]
    fn default_catalog_is_bundled() {
        let catalog = CatalogConfig::default().build().unwrap();
        assert_eq!(catalog.version(), bundled::BUNDLED_VERSION);
        assert_eq!(catalog.sets()[0].name(), "Collective");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let cfg = CatalogConfig {
            bundled: false,
            ..CatalogConfig::default()
        };
        assert!(cfg.build().is_err());
    }
}
