//! DTOs mirroring the crates.io JSON API
//!
//! The registry schema is treated as an opaque external contract: only
//! the fields the tools consume are modeled, everything else is ignored
//! during deserialization. Optional fields stay `Option` so a partial
//! response never fails the whole query.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response shape of `GET /crates/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CrateResponse {
    #[serde(rename = "crate")]
    pub krate: PackageMetadata,
    #[serde(default)]
    pub versions: Vec<PackageVersion>,
}

/// The registry's top-level record for one package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub documentation: Option<String>,
    pub repository: Option<String>,
    #[serde(default)]
    pub downloads: u64,
    pub max_version: Option<String>,
    pub max_stable_version: Option<String>,
}

/// One published version of a package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageVersion {
    pub num: String,
    #[serde(default)]
    pub yanked: bool,
    pub license: Option<String>,
    #[serde(default)]
    pub downloads: u64,
    pub created_at: Option<String>,
    /// Feature name to the features/dependencies it activates.
    #[serde(default)]
    pub features: BTreeMap<String, Vec<String>>,
}

/// Response shape of `GET /crates/{name}/{version}/dependencies`.
#[derive(Debug, Clone, Deserialize)]
pub struct DependenciesResponse {
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// One dependency edge of a published version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    pub crate_id: String,
    pub req: String,
    /// normal, dev or build.
    pub kind: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub default_features: bool,
    pub target: Option<String>,
}

/// Response shape of `GET /crates?q=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub crates: Vec<SearchCrate>,
    pub meta: SearchMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCrate {
    pub name: String,
    pub description: Option<String>,
    pub max_version: Option<String>,
    #[serde(default)]
    pub downloads: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub total: u64,
}
