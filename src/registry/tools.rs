//! MCP tool implementations for registry metadata queries
//!
//! Thin glue over [`RegistryClient`]: pick the relevant version record,
//! flatten the response into the compact output shape, serialize.

use anyhow::{Context, Result, bail};
use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::registry::RegistryClient;
use crate::registry::outputs::{
    CrateHit, CrateMetadataOutput, DependencyInfo, GetDependenciesOutput, ListCrateVersionsOutput,
    RegistryErrorOutput, SearchCratesOutput, VersionSummary,
};
use crate::registry::types::{CrateResponse, PackageVersion};

const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 50;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetCrateMetadataParams {
    #[schemars(description = "The name of the crate")]
    pub crate_name: String,
    #[schemars(
        description = "Version to describe (defaults to the newest published version)"
    )]
    pub version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListCrateVersionsParams {
    #[schemars(description = "The name of the crate")]
    pub crate_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetDependenciesParams {
    #[schemars(description = "The name of the crate")]
    pub crate_name: String,
    #[schemars(
        description = "Version whose dependencies to list (defaults to the newest published version)"
    )]
    pub version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchCratesParams {
    #[schemars(description = "Keywords to search the registry for")]
    pub query: String,
    #[schemars(description = "Maximum number of crates to return (default: 10, max: 50)")]
    pub limit: Option<usize>,
}

#[derive(Clone)]
pub struct RegistryTools {
    registry: RegistryClient,
}

impl RegistryTools {
    pub fn new(registry: RegistryClient) -> Self {
        Self { registry }
    }

    /// Pick the version record the caller asked about, defaulting to the
    /// newest published one (crates.io orders versions newest first).
    fn select_version<'a>(
        info: &'a CrateResponse,
        requested: Option<&str>,
    ) -> Result<&'a PackageVersion> {
        match requested {
            Some(version) => info
                .versions
                .iter()
                .find(|v| v.num == version)
                .with_context(|| {
                    format!("version {version} of {} is not published", info.krate.name)
                }),
            None => match info.versions.first() {
                Some(version) => Ok(version),
                None => bail!("{} has no published versions", info.krate.name),
            },
        }
    }

    pub async fn get_crate_metadata(&self, params: GetCrateMetadataParams) -> String {
        match self.get_crate_metadata_impl(params).await {
            Ok(output) => output.to_json(),
            Err(e) => {
                RegistryErrorOutput::new(format!("Failed to get crate metadata: {e:#}")).to_json()
            }
        }
    }

    async fn get_crate_metadata_impl(
        &self,
        params: GetCrateMetadataParams,
    ) -> Result<CrateMetadataOutput> {
        let info = self.registry.crate_info(&params.crate_name).await?;
        let version = Self::select_version(&info, params.version.as_deref())?;

        Ok(CrateMetadataOutput {
            name: info.krate.name.clone(),
            description: info.krate.description.clone(),
            homepage: info.krate.homepage.clone(),
            documentation: info.krate.documentation.clone(),
            repository: info.krate.repository.clone(),
            downloads: info.krate.downloads,
            max_version: info.krate.max_version.clone(),
            max_stable_version: info.krate.max_stable_version.clone(),
            version: version.num.clone(),
            license: version.license.clone(),
            yanked: version.yanked,
            features: version.features.clone(),
        })
    }

    pub async fn list_crate_versions(&self, params: ListCrateVersionsParams) -> String {
        match self.list_crate_versions_impl(params).await {
            Ok(output) => output.to_json(),
            Err(e) => {
                RegistryErrorOutput::new(format!("Failed to list crate versions: {e:#}")).to_json()
            }
        }
    }

    async fn list_crate_versions_impl(
        &self,
        params: ListCrateVersionsParams,
    ) -> Result<ListCrateVersionsOutput> {
        let info = self.registry.crate_info(&params.crate_name).await?;

        let versions: Vec<VersionSummary> = info
            .versions
            .iter()
            .map(|v| VersionSummary {
                num: v.num.clone(),
                yanked: v.yanked,
                created_at: v.created_at.clone(),
                downloads: v.downloads,
            })
            .collect();
        let total = versions.len();

        Ok(ListCrateVersionsOutput {
            crate_name: params.crate_name,
            versions,
            total,
        })
    }

    pub async fn get_crate_dependencies(&self, params: GetDependenciesParams) -> String {
        match self.get_crate_dependencies_impl(params).await {
            Ok(output) => output.to_json(),
            Err(e) => {
                RegistryErrorOutput::new(format!("Failed to get dependencies: {e:#}")).to_json()
            }
        }
    }

    async fn get_crate_dependencies_impl(
        &self,
        params: GetDependenciesParams,
    ) -> Result<GetDependenciesOutput> {
        let version = match params.version {
            Some(version) => version,
            None => {
                let info = self.registry.crate_info(&params.crate_name).await?;
                Self::select_version(&info, None)?.num.clone()
            }
        };

        let dependencies: Vec<DependencyInfo> = self
            .registry
            .dependencies(&params.crate_name, &version)
            .await?
            .into_iter()
            .map(|d| DependencyInfo {
                name: d.crate_id,
                req: d.req,
                kind: d.kind,
                optional: d.optional,
                default_features: d.default_features,
                target: d.target,
            })
            .collect();
        let total = dependencies.len();

        Ok(GetDependenciesOutput {
            crate_name: params.crate_name,
            version,
            dependencies,
            total,
        })
    }

    pub async fn search_crates(&self, params: SearchCratesParams) -> String {
        match self.search_crates_impl(params).await {
            Ok(output) => output.to_json(),
            Err(e) => {
                RegistryErrorOutput::new(format!("Failed to search crates: {e:#}")).to_json()
            }
        }
    }

    async fn search_crates_impl(&self, params: SearchCratesParams) -> Result<SearchCratesOutput> {
        let limit = params
            .limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);

        let response = self.registry.search(&params.query, limit).await?;
        let crates = response
            .crates
            .into_iter()
            .map(|c| CrateHit {
                name: c.name,
                description: c.description,
                max_version: c.max_version,
                downloads: c.downloads,
            })
            .collect();

        Ok(SearchCratesOutput {
            query: params.query,
            crates,
            total: response.meta.total,
        })
    }
}
