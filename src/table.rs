use crate::error::TableError;
use crate::region::{RegionPatternSet, RegionSource};
use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Pattern data compiled into the crate.
pub const EMBEDDED_JSON: &str = include_str!("../data/regions.json");

lazy_static! {
    // built on first use, at most once
    static ref EMBEDDED: Result<RegionTable, TableError> = RegionTable::from_json_str(EMBEDDED_JSON);
}

/// Every region's compiled patterns.
///
/// A table is only ever produced whole: [`RegionTableBuilder::build`] either
/// compiles and checks every region or returns the first defect. Once built it
/// is never mutated, so one instance can be shared across threads by reference.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    regions: BTreeMap<String, RegionPatternSet>,
    aliases: HashMap<String, String>,
}

impl RegionTable {
    pub fn builder() -> RegionTableBuilder {
        RegionTableBuilder::default()
    }

    pub fn from_json_str(json: &str) -> Result<RegionTable, TableError> {
        RegionTable::builder().add_json_str(json)?.build()
    }

    /// The table built from [`EMBEDDED_JSON`].
    pub fn embedded() -> Result<&'static RegionTable, &'static TableError> {
        EMBEDDED.as_ref()
    }

    /// Looks a region up by its exact code, then by its country alias
    /// (case-insensitive).
    pub fn region(&self, code: &str) -> Option<&RegionPatternSet> {
        if code.is_empty() {
            return None;
        }
        self.regions.get(code).or_else(|| {
            self.aliases
                .get(&code.to_ascii_uppercase())
                .and_then(|target| self.regions.get(target))
        })
    }

    /// Regions ordered by code.
    pub fn regions(&self) -> impl Iterator<Item = &RegionPatternSet> {
        self.regions.values()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Collects table sources. Later sources replace earlier regions with the same code.
#[derive(Debug, Clone, Default)]
pub struct RegionTableBuilder {
    sources: BTreeMap<String, RegionSource>,
}

impl RegionTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_embedded(self) -> Result<Self, TableError> {
        self.add_json_str(EMBEDDED_JSON)
    }

    pub fn add_json_str(self, json: &str) -> Result<Self, TableError> {
        let regions: BTreeMap<String, RegionSource> = serde_json::from_str(json)?;
        Ok(self.add_regions(regions))
    }

    pub fn add_json_file(self, path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "read pattern table source");
        self.add_json_str(&json)
    }

    pub fn add_region(mut self, code: &str, source: RegionSource) -> Self {
        if self.sources.insert(code.to_string(), source).is_some() {
            info!(region = code, "region replaced by a later table source");
        }
        self
    }

    fn add_regions(self, regions: BTreeMap<String, RegionSource>) -> Self {
        regions
            .into_iter()
            .fold(self, |builder, (code, source)| builder.add_region(&code, source))
    }

    pub fn build(self) -> Result<RegionTable, TableError> {
        let mut regions = BTreeMap::new();
        let mut aliases = HashMap::new();

        for (code, source) in &self.sources {
            let region = RegionPatternSet::compile(code, source)?;

            if let Some(country) = region.country() {
                let alias = country.trim().to_ascii_uppercase();
                if let Some(previous) = aliases.insert(alias.clone(), code.clone()) {
                    warn!(%alias, %previous, region = %code, "country alias reassigned");
                }
            }
            regions.insert(code.clone(), region);
        }

        info!(regions = regions.len(), "pattern table ready");
        Ok(RegionTable { regions, aliases })
    }
}
