//! KEGG REST commands
//!
//! Every command has a URL builder (`*_url`) and a fetching method that goes
//! through the configured [`TextFetcher`] under a deterministic cache key.

use super::fetcher::HttpFetcher;
use super::{DatabaseInfo, KeggConfig, KeggError, KeggResult, KeggSource, TextFetcher};
use crate::graph::NodeId;
use crate::parser::{
    parse_bipartite_list, parse_columns, parse_four_way_list, parse_nested, BipartiteList,
    ColumnRecord, FourWayList, NestedRecord,
};
use indexmap::IndexMap;
use tracing::debug;

/// KEGG databases accepted as database arguments
pub const DATABASES: &[&str] = &[
    "pathway", "brite", "module", "ko", "genome", "vg", "vp", "ag", "compound", "glycan",
    "reaction", "rclass", "enzyme", "network", "variant", "disease", "drug", "dgroup", "environ",
    "atc", "jtc", "ndc", "yj", "pubmed",
];

/// Outside databases reachable through CONV
pub const OUTSIDE_DATABASES: &[&str] =
    &["ncbi-geneid", "ncbi-proteinid", "uniprot", "pubchem", "chebi"];

const FIND_OPTIONS: &[&str] = &["formula", "exact_mass", "mol_weight"];

/// Organism codes are recognised by shape (`hsa`, `mmu`, `eco`, ...) or as T numbers
fn is_organism_code(key: &str) -> bool {
    let lower = (3..=4).contains(&key.len())
        && key.bytes().all(|b| b.is_ascii_lowercase())
        && !DATABASES.contains(&key);
    let t_number = key.len() == 6
        && key.starts_with('T')
        && key[1..].bytes().all(|b| b.is_ascii_digit());
    lower || t_number
}

/// True for KEGG databases and organism codes
pub fn is_database_key(key: &str) -> bool {
    DATABASES.contains(&key) || is_organism_code(key)
}

fn validate_database(key: &str) -> KeggResult<()> {
    if is_database_key(key) {
        Ok(())
    } else {
        Err(KeggError::invalid_key(key, "not a KEGG database or organism code"))
    }
}

/// Text formats of GET that come back as raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceFormat {
    Aaseq,
    Ntseq,
    Mol,
    Kcf,
    Conf,
}

impl SequenceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceFormat::Aaseq => "aaseq",
            SequenceFormat::Ntseq => "ntseq",
            SequenceFormat::Mol => "mol",
            SequenceFormat::Kcf => "kcf",
            SequenceFormat::Conf => "conf",
        }
    }
}

/// FASTA answer split into header and residues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub description: String,
    pub sequence: String,
}

/// One DDI line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrugInteraction {
    pub first: String,
    pub second: String,
    pub code: String,
    pub interaction: String,
}

pub struct KeggClient<F> {
    fetcher: F,
    base_url: String,
    force_refresh: bool,
}

impl KeggClient<HttpFetcher> {
    /// HTTP client with an on-disk cache, as configured
    pub fn from_config(config: &KeggConfig) -> KeggResult<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new(config)?, &config.base_url))
    }
}

impl<F: TextFetcher> KeggClient<F> {
    pub fn with_fetcher(fetcher: F, base_url: &str) -> Self {
        KeggClient {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            force_refresh: false,
        }
    }

    /// Re-download even when a cached response exists
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn fetch(&self, url: &str, cache_key: &str) -> KeggResult<String> {
        debug!("KEGG request {} (cache key '{}')", url, cache_key);
        self.fetcher.fetch_text(url, cache_key, self.force_refresh)
    }

    // INFO

    pub fn info_url(&self, database: &str) -> String {
        format!("{}/info/{}", self.base_url, database)
    }

    pub fn info_text(&self, database: &str) -> KeggResult<String> {
        validate_database(database)?;
        self.fetch(&self.info_url(database), &format!("{}_info", database))
    }

    pub fn info(&self, database: &str) -> KeggResult<ColumnRecord> {
        Ok(parse_columns(&self.info_text(database)?)?)
    }

    // LIST

    pub fn list_url(&self, database: &str, option: Option<&str>) -> String {
        match option {
            Some(option) => format!("{}/list/{}/{}", self.base_url, database, option),
            None => format!("{}/list/{}", self.base_url, database),
        }
    }

    /// Entries of a database with their descriptions.
    ///
    /// `option` is `xl` (brite only) or an organism code (pathway and module only).
    pub fn list(&self, database: &str, option: Option<&str>) -> KeggResult<BipartiteList> {
        if !DATABASES.contains(&database) {
            return Err(KeggError::invalid_key(
                database,
                "LIST takes a KEGG database; organism gene lists come from list_genes",
            ));
        }
        match option {
            Some("xl") if database != "brite" => {
                return Err(KeggError::invalid_key(database, "option xl only applies to brite"));
            }
            Some(org) if org != "xl" && !matches!(database, "pathway" | "module") => {
                return Err(KeggError::invalid_key(
                    database,
                    format!("only pathway and module can be listed for {}", org),
                ));
            }
            _ => {}
        }

        let key = format!("{}_{}_list", database, option.unwrap_or(""));
        Ok(parse_bipartite_list(&self.fetch(&self.list_url(database, option), &key)?)?)
    }

    /// Gene catalogue of an organism (entry, type, position, description)
    pub fn list_genes(&self, organism: &str) -> KeggResult<FourWayList> {
        if !is_organism_code(organism) {
            return Err(KeggError::invalid_key(organism, "not an organism code"));
        }
        let key = format!("{}__list", organism);
        Ok(parse_four_way_list(&self.fetch(&self.list_url(organism, None), &key)?)?)
    }

    // FIND

    pub fn find_url(&self, database: &str, query: &str, option: Option<&str>) -> String {
        match option {
            Some(option) => format!("{}/find/{}/{}/{}", self.base_url, database, query, option),
            None => format!("{}/find/{}/{}", self.base_url, database, query),
        }
    }

    pub fn find(
        &self,
        database: &str,
        query: &str,
        option: Option<&str>,
    ) -> KeggResult<BipartiteList> {
        if database != "genes" {
            validate_database(database)?;
        }
        if let Some(option) = option {
            if !matches!(database, "compound" | "drug") || !FIND_OPTIONS.contains(&option) {
                return Err(KeggError::invalid_key(
                    database,
                    format!("find options {:?} only apply to compound and drug", FIND_OPTIONS),
                ));
            }
        }

        let key = format!("{}_{}_{}", database, query, option.unwrap_or(""));
        Ok(parse_bipartite_list(&self.fetch(&self.find_url(database, query, option), &key)?)?)
    }

    // GET

    pub fn get_url(&self, entry: &str, option: Option<&str>) -> String {
        match option {
            Some(option) => format!("{}/get/{}/{}", self.base_url, entry, option),
            None => format!("{}/get/{}", self.base_url, entry),
        }
    }

    /// Flat-file entry as raw text
    pub fn get_entry_text(&self, entry: &str) -> KeggResult<String> {
        self.fetch(&self.get_url(entry, None), &format!("{}_description", entry))
    }

    /// Flat-file entry parsed into its nested record
    pub fn get_entry(&self, entry: &str) -> KeggResult<NestedRecord> {
        Ok(parse_nested(&self.get_entry_text(entry)?))
    }

    /// Reference blocks of an entry, in order of appearance
    pub fn references(&self, entry: &str) -> KeggResult<Vec<IndexMap<String, String>>> {
        Ok(self
            .get_entry(entry)?
            .into_iter()
            .filter(|(key, _)| key.contains("reference"))
            .map(|(_, fields)| fields)
            .collect())
    }

    pub fn get_text(&self, entry: &str, format: SequenceFormat) -> KeggResult<String> {
        let option = format.as_str();
        self.fetch(
            &self.get_url(entry, Some(option)),
            &format!("{}_{}", entry, option),
        )
    }

    /// Amino-acid or nucleotide sequence with its FASTA header
    pub fn get_sequence(&self, entry: &str, format: SequenceFormat) -> KeggResult<Sequence> {
        if !matches!(format, SequenceFormat::Aaseq | SequenceFormat::Ntseq) {
            return Err(KeggError::invalid_key(entry, "only aaseq and ntseq carry sequences"));
        }
        let text = self.get_text(entry, format)?;
        let mut lines = text.lines();
        let description = lines.next().unwrap_or_default().to_string();
        let sequence = lines.map(str::trim).collect();
        Ok(Sequence {
            description,
            sequence,
        })
    }

    // LINK

    pub fn link_url(&self, source: &str, target: &str) -> String {
        format!("{}/link/{}/{}", self.base_url, target, source)
    }

    /// LINK relation; items are source entries, descriptions their targets.
    ///
    /// `source` may also be a single entry.
    pub fn link(&self, source: &str, target: &str) -> KeggResult<BipartiteList> {
        validate_database(target)?;
        let key = format!("{}_{}_link", target, source);
        Ok(parse_bipartite_list(&self.fetch(&self.link_url(source, target), &key)?)?)
    }

    // CONV

    pub fn conv_url(&self, source: &str, target: &str) -> String {
        format!("{}/conv/{}/{}", self.base_url, target, source)
    }

    pub fn conv(&self, source: &str, target: &str) -> KeggResult<BipartiteList> {
        let known = |key: &str| {
            is_database_key(key) || key == "genes" || OUTSIDE_DATABASES.contains(&key)
        };
        if !known(target) {
            return Err(KeggError::invalid_key(target, "not a conversion target"));
        }
        // Source is either a database or a single entry
        if !known(source) && !source.contains(':') {
            return Err(KeggError::invalid_key(source, "not a conversion source"));
        }

        let key = format!("{}_{}_conv", target, source);
        Ok(parse_bipartite_list(&self.fetch(&self.conv_url(source, target), &key)?)?)
    }

    // DDI

    pub fn ddi_url(&self, entry: &str) -> String {
        format!("{}/ddi/{}", self.base_url, entry)
    }

    pub fn ddi(&self, entry: &str) -> KeggResult<Vec<DrugInteraction>> {
        let text = self.fetch(&self.ddi_url(entry), &format!("{}_ddi", entry))?;
        let rows = parse_four_way_list(&text)?;

        Ok(rows
            .items
            .into_iter()
            .zip(rows.types)
            .zip(rows.positions)
            .zip(rows.descriptions)
            .map(|(((first, second), code), interaction)| DrugInteraction {
                first,
                second,
                code,
                interaction,
            })
            .collect())
    }
}

impl<F: TextFetcher> KeggSource for KeggClient<F> {
    fn fetch_metadata(&self, category: &str) -> KeggResult<DatabaseInfo> {
        Ok(DatabaseInfo::new(category, self.info(category)?))
    }

    fn fetch_link(&self, source: &str, target: &str) -> KeggResult<(Vec<NodeId>, Vec<NodeId>)> {
        let (sources, targets) = self.link(source, target)?.into_parts();
        Ok((
            sources.into_iter().map(NodeId::from).collect(),
            targets.into_iter().map(NodeId::from).collect(),
        ))
    }
}
