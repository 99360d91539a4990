//! Database row models

use serde::{Deserialize, Serialize};

/// A row of the `taxonomy` table.
///
/// `canonical_name` is the local join key: exactly one entry exists per
/// distinct canonical name, whether resolved against GBIF or created as
/// a placeholder. Placeholder entries carry the canonical name itself as
/// `usage_key` and `is_in_gbif = 0` until manual reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub usage_key: String,
    pub order: String,
    pub family: String,
    pub subfamily: String,
    pub tribe: String,
    pub genus: String,
    pub subgenus: String,
    pub species: String,
    pub canonical_name: String,
    pub authorship: String,
    pub scientific_name: String,
    pub rank: String,
    pub is_in_gbif: i64,
}

impl TaxonomyEntry {
    /// Placeholder entry for a name GBIF could not resolve.
    ///
    /// The canonical name doubles as a temporary usageKey so the strict
    /// lookups in later import phases still find the entry.
    pub fn placeholder(canonical_name: &str) -> Self {
        Self {
            usage_key: canonical_name.to_string(),
            order: String::new(),
            family: String::new(),
            subfamily: String::new(),
            tribe: String::new(),
            genus: String::new(),
            subgenus: String::new(),
            species: String::new(),
            canonical_name: canonical_name.to_string(),
            authorship: String::new(),
            scientific_name: String::new(),
            rank: String::new(),
            is_in_gbif: 0,
        }
    }
}

/// Fields for a new `records` row (the specimen record).
///
/// Count columns are `Option<i64>`: NULL until molecular rows attach and
/// bump them, or whatever the records CSV carried.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecord {
    pub usage_key: String,
    pub identified_by: String,
    pub date_identified: String,
    pub identification_qualifier: String,
    pub type_status: String,
    pub num_m: Option<i64>,
    pub num_f: Option<i64>,
    pub num_nosex: Option<i64>,
    pub num_mol: Option<i64>,
    pub country_code: String,
    pub state_province: String,
    pub locality: String,
    pub elevation: String,
    pub verbatim_latitude: String,
    pub verbatim_longitude: String,
    pub decimal_latitude: String,
    pub decimal_longitude: String,
    pub event_date: String,
    pub recorded_by: String,
    pub biog_reg: String,
    pub institution_id: String,
    pub basis_of_record: String,
    pub notes: String,
}

/// Fields for a new `molecular` row, attached to a specimen record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MolecularSample {
    pub collection_id: String,
    pub sex: String,
    pub notes: String,
    pub life_stage: String,
    pub bodypart: String,
    pub preservation: String,
    pub localisation: String,
}
