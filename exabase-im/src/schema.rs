//! CSV row schemas
//!
//! The source exports are positional CSV files with no header-driven
//! mapping, so the column layout of each file shape is declared here
//! explicitly and validated per record. A record with the wrong column
//! count fails the run immediately with a schema-mismatch diagnostic
//! instead of silently reading the wrong fields.
//!
//! Two shapes carry the taxon name differently: the records/molecular
//! layout has order/family/subgenus columns between the identifiers and
//! the species epithet, the collection layout does not. The shapes are
//! kept separate on purpose.

use csv::StringRecord;

use crate::error::{ImportError, ImportResult};

/// Collection export columns (no header row)
mod collection_col {
    pub const COLLECTION_ID: usize = 0; // natural key carried to molecular/sequences
    pub const GENUS: usize = 3;
    pub const SPECIES: usize = 4;
    pub const SUBSPECIES: usize = 5;
    pub const SEX: usize = 6;
    pub const COUNTRY_CODE: usize = 7;
    pub const STATE: usize = 8;
    pub const PROVINCE: usize = 9;
    pub const LOCALITY: usize = 10;
    pub const ELEVATION: usize = 11;
    pub const EVENT_DATE: usize = 12;
    pub const RECORDED_BY: usize = 13;
    pub const VERBATIM_LATITUDE: usize = 15;
    pub const VERBATIM_LONGITUDE: usize = 16;
    pub const DECIMAL_LATITUDE: usize = 17;
    pub const DECIMAL_LONGITUDE: usize = 18;
    pub const LIFE_STAGE: usize = 19;
    pub const BODYPART: usize = 20;
    pub const BIOG_REG: usize = 21;
    pub const PRESERVATION: usize = 22;
    pub const LOCALISATION: usize = 23;
    pub const SEQUENCE_TYPE: usize = 24;
    pub const NOTES: usize = 25;
    pub const WIDTH: usize = 26;
}

/// Records export columns (one header row, skipped by the reader)
mod records_col {
    pub const GENUS: usize = 3;
    pub const SPECIES: usize = 5;
    pub const SUBSPECIES: usize = 6;
    pub const IDENTIFIED_BY: usize = 8;
    pub const TYPE_STATUS: usize = 9;
    pub const NUM_M: usize = 10;
    pub const NUM_F: usize = 11;
    pub const NUM_NOSEX: usize = 12;
    pub const COUNTRY_CODE: usize = 13;
    pub const STATE: usize = 14;
    pub const PROVINCE: usize = 15;
    pub const LOCALITY: usize = 16;
    pub const LOCALITY_DETAIL: usize = 17;
    pub const ELEVATION: usize = 18;
    pub const VERBATIM_LATITUDE: usize = 19;
    pub const VERBATIM_LONGITUDE: usize = 20;
    pub const DECIMAL_LATITUDE: usize = 21;
    pub const DECIMAL_LONGITUDE: usize = 22;
    pub const BIOG_REG: usize = 23;
    pub const EVENT_DATE: usize = 24;
    pub const INSTITUTION_ID: usize = 25;
    pub const RECORDED_BY: usize = 26;
    pub const BASIS_OF_RECORD: usize = 27;
    pub const NOTES: usize = 28;
    pub const WIDTH: usize = 29;
}

/// Molecular export columns (taxon prefix; trailing columns vary per export)
mod molecular_col {
    pub const COLLECTION_ID: usize = 0;
    pub const GENUS: usize = 3;
    pub const SPECIES: usize = 5;
    pub const SUBSPECIES: usize = 6;
    pub const MIN_WIDTH: usize = 7;
}

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}

/// Lenient count parse: empty or unparseable values become NULL
fn parse_count(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn check_width(
    record: &StringRecord,
    file: &str,
    schema: &'static str,
    expected: usize,
) -> ImportResult<()> {
    if record.len() != expected {
        return Err(ImportError::SchemaMismatch {
            file: file.to_string(),
            schema,
            row: record.position().map(|p| p.line()).unwrap_or(0),
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

/// One row of the collection export
#[derive(Debug, Clone)]
pub struct CollectionRow {
    pub collection_id: String,
    pub genus: String,
    pub species: String,
    pub subspecies: String,
    pub sex: String,
    pub country_code: String,
    pub state: String,
    pub province: String,
    pub locality: String,
    pub elevation: String,
    pub event_date: String,
    pub recorded_by: String,
    pub verbatim_latitude: String,
    pub verbatim_longitude: String,
    pub decimal_latitude: String,
    pub decimal_longitude: String,
    pub life_stage: String,
    pub bodypart: String,
    pub biog_reg: String,
    pub preservation: String,
    pub localisation: String,
    pub sequence_type: String,
    pub notes: String,
}

impl CollectionRow {
    pub fn from_record(record: &StringRecord, file: &str) -> ImportResult<Self> {
        use collection_col as col;
        check_width(record, file, "collection", col::WIDTH)?;

        Ok(Self {
            collection_id: field(record, col::COLLECTION_ID),
            genus: field(record, col::GENUS),
            species: field(record, col::SPECIES),
            subspecies: field(record, col::SUBSPECIES),
            sex: field(record, col::SEX),
            country_code: field(record, col::COUNTRY_CODE),
            state: field(record, col::STATE),
            province: field(record, col::PROVINCE),
            locality: field(record, col::LOCALITY),
            elevation: field(record, col::ELEVATION),
            event_date: field(record, col::EVENT_DATE),
            recorded_by: field(record, col::RECORDED_BY),
            verbatim_latitude: field(record, col::VERBATIM_LATITUDE),
            verbatim_longitude: field(record, col::VERBATIM_LONGITUDE),
            decimal_latitude: field(record, col::DECIMAL_LATITUDE),
            decimal_longitude: field(record, col::DECIMAL_LONGITUDE),
            life_stage: field(record, col::LIFE_STAGE),
            bodypart: field(record, col::BODYPART),
            biog_reg: field(record, col::BIOG_REG),
            preservation: field(record, col::PRESERVATION),
            localisation: field(record, col::LOCALISATION),
            sequence_type: field(record, col::SEQUENCE_TYPE),
            notes: field(record, col::NOTES),
        })
    }
}

/// One row of the records export
#[derive(Debug, Clone)]
pub struct RecordsRow {
    pub genus: String,
    pub species: String,
    pub subspecies: String,
    pub identified_by: String,
    pub type_status: String,
    pub num_m: Option<i64>,
    pub num_f: Option<i64>,
    pub num_nosex: Option<i64>,
    pub country_code: String,
    pub state: String,
    pub province: String,
    pub locality: String,
    pub locality_detail: String,
    pub elevation: String,
    pub verbatim_latitude: String,
    pub verbatim_longitude: String,
    pub decimal_latitude: String,
    pub decimal_longitude: String,
    pub biog_reg: String,
    pub event_date: String,
    pub institution_id: String,
    pub recorded_by: String,
    pub basis_of_record: String,
    pub notes: String,
}

impl RecordsRow {
    pub fn from_record(record: &StringRecord, file: &str) -> ImportResult<Self> {
        use records_col as col;
        check_width(record, file, "records", col::WIDTH)?;

        Ok(Self {
            genus: field(record, col::GENUS),
            species: field(record, col::SPECIES),
            subspecies: field(record, col::SUBSPECIES),
            identified_by: field(record, col::IDENTIFIED_BY),
            type_status: field(record, col::TYPE_STATUS),
            num_m: parse_count(&field(record, col::NUM_M)),
            num_f: parse_count(&field(record, col::NUM_F)),
            num_nosex: parse_count(&field(record, col::NUM_NOSEX)),
            country_code: field(record, col::COUNTRY_CODE),
            state: field(record, col::STATE),
            province: field(record, col::PROVINCE),
            locality: field(record, col::LOCALITY),
            locality_detail: field(record, col::LOCALITY_DETAIL),
            elevation: field(record, col::ELEVATION),
            verbatim_latitude: field(record, col::VERBATIM_LATITUDE),
            verbatim_longitude: field(record, col::VERBATIM_LONGITUDE),
            decimal_latitude: field(record, col::DECIMAL_LATITUDE),
            decimal_longitude: field(record, col::DECIMAL_LONGITUDE),
            biog_reg: field(record, col::BIOG_REG),
            event_date: field(record, col::EVENT_DATE),
            institution_id: field(record, col::INSTITUTION_ID),
            recorded_by: field(record, col::RECORDED_BY),
            basis_of_record: field(record, col::BASIS_OF_RECORD),
            notes: field(record, col::NOTES),
        })
    }
}

/// One row of the molecular export (only the taxon prefix is read)
#[derive(Debug, Clone)]
pub struct MolecularRow {
    pub collection_id: String,
    pub genus: String,
    pub species: String,
    pub subspecies: String,
}

impl MolecularRow {
    pub fn from_record(record: &StringRecord, file: &str) -> ImportResult<Self> {
        use molecular_col as col;
        if record.len() < col::MIN_WIDTH {
            return Err(ImportError::SchemaMismatch {
                file: file.to_string(),
                schema: "molecular",
                row: record.position().map(|p| p.line()).unwrap_or(0),
                expected: col::MIN_WIDTH,
                found: record.len(),
            });
        }

        Ok(Self {
            collection_id: field(record, col::COLLECTION_ID),
            genus: field(record, col::GENUS),
            species: field(record, col::SPECIES),
            subspecies: field(record, col::SUBSPECIES),
        })
    }
}
