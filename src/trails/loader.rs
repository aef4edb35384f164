#![forbid(unsafe_code)]

use std::fs::File;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use log::debug;
use serde::Deserialize;

use crate::trails::model::{is_yes, Difficulty, Trail};
use crate::utils::errors::Errors;

// ***************************************************************************
//                               Column Layout
// ***************************************************************************
// ---------------------------------------------------------------------------
// ColumnRef:
// ---------------------------------------------------------------------------
/// A dataset column named either by its 0-based position or by its header
/// text.  In TOML an integer selects a position and a string selects a header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Header(String),
}

// ---------------------------------------------------------------------------
// ColumnLayout:
// ---------------------------------------------------------------------------
/// Where each trail attribute lives in the dataset.  The default is the
/// column order of the published trailheads file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub name: ColumnRef,
    pub access_type: ColumnRef,
    pub restrooms: ColumnRef,
    pub picnic: ColumnRef,
    pub fishing: ColumnRef,
    pub address: ColumnRef,
    pub fee: ColumnRef,
    pub bike_rack: ColumnRef,
    pub class_code: ColumnRef,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            name: ColumnRef::Index(29),
            access_type: ColumnRef::Index(6),
            restrooms: ColumnRef::Index(1),
            picnic: ColumnRef::Index(2),
            fishing: ColumnRef::Index(3),
            address: ColumnRef::Index(8),
            fee: ColumnRef::Index(9),
            bike_rack: ColumnRef::Index(10),
            class_code: ColumnRef::Index(7),
        }
    }
}

/// Column indices checked against a concrete header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedColumns {
    name: usize,
    access_type: usize,
    restrooms: usize,
    picnic: usize,
    fishing: usize,
    address: usize,
    fee: usize,
    bike_rack: usize,
    class_code: usize,
}

impl ColumnLayout {
    fn resolve(&self, header: &StringRecord) -> Result<ResolvedColumns, Errors> {
        Ok(ResolvedColumns {
            name: resolve_column("name", &self.name, header)?,
            access_type: resolve_column("access_type", &self.access_type, header)?,
            restrooms: resolve_column("restrooms", &self.restrooms, header)?,
            picnic: resolve_column("picnic", &self.picnic, header)?,
            fishing: resolve_column("fishing", &self.fishing, header)?,
            address: resolve_column("address", &self.address, header)?,
            fee: resolve_column("fee", &self.fee, header)?,
            bike_rack: resolve_column("bike_rack", &self.bike_rack, header)?,
            class_code: resolve_column("class_code", &self.class_code, header)?,
        })
    }
}

impl ResolvedColumns {
    fn to_trail(self, record: &StringRecord) -> Result<Trail, Errors> {
        Ok(Trail {
            name: field(record, self.name)?.to_string(),
            access_type: field(record, self.access_type)?.to_string(),
            restrooms: is_yes(field(record, self.restrooms)?),
            picnic: is_yes(field(record, self.picnic)?),
            fishing: is_yes(field(record, self.fishing)?),
            address: field(record, self.address)?.to_string(),
            fee: is_yes(field(record, self.fee)?),
            bike_rack: is_yes(field(record, self.bike_rack)?),
            difficulty: Difficulty::from_class_code(field(record, self.class_code)?)
                .label()
                .to_string(),
        })
    }
}

// ***************************************************************************
//                             Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// load_trails:
// ---------------------------------------------------------------------------
/** Read the whole dataset at path.  The file is opened and parsed on every
 * call; nothing is cached.
 */
pub fn load_trails(path: &str, layout: &ColumnLayout) -> Result<Vec<Trail>, Errors> {
    let file = File::open(path).map_err(|e| Errors::DatasetOpen {
        path: path.to_string(),
        source: e,
    })?;
    let trails = read_trails(file, layout)?;
    debug!("Loaded {} trails from {}", trails.len(), path);
    Ok(trails)
}

// ---------------------------------------------------------------------------
// read_trails:
// ---------------------------------------------------------------------------
/** Parse CSV text into trails in file order.  The first row is the header and
 * only serves to resolve the column layout.  Every row must have as many
 * fields as the header.
 */
pub fn read_trails<R: Read>(rdr: R, layout: &ColumnLayout) -> Result<Vec<Trail>, Errors> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(rdr);

    let header = reader.headers().map_err(parse_error)?.clone();
    let columns = layout.resolve(&header)?;

    let mut trails = vec![];
    for result in reader.records() {
        let record = result.map_err(parse_error)?;
        trails.push(columns.to_trail(&record)?);
    }

    Ok(trails)
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
fn resolve_column(field: &'static str, col: &ColumnRef, header: &StringRecord) -> Result<usize, Errors> {
    match col {
        ColumnRef::Index(index) => {
            if *index < header.len() {
                Ok(*index)
            } else {
                Err(Errors::ColumnOutOfRange { field, index: *index, width: header.len() })
            }
        }
        ColumnRef::Header(name) => header
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name.as_str())
            .ok_or_else(|| Errors::MissingColumn(name.clone())),
    }
}

// Guard only: the reader rejects rows narrower than the header.
fn field(record: &StringRecord, column: usize) -> Result<&str, Errors> {
    record.get(column).ok_or_else(|| Errors::ShortRow {
        row: record.position().map(|p| p.line()).unwrap_or(0),
        column,
        len: record.len(),
    })
}

fn parse_error(e: csv::Error) -> Errors {
    let row = e.position().map(|p| p.line()).unwrap_or(0);
    Errors::DatasetParse { row, msg: e.to_string() }
}
