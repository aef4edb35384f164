#![forbid(unsafe_code)]

use thiserror::Error;

/// Error enumerates the errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("trails_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Inaccessible logger configuration file.
    #[error("Unable to access the Log4rs configuration file: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),

    // ----- Dataset loading -----
    #[error("Unable to open trails dataset {}: {}", .path, .source)]
    DatasetOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed trails dataset at row {}: {}", .row, .msg)]
    DatasetParse { row: u64, msg: String },

    #[error("Trails dataset row {} has {} fields, column {} is out of range", .row, .len, .column)]
    ShortRow { row: u64, column: usize, len: usize },

    /// A configured header name is not present in the dataset's header row.
    #[error("Required column '{}' is missing from the dataset header", .0)]
    MissingColumn(String),

    /// A positional column lies beyond the dataset's header row.
    #[error("Column '{}' at index {} is beyond the {} columns of the dataset header", .field, .index, .width)]
    ColumnOutOfRange { field: &'static str, index: usize, width: usize },

    // ----- Requests -----
    #[error("Unable to read trails form: {}", .0)]
    FormDecode(String),

    // ----- Rendering -----
    #[error("Unable to load templates from {}: {}", .0, .1)]
    TemplateInit(String, String),

    #[error("Unable to render template {}: {}", .0, .1)]
    TemplateRender(String, String),
}
