#![forbid(unsafe_code)]

use anyhow::{anyhow, Result};
use log::{error, info, LevelFilter};
use serde::Deserialize;
use std::{fs, path::Path};
use tera::Tera;

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

// Trails Utilities
use crate::trails::loader::ColumnLayout;
use crate::utils::{errors::Errors, trails_utils::get_absolute_path};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// All files and directories are relative to the working directory.
const CONFIG_DIR           : &str = "config";
const LOG4RS_CONFIG_FILE   : &str = "/log4rs.yml"; // relative to config dir
const TRAILS_CONFIG_FILE   : &str = "/trails.toml"; // relative to config dir

// Defaults.
const DEFAULT_TITLE        : &str = "Boulder Trails";
const DEFAULT_HTTP_PORT    : u16  = 8080;
const DEFAULT_DATA_FILE    : &str = "BoulderTrailHeads.csv";
const DEFAULT_TEMPLATE_DIR : &str = "templates";
const DEFAULT_STATIC_DIR   : &str = "static";
const DEFAULT_LOG_PATTERN  : &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

// The one template every deployment must provide.
pub const TRAILS_TEMPLATE  : &str = "trails.html";

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
/// Immutable state shared by every request.
#[derive(Debug)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub templates: Tera,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub http_port: u16,
    pub data_file: String,
    pub template_dir: String,
    pub static_dir: String,
    pub columns: ColumnLayout,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    /// Expand and absolutize every configured path.
    fn absolutize(mut self) -> Self {
        self.data_file = get_absolute_path(&self.data_file);
        self.template_dir = get_absolute_path(&self.template_dir);
        self.static_dir = get_absolute_path(&self.static_dir);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            data_file: DEFAULT_DATA_FILE.to_string(),
            template_dir: DEFAULT_TEMPLATE_DIR.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            columns: ColumnLayout::default(),
        }
    }
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs from config/log4rs.yml when that file exists, otherwise
 * log to the console at info level.
 */
pub fn init_log() -> Result<()> {
    let logconfig = CONFIG_DIR.to_string() + LOG4RS_CONFIG_FILE;
    if Path::new(&logconfig).is_file() {
        if let Err(e) = log4rs::init_file(&logconfig, Default::default()) {
            println!("{}", e);
            return Err(anyhow!(Errors::Log4rsInitialization(logconfig)));
        }
        info!("Log4rs initialized using: {}", logconfig);
    } else {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
            .build();
        let config = LogConfig::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
        log4rs::init_config(config)?;
        info!("Log4rs initialized with console defaults; {} not found.", logconfig);
    }
    Ok(())
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from config/trails.toml.  A missing
 * file means default values; an unparsable file is an error.
 */
pub fn get_parms() -> Result<Parms> {
    let config_file = get_absolute_path(&(CONFIG_DIR.to_string() + TRAILS_CONFIG_FILE));

    // Read the configuration file.
    info!("{}", Errors::ReadingConfigFile(config_file.clone()));
    let contents = match fs::read_to_string(&config_file) {
        Ok(c) => c,
        Err(_) => {
            info!("Unable to read configuration at {}. Using default values.", config_file);
            return Ok(Parms { config_file: Default::default(), config: Config::new().absolutize() });
        }
    };

    let config = parse_config(&config_file, &contents)?;
    Ok(Parms { config_file, config: config.absolutize() })
}

// ---------------------------------------------------------------------------
// parse_config:
// ---------------------------------------------------------------------------
fn parse_config(config_file: &str, contents: &str) -> Result<Config> {
    match toml::from_str(contents) {
        Ok(c) => Ok(c),
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file.to_string()), e);
            error!("{}", msg);
            Err(anyhow!(msg))
        }
    }
}

// ***************************************************************************
//                           Template Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_templates:
// ---------------------------------------------------------------------------
/** Compile every html template under the template directory.  The trails
 * template must be among them.
 */
pub fn init_templates(template_dir: &str) -> Result<Tera, Errors> {
    let pattern = format!("{}/**/*.html", template_dir.trim_end_matches('/'));
    let tera = Tera::new(&pattern)
        .map_err(|e| Errors::TemplateInit(pattern.clone(), e.to_string()))?;

    if !tera.get_template_names().any(|n| n == TRAILS_TEMPLATE) {
        return Err(Errors::TemplateInit(pattern, format!("{} not found", TRAILS_TEMPLATE)));
    }
    Ok(tera)
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
/** Read the parameters and compile the templates.  Either failing aborts
 * startup.
 */
pub fn init_runtime_context() -> Result<RuntimeCtx> {
    let parms = get_parms()?;
    if !parms.config_file.is_empty() {
        info!("Using configuration file {}.", parms.config_file);
    }
    let templates = init_templates(&parms.config.template_dir)?;
    Ok(RuntimeCtx { parms, templates })
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use crate::trails::loader::ColumnRef;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.data_file, "BoulderTrailHeads.csv");
        assert_eq!(config.columns, ColumnLayout::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config("trails.toml", "http_port = 9090\n[columns]\nname = \"THNAME\"\n").unwrap();
        assert_eq!(config.http_port, 9090);
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.columns.name, ColumnRef::Header("THNAME".into()));
        assert_eq!(config.columns.fee, ColumnRef::Index(9));
    }

    #[test]
    fn bad_toml_is_rejected() {
        let err = parse_config("trails.toml", "http_port = \"eighty\"").unwrap_err();
        assert!(err.to_string().contains("Unable to parse TOML file: trails.toml"));
    }

    #[test]
    fn repo_templates_compile() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");
        let tera = init_templates(dir).unwrap();
        assert!(tera.get_template_names().any(|n| n == TRAILS_TEMPLATE));
    }

    #[test]
    fn missing_trails_template_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("other.html"), "<p>hi</p>").unwrap();
        let err = init_templates(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Errors::TemplateInit(_, _)));
    }
}
