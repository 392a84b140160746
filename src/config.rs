//! # Project Configuration
//!
//! This module loads the INI project file that describes a Yocto workspace:
//! where to create it, which repositories make up its layers, and where to
//! send the completion notification.
//!
//! ## File Layout
//!
//! ```ini
//! [globalconfig]
//! project = zynqberry-demo
//! work = v_yocto
//!
//! [yocto]
//! repo_yocto = https://git.yoctoproject.org/git/poky
//! branch = rocko
//!
//! [xilinx]
//! repo_xilinx = https://github.com/Xilinx/
//! branch = rel-v2018.1
//!
//! [zynqberry]
//! repo_zynqberry = https://github.com/example/
//! branch = master
//!
//! [notification]
//! api_key = 0123456789abcdef
//! channel_name = builds
//! ```
//!
//! ## Schema
//!
//! Every recognized section is declared once in [`SCHEMAS`] as a list of
//! `(key, default)` pairs. Loading is a single generic pass: each section found
//! in the file is looked up in the schema table and its key/value pairs are
//! merged over the declared defaults. Unknown keys inside a known section are
//! kept as-is; unknown sections are rejected.
//!
//! Parsing ([`parse`]) is pure. Only [`load`] touches the filesystem, and only
//! to read the file.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use log::debug;

use crate::error::{Error, Result};

/// Section holding project-wide settings.
pub const GLOBAL_SECTION: &str = "globalconfig";
/// Section describing the base distribution layer (poky).
pub const BASE_SECTION: &str = "yocto";
/// Section describing the hardware vendor overlays.
pub const VENDOR_SECTION: &str = "xilinx";
/// Section describing the board support overlay.
pub const BOARD_SECTION: &str = "zynqberry";
/// Section holding push notification credentials.
pub const NOTIFICATION_SECTION: &str = "notification";

/// Default location of the project file, relative to the invocation directory.
pub const DEFAULT_INI_PATH: &str = "config/config.ini";

/// Default Pushetta API root used when `[notification]` has no `endpoint`.
pub const DEFAULT_PUSH_ENDPOINT: &str = "http://api.pushetta.com/api/pushes/";

/// Declared shape of one INI section: its name and its keys with defaults.
#[derive(Debug, Clone, Copy)]
pub struct SectionSchema {
    pub name: &'static str,
    pub fields: &'static [(&'static str, &'static str)],
}

/// The five sections a project file may contain.
pub const SCHEMAS: &[SectionSchema] = &[
    SectionSchema {
        name: GLOBAL_SECTION,
        fields: &[("project", ""), ("work", "v_yocto")],
    },
    SectionSchema {
        name: BASE_SECTION,
        fields: &[("repo_yocto", ""), ("branch", "")],
    },
    SectionSchema {
        name: VENDOR_SECTION,
        fields: &[("repo_xilinx", ""), ("branch", "")],
    },
    SectionSchema {
        name: BOARD_SECTION,
        fields: &[("repo_zynqberry", ""), ("branch", "")],
    },
    SectionSchema {
        name: NOTIFICATION_SECTION,
        fields: &[
            ("api_key", ""),
            ("channel_name", ""),
            ("endpoint", DEFAULT_PUSH_ENDPOINT),
        ],
    },
];

/// Looks up the schema for a section name. Names are case-sensitive.
pub fn schema_for(name: &str) -> Option<&'static SectionSchema> {
    SCHEMAS.iter().find(|schema| schema.name == name)
}

/// The merged key/value pairs of one section.
///
/// Starts out holding the schema defaults; values read from the file
/// overwrite them or add new keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    values: BTreeMap<String, String>,
}

impl Section {
    /// Create a section pre-filled with the schema defaults.
    pub fn from_schema(schema: &SectionSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|(key, default)| (key.to_string(), default.to_string()))
            .collect();
        Self { values }
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Insert or overwrite a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Iterate over all keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys in the section.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the section holds no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn value(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }
}

/// All five sections after merging the file over the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    sections: HashMap<&'static str, Section>,
}

impl Sections {
    /// Every section at its default values.
    pub fn defaults() -> Self {
        let sections = SCHEMAS
            .iter()
            .map(|schema| (schema.name, Section::from_schema(schema)))
            .collect();
        Self { sections }
    }

    /// Get a section by name.
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    fn take(&mut self, name: &str) -> Section {
        self.sections.remove(name).unwrap_or_default()
    }
}

/// `[globalconfig]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    pub project: String,
    /// Folder created to hold every cloned repository.
    pub work_directory: PathBuf,
    /// Every key of the section, including ones not modelled above.
    pub raw: Section,
}

impl From<Section> for GlobalConfig {
    fn from(raw: Section) -> Self {
        Self {
            project: raw.value("project"),
            work_directory: PathBuf::from(raw.value("work")),
            raw,
        }
    }
}

/// `[yocto]`, `[xilinx]` and `[zynqberry]` share this shape; only the key
/// holding the repository URL differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerConfig {
    pub repository_url: String,
    pub branch: String,
    pub raw: Section,
}

impl LayerConfig {
    fn from_section(raw: Section, url_key: &str) -> Self {
        Self {
            repository_url: raw.value(url_key),
            branch: raw.value("branch"),
            raw,
        }
    }
}

/// `[notification]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    pub api_key: String,
    pub channel_name: String,
    /// API root the channel name is appended to.
    pub endpoint: String,
    pub raw: Section,
}

impl From<Section> for NotificationConfig {
    fn from(raw: Section) -> Self {
        Self {
            api_key: raw.value("api_key"),
            channel_name: raw.value("channel_name"),
            endpoint: raw.value("endpoint"),
            raw,
        }
    }
}

/// The three repository layers a workspace is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Base,
    Vendor,
    Board,
}

impl Layer {
    /// INI section that configures this layer.
    pub fn section_name(self) -> &'static str {
        match self {
            Layer::Base => BASE_SECTION,
            Layer::Vendor => VENDOR_SECTION,
            Layer::Board => BOARD_SECTION,
        }
    }

    /// Key within the section that holds the repository URL.
    pub fn url_key(self) -> &'static str {
        match self {
            Layer::Base => "repo_yocto",
            Layer::Vendor => "repo_xilinx",
            Layer::Board => "repo_zynqberry",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}

/// A fully loaded project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub global: GlobalConfig,
    pub base: LayerConfig,
    pub vendor: LayerConfig,
    pub board: LayerConfig,
    pub notification: NotificationConfig,
}

impl ProjectConfig {
    /// Build the typed view from merged sections.
    pub fn from_sections(mut sections: Sections) -> Self {
        Self {
            global: sections.take(GLOBAL_SECTION).into(),
            base: LayerConfig::from_section(sections.take(BASE_SECTION), Layer::Base.url_key()),
            vendor: LayerConfig::from_section(
                sections.take(VENDOR_SECTION),
                Layer::Vendor.url_key(),
            ),
            board: LayerConfig::from_section(sections.take(BOARD_SECTION), Layer::Board.url_key()),
            notification: sections.take(NOTIFICATION_SECTION).into(),
        }
    }

    /// The settings for one layer.
    pub fn layer(&self, layer: Layer) -> &LayerConfig {
        match layer {
            Layer::Base => &self.base,
            Layer::Vendor => &self.vendor,
            Layer::Board => &self.board,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::from_sections(Sections::defaults())
    }
}

/// Parse INI content and merge it over the schema defaults.
pub fn parse_sections(content: &str) -> Result<Sections> {
    parse_sections_from(content, "<input>")
}

/// Parse INI content into a [`ProjectConfig`] without touching the filesystem.
pub fn parse(content: &str) -> Result<ProjectConfig> {
    parse_sections(content).map(ProjectConfig::from_sections)
}

/// Load a project file from disk.
///
/// Fails with [`Error::ConfigNotFound`] before any parsing if `path` does not
/// exist.
pub fn load(path: &Path) -> Result<ProjectConfig> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let source = path.display().to_string();
    parse_sections_from(&content, &source).map(ProjectConfig::from_sections)
}

fn parse_sections_from(content: &str, source: &str) -> Result<Sections> {
    // Values such as URLs are taken literally.
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, options).map_err(|e| Error::ConfigParse {
        message: format!("{} in {}", e, source),
    })?;

    let mut sections = Sections::defaults();
    for (name, properties) in ini.iter() {
        let Some(name) = name else {
            if properties.is_empty() {
                continue;
            }
            return Err(Error::ConfigSyntax {
                message: format!("Entries found before any section header in {}", source),
                hint: Some("Start the file with a section such as [globalconfig]".to_string()),
            });
        };

        let Some(schema) = schema_for(name) else {
            return Err(Error::ConfigSyntax {
                message: format!("Unknown section {} in {}", name, source),
                hint: Some(format!(
                    "Known sections: {}",
                    SCHEMAS.iter().map(|s| s.name).collect::<Vec<_>>().join(", ")
                )),
            });
        };

        let section = sections
            .sections
            .entry(schema.name)
            .or_insert_with(|| Section::from_schema(schema));
        for (key, value) in properties.iter() {
            debug!("[{}] {} = {}", name, key, value.trim());
            section.set(key, value.trim());
        }
    }

    Ok(sections)
}
