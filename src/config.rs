use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::utils::path::clean_path;

const CONFIG_CANDIDATES: &[(&str, ConfigFormat)] = &[
    ("projgen.yml", ConfigFormat::Yaml),
    ("projgen.yaml", ConfigFormat::Yaml),
    ("projgen.toml", ConfigFormat::Toml),
];

/// Environment variable holding an OS path list of source roots.
pub const SOURCE_ROOTS_ENV: &str = "PROJGEN_PATH";

/// Command directory names recognised when nothing else is configured.
pub const DEFAULT_COMMAND_DIRS: &[&str] = &["cmd", "cmds", "command", "commands"];

const CONFIG_TEMPLATE: &str = r#"# Workspace roots searched for projects, highest priority first.
# Overridden by the PROJGEN_PATH environment variable.
source_roots:
  - ~/src

# Directory names treated as the home of command sources.
command_dirs:
  - cmd
  - cmds
  - command
  - commands

# License embedded in generated file headers. Set `name` and either `text`
# or `file` (relative to this config) to embed one.
license:
  name: None
"#;

#[derive(Debug, Clone)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

#[derive(Debug, Clone)]
pub struct LoadedFileConfig {
    pub path: PathBuf,
    pub data: FileConfig,
}

impl LoadedFileConfig {
    fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,
    #[serde(default)]
    pub command_dirs: Vec<String>,
    #[serde(default)]
    pub license: Option<LicenseConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LicenseConfig {
    pub name: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Resolved, validated settings the project locator works from.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    source_roots: Vec<PathBuf>,
    command_dirs: Vec<String>,
    license: Option<LicenseConfig>,
}

impl LocatorConfig {
    pub fn new(source_roots: Vec<PathBuf>, command_dirs: Vec<String>) -> Result<Self> {
        if source_roots.is_empty() {
            bail!("at least one source root must be configured");
        }
        if let Some(relative) = source_roots.iter().find(|root| !root.is_absolute()) {
            bail!(
                "source root `{}` is not an absolute path",
                relative.display()
            );
        }
        if command_dirs.is_empty() {
            bail!("at least one command directory name must be configured");
        }
        Ok(Self {
            source_roots: source_roots.iter().map(|root| clean_path(root)).collect(),
            command_dirs,
            license: None,
        })
    }

    pub fn with_license(mut self, license: Option<LicenseConfig>) -> Self {
        self.license = license;
        self
    }

    pub fn source_roots(&self) -> &[PathBuf] {
        &self.source_roots
    }

    pub fn first_source_root(&self) -> &Path {
        // `new` refuses an empty list.
        &self.source_roots[0]
    }

    pub fn command_dirs(&self) -> &[String] {
        &self.command_dirs
    }

    pub fn license(&self) -> Option<&LicenseConfig> {
        self.license.as_ref()
    }
}

pub fn default_command_dirs() -> Vec<String> {
    DEFAULT_COMMAND_DIRS.iter().map(|name| name.to_string()).collect()
}

/// Build the effective configuration for the current process.
pub fn load_locator_config() -> Result<LocatorConfig> {
    let current_dir = std::env::current_dir().context("resolving current directory for config")?;
    let file = load_file_config_from_dir(&current_dir)?;
    resolve_locator_config(
        file.as_ref(),
        std::env::var_os(SOURCE_ROOTS_ENV),
        dirs::home_dir(),
    )
}

pub fn resolve_locator_config(
    file: Option<&LoadedFileConfig>,
    env_roots: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<LocatorConfig> {
    let mut source_roots: Vec<PathBuf> = env_roots
        .as_deref()
        .map(|raw| {
            std::env::split_paths(raw)
                .filter(|path| !path.as_os_str().is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if source_roots.is_empty() {
        if let Some(file) = file {
            source_roots = file
                .data
                .source_roots
                .iter()
                .map(|root| resolve_config_path(file.base_dir(), root, home.as_deref()))
                .collect();
        }
    }

    if source_roots.is_empty() {
        let Some(home) = home else {
            bail!(
                "no source roots configured and the home directory is unknown; set {SOURCE_ROOTS_ENV} or add `source_roots` to projgen.yml"
            );
        };
        source_roots.push(home.join("src"));
    }

    let command_dirs = file
        .map(|file| file.data.command_dirs.clone())
        .filter(|dirs| !dirs.is_empty())
        .unwrap_or_else(default_command_dirs);

    let license = match file.and_then(|file| file.data.license.clone().map(|lic| (file, lic))) {
        Some((file, lic)) => Some(load_license_text(file, lic)?),
        None => None,
    };

    Ok(LocatorConfig::new(source_roots, command_dirs)?.with_license(license))
}

fn resolve_config_path(base_dir: &Path, raw: &Path, home: Option<&Path>) -> PathBuf {
    if let (Ok(rest), Some(home)) = (raw.strip_prefix("~"), home) {
        return home.join(rest);
    }
    if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        base_dir.join(raw)
    }
}

fn load_license_text(file: &LoadedFileConfig, mut lic: LicenseConfig) -> Result<LicenseConfig> {
    if lic.text.is_some() {
        return Ok(lic);
    }
    if let Some(header) = lic.file.as_deref() {
        let path = resolve_config_path(file.base_dir(), header, None);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading license header at {}", path.display()))?;
        lic.text = Some(text);
    }
    Ok(lic)
}

pub fn load_file_config_from_dir(base_dir: &Path) -> Result<Option<LoadedFileConfig>> {
    for (file, format) in CONFIG_CANDIDATES {
        let path = base_dir.join(file);
        if !path.exists() {
            continue;
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading projgen config at {}", path.display()))?;
        let data = match format {
            ConfigFormat::Yaml => parse_yaml_str(&content)
                .with_context(|| format!("parsing YAML config at {}", path.display()))?,
            ConfigFormat::Toml => parse_toml_str(&content)
                .with_context(|| format!("parsing TOML config at {}", path.display()))?,
        };
        return Ok(Some(LoadedFileConfig { path, data }));
    }
    Ok(None)
}

/// Write a starter `projgen.yml` unless a config file is already present.
pub fn write_config_template(base_dir: &Path) -> Result<Option<PathBuf>> {
    if CONFIG_CANDIDATES
        .iter()
        .any(|(file, _)| base_dir.join(file).exists())
    {
        return Ok(None);
    }
    let path = base_dir.join(CONFIG_CANDIDATES[0].0);
    fs::write(&path, CONFIG_TEMPLATE.as_bytes())
        .with_context(|| format!("writing config template at {}", path.display()))?;
    Ok(Some(path))
}

pub(crate) fn parse_yaml_str(content: &str) -> Result<FileConfig> {
    Ok(serde_yaml::from_str(content)?)
}

pub(crate) fn parse_toml_str(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}
