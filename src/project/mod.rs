//! Locating a scaffolding target on disk.
//!
//! A [`Project`] is built either from a logical name (`github.com/user/repo`)
//! searched across the configured source roots, or from an absolute path that
//! must live beneath one of them. Derived paths are resolved on first use and
//! cached on the descriptor.

pub mod command_dir;
pub mod license;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::LocatorConfig;
use crate::utils::path::{clean_path, clean_relative, to_slash};
pub use command_dir::find_command_dir_name;
pub use license::{ConfiguredLicense, License, LicenseResolver};

#[derive(Debug, Error)]
pub enum LocateError {
    #[error(
        "projgen only supports projects located within a configured source root (`{}` is not under any of them)",
        .path.display()
    )]
    OutsideSourceRoots { path: PathBuf },

    #[error("cannot read the current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Name, paths and license of one scaffolding target.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    root_path: PathBuf,
    command_dir_path: Option<PathBuf>,
    source_root_path: Option<PathBuf>,
    license: License,
}

impl Project {
    fn at(name: String, root_path: PathBuf) -> Self {
        Self {
            name,
            root_path,
            command_dir_path: None,
            source_root_path: None,
            license: License::default(),
        }
    }

    /// Locate `project_name` relative to the process working directory.
    ///
    /// `Ok(None)` for a blank name. See [`Project::from_name_in`] for how the
    /// name is cleaned.
    pub fn from_name(project_name: &str, config: &LocatorConfig) -> Result<Option<Self>, LocateError> {
        if project_name.is_empty() {
            return Ok(None);
        }
        let cwd = std::env::current_dir().map_err(LocateError::CurrentDir)?;
        Self::from_name_in(project_name, &cwd, config)
    }

    /// Resolution order: an existing `<root>/<name>` under any source root,
    /// then `<root>/src/<name>` for the root containing `cwd`, then
    /// `<first root>/<name>`.
    ///
    /// The name is cleaned lexically first. Leading separators are dropped, so
    /// `/github.com/user/app` resolves like `github.com/user/app`. A name that
    /// is blank after cleaning yields `Ok(None)`; one that climbs out through
    /// `..` is [`LocateError::OutsideSourceRoots`].
    pub fn from_name_in(
        project_name: &str,
        cwd: &Path,
        config: &LocatorConfig,
    ) -> Result<Option<Self>, LocateError> {
        let relative = clean_relative(Path::new(project_name));
        let Some(name) = to_slash(&relative) else {
            return Err(LocateError::OutsideSourceRoots {
                path: clean_path(&config.first_source_root().join(&relative)),
            });
        };
        if name == "." {
            return Ok(None);
        }

        if let Some(existing) = find_existing(&relative, config) {
            debug!(project = %name, root = %existing.display(), "found existing project");
            return Ok(Some(Self::at(name, existing)));
        }

        let cwd = clean_path(cwd);
        if let Some(source_root) = config
            .source_roots()
            .iter()
            .find(|root| holds_path(root, &cwd))
        {
            let root_path = source_root.join("src").join(&relative);
            debug!(
                project = %name,
                source_root = %source_root.display(),
                "working directory is inside a source root"
            );
            return Ok(Some(Self::at(name, root_path)));
        }

        let root_path = config.first_source_root().join(&relative);
        debug!(project = %name, root = %root_path.display(), "falling back to first source root");
        Ok(Some(Self::at(name, root_path)))
    }

    /// Build from an absolute path, stripping a trailing command directory.
    ///
    /// `.` and `..` are resolved lexically before anything else, so a path
    /// that climbs out of every source root is rejected. `Ok(None)` for a
    /// blank or relative path.
    pub fn from_path(abs_path: &Path, config: &LocatorConfig) -> Result<Option<Self>, LocateError> {
        if abs_path.as_os_str().is_empty() || !abs_path.is_absolute() {
            return Ok(None);
        }

        let abs_path = clean_path(abs_path);
        let command_dir = find_command_dir_name(&abs_path, config.command_dirs());
        let root_path = match abs_path.parent() {
            Some(parent) if abs_path.file_name().is_some_and(|base| base == command_dir) => {
                parent.to_path_buf()
            }
            _ => abs_path.clone(),
        };

        let mut project = Self::at(String::new(), root_path);
        let source_root = project.source_root_path(config).map(Path::to_path_buf);
        let name = source_root.and_then(|source_root| slash_relative(&source_root, &project.root_path));
        let Some(name) = name else {
            return Err(LocateError::OutsideSourceRoots {
                path: project.root_path,
            });
        };
        project.name = name;
        info!(name = %project.name, root = %project.root_path.display(), "located project from path");
        Ok(Some(project))
    }

    /// Logical name, e.g. `github.com/user/repo`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// `root_path` joined with the detected command directory name.
    pub fn command_dir_path(&mut self, config: &LocatorConfig) -> Option<&Path> {
        if self.root_path.as_os_str().is_empty() {
            return None;
        }
        if self.command_dir_path.is_none() {
            let dir = find_command_dir_name(&self.root_path, config.command_dirs());
            self.command_dir_path = Some(self.root_path.join(dir));
        }
        self.command_dir_path.as_deref()
    }

    /// First configured source root containing `root_path`.
    ///
    /// `None` when no root contains it; that result is not cached so a later
    /// call with a different configuration can still succeed.
    pub fn source_root_path(&mut self, config: &LocatorConfig) -> Option<&Path> {
        if self.source_root_path.is_none() {
            self.source_root_path = if self.root_path.as_os_str().is_empty() {
                Some(config.first_source_root().to_path_buf())
            } else {
                config
                    .source_roots()
                    .iter()
                    .find(|root| self.root_path.starts_with(root))
                    .cloned()
            };
        }
        self.source_root_path.as_deref()
    }

    /// Ask `resolver` only while nothing has been resolved and the user has
    /// not opted out.
    pub fn license(&mut self, resolver: &dyn LicenseResolver) -> &License {
        if self.license.is_unresolved() {
            self.license = resolver.resolve();
        }
        &self.license
    }
}

fn find_existing(relative: &Path, config: &LocatorConfig) -> Option<PathBuf> {
    config
        .source_roots()
        .iter()
        .map(|root| root.join(relative))
        .find(|candidate| candidate.is_dir())
}

/// Whether `path` sits under `root`, also through `root`'s canonical form.
///
/// The OS hands back the working directory canonicalised, so a root reached
/// through a symlink only matches it that way.
pub(crate) fn holds_path(root: &Path, path: &Path) -> bool {
    path.starts_with(root)
        || root
            .canonicalize()
            .is_ok_and(|canonical| path.starts_with(canonical))
}

/// Forward-slash path of `path` below `base`; `None` when it is not below.
fn slash_relative(base: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(base).ok().and_then(to_slash)
}
