use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::Serialize;

use crate::config::{LocatorConfig, load_locator_config, write_config_template};
use crate::project::{ConfiguredLicense, License, Project, holds_path};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Yaml,
}

/// Everything `projgen locate` knows about a target.
#[derive(Debug, Clone, Serialize)]
pub struct LocateReport {
    pub name: String,
    pub root: PathBuf,
    pub command_dir: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub license: License,
}

impl LocateReport {
    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "name:         {}", self.name);
        let _ = writeln!(out, "root:         {}", self.root.display());
        let _ = writeln!(out, "command dir:  {}", display_opt(self.command_dir.as_deref()));
        let _ = writeln!(out, "source root:  {}", display_opt(self.source_root.as_deref()));
        let _ = writeln!(out, "license:      {}", self.license.name);
        out
    }
}

fn display_opt(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn locate(target: &str, license: Option<String>, format: ReportFormat) -> Result<()> {
    let config = load_locator_config()?;
    let Some(report) = build_report(target, license, &config)? else {
        bail!("a project name or absolute path is required (e.g. `projgen locate github.com/user/app`)");
    };

    match format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Yaml => {
            let yaml = serde_yaml::to_string(&report).context("serializing locate report")?;
            print!("{yaml}");
        }
    }
    Ok(())
}

/// Absolute paths resolve via [`Project::from_path`], anything else is a name.
pub fn build_report(
    target: &str,
    license: Option<String>,
    config: &LocatorConfig,
) -> Result<Option<LocateReport>> {
    let target = target.trim();
    let path = Path::new(target);
    let project = if path.is_absolute() {
        Project::from_path(path, config)?
    } else {
        Project::from_name(target, config)?
    };
    let Some(mut project) = project else {
        return Ok(None);
    };

    let resolver = ConfiguredLicense::new(license, config.license().cloned());
    Ok(Some(LocateReport {
        name: project.name().to_string(),
        root: project.root_path().to_path_buf(),
        command_dir: project.command_dir_path(config).map(Path::to_path_buf),
        source_root: project.source_root_path(config).map(Path::to_path_buf),
        license: project.license(&resolver).clone(),
    }))
}

pub fn list_roots() -> Result<()> {
    let config = load_locator_config()?;
    let cwd = std::env::current_dir().context("resolving current directory")?;
    print!("{}", render_roots(&config, &cwd));
    Ok(())
}

fn render_roots(config: &LocatorConfig, cwd: &Path) -> String {
    let active = config
        .source_roots()
        .iter()
        .position(|root| holds_path(root, cwd));

    let mut out = String::from("source roots:\n");
    for (idx, root) in config.source_roots().iter().enumerate() {
        let marker = if Some(idx) == active { "*" } else { " " };
        let _ = writeln!(out, "{marker} {}. {}", idx + 1, root.display());
    }
    let _ = writeln!(out, "command dirs: {}", config.command_dirs().join(", "));
    out
}

pub fn init_config() -> Result<()> {
    let cwd = std::env::current_dir().context("resolving current directory")?;
    match write_config_template(&cwd)? {
        Some(path) => println!("Created {}", path.display()),
        None => println!("projgen config already exists"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::config::{LicenseConfig, default_command_dirs};

    #[test]
    fn report_for_absolute_path_inside_root() {
        let tmp = tempdir().expect("temp dir");
        let root = tmp.path().join("go");
        let project = root.join("github.com/user/app");
        fs::create_dir_all(project.join("cmd")).expect("create cmd");
        let config = LocatorConfig::new(vec![root.clone()], default_command_dirs())
            .expect("config")
            .with_license(Some(LicenseConfig {
                name: "MIT".to_string(),
                text: Some("MIT header".to_string()),
                file: None,
            }));

        let report = build_report(project.to_str().expect("utf-8 path"), None, &config)
            .expect("report")
            .expect("project");
        assert_eq!(report.name, "github.com/user/app");
        assert_eq!(report.command_dir, Some(project.join("cmd")));
        assert_eq!(report.source_root, Some(root));
        assert_eq!(report.license.text, "MIT header");

        let text = report.render_text();
        assert!(text.contains("name:         github.com/user/app"));
        assert!(text.contains("license:      MIT"));
    }

    #[test]
    fn report_for_path_outside_roots_is_an_error() {
        let tmp = tempdir().expect("temp dir");
        let outside = tempdir().expect("outside dir");
        let config = LocatorConfig::new(vec![tmp.path().join("go")], default_command_dirs())
            .expect("config");

        let err = build_report(
            outside.path().to_str().expect("utf-8 path"),
            None,
            &config,
        )
        .unwrap_err();
        assert!(err.to_string().contains("within a configured source root"));
    }

    #[test]
    fn blank_target_has_no_report() {
        let tmp = tempdir().expect("temp dir");
        let config =
            LocatorConfig::new(vec![tmp.path().to_path_buf()], default_command_dirs())
                .expect("config");
        assert!(build_report("   ", None, &config).expect("report").is_none());
    }

    #[test]
    #[cfg(unix)]
    fn roots_listing_marks_root_containing_cwd() {
        let config = LocatorConfig::new(
            vec![PathBuf::from("/work/a"), PathBuf::from("/work/b")],
            vec!["cmd".to_string(), "commands".to_string()],
        )
        .expect("config");

        let rendered = render_roots(&config, Path::new("/work/b/project"));
        assert_eq!(
            rendered,
            "source roots:\n  1. /work/a\n* 2. /work/b\ncommand dirs: cmd, commands\n"
        );
    }
}
