use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config};
use crate::prompt::prompt_yes_no;

/// Outcome of [`write_default_config`]
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Written(PathBuf),
    Aborted,
}

/// Render the built-in defaults as YAML, with a short header.
pub fn default_config_yaml() -> Result<String> {
    let yaml = serde_saphyr::to_string(&Config::default())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
    Ok(format!(
        "# eco-dash configuration\n# Add a `location:` section with latitude/longitude to skip the London default.\n{}",
        yaml
    ))
}

/// Write the default config to `path` (or the default location).
///
/// An existing file is only replaced when `force` is set or the user confirms.
pub fn write_default_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    path: Option<PathBuf>,
    force: bool,
) -> Result<InitOutcome> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() && !force {
        let overwrite = prompt_yes_no(
            input,
            output,
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            return Ok(InitOutcome::Aborted);
        }
    }

    write_config_file(&config_path, &default_config_yaml()?)?;
    Ok(InitOutcome::Written(config_path))
}

fn write_config_file(config_path: &Path, yaml: &str) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(config_path, yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_default_yaml_parses_back() {
        let yaml = default_config_yaml().unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_writes_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let outcome =
            write_default_config(&mut input, &mut output, Some(path.clone()), false).unwrap();

        assert_eq!(outcome, InitOutcome::Written(path.clone()));
        assert!(path.exists());
    }

    #[test]
    fn test_existing_file_kept_when_declined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "theme: dark\n").unwrap();
        let mut input = Cursor::new("n\n");
        let mut output = Vec::new();

        let outcome =
            write_default_config(&mut input, &mut output, Some(path.clone()), false).unwrap();

        assert_eq!(outcome, InitOutcome::Aborted);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "theme: dark\n");
    }

    #[test]
    fn test_force_overwrites_without_asking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "theme: dark\n").unwrap();
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        write_default_config(&mut input, &mut output, Some(path.clone()), true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("humidity_placeholder"));
        assert!(output.is_empty());
    }
}
