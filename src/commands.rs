pub mod check;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::SourceArgs;
use crate::config::TagpressConfig;

/// Load the config named by the arguments and apply command line overrides.
fn load_config(
    args: &SourceArgs,
    output: Option<&Path>,
) -> Result<TagpressConfig, anyhow::Error> {
    let config = TagpressConfig::load_from_arg(args.config_file.as_deref())
        .context("failed to load configuration")?;

    let cwd = std::env::current_dir().context("failed to get current working directory")?;
    Ok(apply_overrides(config, args, output, &cwd))
}

/// Apply `--index`, `--script` and `--output`.
///
/// Override paths are relative to `cwd`, not to the config file.
fn apply_overrides(
    mut config: TagpressConfig,
    args: &SourceArgs,
    output: Option<&Path>,
    cwd: &Path,
) -> TagpressConfig {
    let absolute = |path: &Path| -> PathBuf {
        if path.is_relative() {
            cwd.join(path)
        } else {
            path.to_path_buf()
        }
    };

    if let Some(index) = &args.index {
        config.index = absolute(index);
    }
    if let Some(script) = &args.script {
        config.script.source = absolute(script);
    }
    if let Some(output) = output {
        config.output = Some(absolute(output));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_args(config_file: Option<PathBuf>) -> SourceArgs {
        SourceArgs {
            config_file,
            index: None,
            script: None,
        }
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = TagpressConfig::default().resolve_paths(Path::new("/site"));
        let args = source_args(None);

        let config = apply_overrides(config, &args, None, Path::new("/work"));

        assert_eq!(config.index, PathBuf::from("/site/docs/index.html"));
        assert_eq!(config.script.source, PathBuf::from("/site/dev_script.txt"));
        assert!(config.output.is_none());
    }

    #[test]
    fn test_overrides_resolve_against_cwd() {
        let config = TagpressConfig::default().resolve_paths(Path::new("/site"));
        let args = SourceArgs {
            index: Some(PathBuf::from("public/index.html")),
            script: Some(PathBuf::from("/opt/dev.js")),
            ..source_args(None)
        };

        let config = apply_overrides(config, &args, Some(Path::new("out/index.html")), Path::new("/work"));

        assert_eq!(config.index, PathBuf::from("/work/public/index.html"));
        assert_eq!(config.script.source, PathBuf::from("/opt/dev.js"));
        assert_eq!(config.output, Some(PathBuf::from("/work/out/index.html")));
        assert_eq!(config.output_path(), &PathBuf::from("/work/out/index.html"));
    }

    #[test]
    fn test_load_config_mixes_file_and_cli_paths() {
        let dir = std::env::temp_dir().join(format!("tagpress-cli-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let config_file = dir.join("tagpress.yaml");
        std::fs::write(&config_file, "index: site/index.html\nscript:\n  source: dev.js\n").unwrap();

        let args = SourceArgs {
            script: Some(PathBuf::from("other.js")),
            ..source_args(Some(config_file))
        };
        let config = load_config(&args, Some(Path::new("out.html"))).unwrap();

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.index, dir.join("site/index.html"));
        assert_eq!(config.script.source, cwd.join("other.js"));
        assert_eq!(config.output, Some(cwd.join("out.html")));
    }
}
