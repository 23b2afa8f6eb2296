//! Shell configuration.
//!
//! Read from an optional TOML file (`flowdeck.toml` in the working
//! directory, or an explicit path) and then from `FLOWDECK_*` environment
//! variables, which win. Nested keys use `__`, e.g.
//! `FLOWDECK_EDITOR__NODE_WIDTH=200`.

use crate::cli::Args;
use crate::error::ShellError;
use flowdeck_editor::EditorSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// JSON array of node type definitions.
    pub catalog_path: PathBuf,

    /// A previously saved workflow to open. Starts empty when unset.
    #[serde(default)]
    pub workflow_path: Option<PathBuf>,

    /// JSON array of editor commands to replay.
    pub script_path: PathBuf,

    /// Where to write the last saved workflow. Stdout when unset.
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Use `node_1`, `edge_1`, ... instead of ULID-based ids.
    #[serde(default)]
    pub sequential_ids: bool,

    #[serde(default)]
    pub editor: EditorSettings,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl ShellConfig {
    /// Loads configuration from the file named in `args` (or `flowdeck.toml`
    /// if present), the environment, and the path overrides in `args`.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, a source cannot be
    /// parsed, a required key is absent, or the editor settings are invalid.
    pub fn load(args: &Args) -> Result<Self, ShellError> {
        let file_source = match args.config.as_deref() {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("flowdeck").required(false),
        };
        let config: Self = config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix("FLOWDECK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("catalog_path", path_value(args.catalog.as_deref()))?
            .set_override_option("workflow_path", path_value(args.workflow.as_deref()))?
            .set_override_option("script_path", path_value(args.script.as_deref()))?
            .set_override_option("output_path", path_value(args.output.as_deref()))?
            .build()?
            .try_deserialize()?;
        config.editor.validate()?;
        Ok(config)
    }
}

fn path_value(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    fn with_file(file: &tempfile::NamedTempFile) -> Args {
        Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        }
    }

    #[test]
    fn loads_file_with_defaults() {
        let file = toml_file(
            r#"
            catalog_path = "catalog.json"
            script_path = "script.json"
            "#,
        );
        let config = ShellConfig::load(&with_file(&file)).expect("config");
        assert_eq!(config.catalog_path, PathBuf::from("catalog.json"));
        assert!(config.workflow_path.is_none());
        assert!(config.output_path.is_none());
        assert_eq!(config.log_filter, "info");
        assert!(!config.sequential_ids);
        assert_eq!(config.editor, EditorSettings::default());
    }

    #[test]
    fn editor_table_overrides_settings() {
        let file = toml_file(
            r#"
            catalog_path = "catalog.json"
            script_path = "script.json"

            [editor]
            node_width = 200.0
            "#,
        );
        let config = ShellConfig::load(&with_file(&file)).expect("config");
        assert_eq!(config.editor.node_width, 200.0);
        assert_eq!(config.editor.node_height, 60.0);
    }

    #[test]
    fn missing_required_key_is_an_error() {
        let file = toml_file(r#"catalog_path = "catalog.json""#);
        let err = ShellConfig::load(&with_file(&file)).unwrap_err();
        assert!(matches!(err, ShellError::Config { .. }));
    }

    #[test]
    fn arguments_override_file_paths() {
        let file = toml_file(r#"catalog_path = "catalog.json""#);
        let args = Args {
            script: Some(PathBuf::from("from-cli.json")),
            output: Some(PathBuf::from("out.json")),
            ..with_file(&file)
        };
        let config = ShellConfig::load(&args).expect("config");
        assert_eq!(config.script_path, PathBuf::from("from-cli.json"));
        assert_eq!(config.output_path, Some(PathBuf::from("out.json")));
        assert_eq!(config.catalog_path, PathBuf::from("catalog.json"));
    }

    #[test]
    fn inverted_zoom_range_is_a_config_error() {
        let file = toml_file(
            r#"
            catalog_path = "catalog.json"
            script_path = "script.json"

            [editor]
            min_zoom = 3.0
            max_zoom = 2.0
            "#,
        );
        let err = ShellConfig::load(&with_file(&file)).unwrap_err();
        assert!(matches!(err, ShellError::Config { .. }));
        assert!(err.to_string().contains("min_zoom"));
    }
}
