//! dayline - Entry Point

use clap::Parser;
use dayline::config::{ConfigError, ResolvedConfig};
use dayline::host::{AlwaysDaily, DocumentIdentity, FolderConvention};
use dayline::view::{ColorConfig, HostOptions};
use std::path::PathBuf;
use tracing::info;

/// dayline - daily-note editor that shows timeline entries as cards
#[derive(Parser, Debug)]
#[command(name = "dayline")]
#[command(version)]
#[command(about = "Terminal editor that renders daily-note timelines as cards")]
pub struct Args {
    /// Daily note to open (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Print parsed entries as JSON lines instead of opening the editor
    #[arg(long)]
    pub dump: bool,

    /// Treat the note as a daily timeline wherever it lives
    #[arg(long)]
    pub force: bool,

    /// Name of the folder holding daily notes
    #[arg(long, value_name = "NAME")]
    pub daily_folder: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Defaults → Config File → Env Vars → CLI Args, then validation.
fn resolve_config(args: &Args) -> Result<ResolvedConfig, ConfigError> {
    let config_file = dayline::config::load_config_with_precedence(args.config.clone())?;
    let merged = dayline::config::merge_config(config_file);
    let with_env = dayline::config::apply_env_overrides(merged);
    let config = dayline::config::apply_cli_overrides(with_env, args.daily_folder.clone());
    config.validate()?;
    Ok(config)
}

fn build_identity(
    force: bool,
    config: &ResolvedConfig,
    path: Option<PathBuf>,
) -> Box<dyn DocumentIdentity> {
    if force {
        Box::new(AlwaysDaily)
    } else {
        Box::new(FolderConvention::new(
            config.daily_folder.clone(),
            config.date_format.clone(),
            path,
        ))
    }
}

fn host_options(config: &ResolvedConfig, no_color: bool) -> HostOptions {
    HostOptions {
        indent: config.indent,
        max_lookback: config.lookback_lines,
        card_cache_capacity: config.card_cache_capacity,
        colors: ColorConfig::from_env_and_args(no_color),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    // Initialize tracing with configured log file path
    dayline::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    // Detect input source (file or stdin)
    let input_source = dayline::source::detect_input_source(args.file.clone())?;

    if args.dump {
        let note = input_source.load()?;
        let entries = dayline::integration::process_document(&note.text, config.lookback_lines);
        info!(entries = entries.len(), "dumping entries");
        dayline::integration::write_json_lines(&entries, std::io::stdout().lock())?;
        return Ok(());
    }

    let note = input_source.load_or_new()?;
    let identity = build_identity(args.force, &config, note.path.clone());
    dayline::view::run_with_note(note, identity, host_options(&config, args.no_color))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayline::host::DocumentClass;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let result = Args::try_parse_from(["dayline", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["dayline", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["dayline"]);
        assert_eq!(args.file, None);
        assert!(!args.dump);
        assert!(!args.force);
        assert_eq!(args.daily_folder, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["dayline", "Daily/2024-03-18.md"]);
        assert_eq!(args.file, Some(PathBuf::from("Daily/2024-03-18.md")));
    }

    #[test]
    fn test_daily_folder_takes_a_value() {
        let args = Args::parse_from(["dayline", "--daily-folder", "Journal"]);
        assert_eq!(args.daily_folder, Some("Journal".to_string()));

        let result = Args::try_parse_from(["dayline", "--daily-folder"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_flag_rejects() {
        let result = Args::try_parse_from(["dayline", "--follow"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "dayline",
            "note.md",
            "--dump",
            "--force",
            "--no-color",
            "--config",
            "/custom/config.toml",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("note.md")));
        assert!(args.dump);
        assert!(args.force);
        assert!(args.no_color);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_daily_folder_flows_through_config_precedence_chain() {
        use dayline::config::{apply_cli_overrides, apply_env_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            daily_folder: Some("Journal".to_string()),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(
            merged.daily_folder, "Journal",
            "Config file should override default folder"
        );

        let with_env = apply_env_overrides(merged);
        let with_cli = apply_cli_overrides(with_env, Some("Days".to_string()));
        assert_eq!(
            with_cli.daily_folder, "Days",
            "CLI folder should override all other sources"
        );
    }

    #[test]
    fn test_force_always_activates() {
        let config = ResolvedConfig::default();
        let identity = build_identity(true, &config, Some(PathBuf::from("/tmp/todo.md")));
        assert_eq!(identity.classify(), DocumentClass::DailyTimeline);
    }

    #[test]
    fn test_identity_follows_configured_folder() {
        let config = ResolvedConfig::default();
        let daily = build_identity(false, &config, Some(PathBuf::from("Daily/2024-03-18.md")));
        assert_eq!(daily.classify(), DocumentClass::DailyTimeline);

        let other = build_identity(false, &config, Some(PathBuf::from("Notes/2024-03-18.md")));
        assert_eq!(other.classify(), DocumentClass::Other);

        let stdin = build_identity(false, &config, None);
        assert_eq!(stdin.classify(), DocumentClass::Unavailable);
    }

    #[test]
    fn test_host_options_mirror_config() {
        let config = ResolvedConfig {
            indent: 2,
            lookback_lines: 10,
            card_cache_capacity: 32,
            ..ResolvedConfig::default()
        };
        let options = host_options(&config, true);
        assert_eq!(options.indent, 2);
        assert_eq!(options.max_lookback, 10);
        assert_eq!(options.card_cache_capacity, 32);
        assert!(!options.colors.colors_enabled());
    }
}
