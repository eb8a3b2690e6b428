//! Launch-option parsing unit tests.

use crate::options::{read_options, Args, OptionsError};
use crate::util::config::ConfigureOptions;

use clap::CommandFactory;
use std::fs;
use std::path::PathBuf;

#[cfg(test)]
mod read_options_tests {
    use super::*;

    #[test]
    fn test_no_arguments_yield_defaults() {
        let options = read_options(["stagekit"]).unwrap();
        assert_eq!(options, Some(ConfigureOptions::default()));
    }

    #[test]
    fn test_help_yields_no_options() {
        assert!(read_options(["stagekit", "--help"]).unwrap().is_none());
    }

    #[test]
    fn test_short_help_yields_no_options() {
        assert!(read_options(["stagekit", "-h"]).unwrap().is_none());
    }

    #[test]
    fn test_version_yields_no_options() {
        assert!(read_options(["stagekit", "--version"]).unwrap().is_none());
    }

    #[test]
    fn test_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stagekit.toml");
        fs::write(&path, "data-path = \"packaged-data\"\n").unwrap();
        let options = read_options(["stagekit", "--config", path.to_str().unwrap()])
            .unwrap()
            .unwrap();
        assert_eq!(options.data_path, PathBuf::from("packaged-data"));
        assert_eq!(options.settings_path, PathBuf::from("settings"));
        assert_eq!(options.saves_path, PathBuf::from("saves"));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let res = read_options(["stagekit", "--config", "/no/such/stagekit.toml"]);
        assert!(matches!(res, Err(OptionsError::Config(_))));
    }

    #[test]
    fn test_unknown_flag_is_parse_error() {
        let res = read_options(["stagekit", "--frobnicate"]);
        assert!(matches!(res, Err(OptionsError::Parse(_))));
    }

    #[test]
    fn test_config_without_value_is_parse_error() {
        let res = read_options(["stagekit", "--config"]);
        assert!(matches!(res, Err(OptionsError::Parse(_))));
    }
}

#[cfg(test)]
mod help_text_tests {
    use super::*;

    #[test]
    fn test_long_help_names_every_option_and_config_key() {
        let help = Args::command().render_long_help().to_string();
        for needle in [
            "--help",
            "--version",
            "--config",
            "data-path",
            "settings-path",
            "saves-path",
        ] {
            assert!(help.contains(needle), "help text is missing {needle}");
        }
    }

    #[test]
    fn test_version_carries_name_and_number() {
        let version = Args::command().render_version();
        assert!(version.contains("stagekit"));
        assert!(version.contains(crate::VERSION));
    }
}
