// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{CombineArgs, Config, RestoreArgs};
use crate::status::FabricError;

impl CombineArgs {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.input.is_none() {
            self.input = config.input;
        }
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.description.is_none() {
            self.description = config.description;
        }

        // Logging
        if self.log.is_none() {
            self.log = config.log_folder;
        }

        // Flags (config only sets a flag the CLI left off)
        if !self.sup && config.suppress.unwrap_or(false) {
            self.sup = true;
        }
        if !self.nl && config.no_log.unwrap_or(false) {
            self.nl = true;
        }
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, FabricError> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

impl RestoreArgs {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values.
    /// Returns the merged args and the configured restore command, if any.
    pub fn merge_with_config(mut self, config: Config) -> (Self, Option<String>) {
        // Credentials
        if self.id.is_none() {
            self.id = config.user_id;
        }
        if self.pw.is_none() {
            self.pw = config.password;
        }

        // Input/Output
        if self.input.is_none() {
            self.input = config.input;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Forwarded parameters
        if self.params.is_none() {
            self.params = config.params;
        }
        if self.fm.is_none() {
            self.fm = config.fm_params;
        }

        // Logging
        if self.log.is_none() {
            self.log = config.log_folder;
        }
        if !self.sup && config.suppress.unwrap_or(false) {
            self.sup = true;
        }
        if !self.nl && config.no_log.unwrap_or(false) {
            self.nl = true;
        }
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }

        (self, config.restore_cmd)
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<(Self, Option<String>), FabricError> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_values_win_over_config() {
        let args = CombineArgs {
            input: Some("cli_dir".to_string()),
            ..CombineArgs::default()
        };
        let config = Config {
            input: Some("config_dir".to_string()),
            output: Some("combined".to_string()),
            suppress: Some(true),
            verbose: Some(true),
            ..Config::default()
        };

        let merged = args.merge_with_config(config);
        assert!(merged.verbose);
        assert_eq!(merged.input.as_deref(), Some("cli_dir"));
        assert_eq!(merged.output.as_deref(), Some("combined"));
        assert!(merged.sup);
        assert!(!merged.nl);
    }

    #[test]
    fn test_restore_config_fills_gaps() {
        let args = RestoreArgs {
            id: Some("admin".to_string()),
            params: Some("-s".to_string()),
            ..RestoreArgs::default()
        };
        let config = Config {
            user_id: Some("operator".to_string()),
            password: Some("secret".to_string()),
            params: Some("*".to_string()),
            fm_params: Some("bp".to_string()),
            restore_cmd: Some("python3 restore.py".to_string()),
            ..Config::default()
        };

        let (merged, restore_cmd) = args.merge_with_config(config);
        assert_eq!(merged.id.as_deref(), Some("admin"));
        assert_eq!(merged.pw.as_deref(), Some("secret"));
        assert_eq!(merged.params.as_deref(), Some("-s"));
        assert_eq!(merged.fm.as_deref(), Some("bp"));
        assert_eq!(restore_cmd.as_deref(), Some("python3 restore.py"));
    }
}
