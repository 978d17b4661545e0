//! Init - Write a Default Configuration
//!
//! Creates an `lrkit.toml` with every scheduler argument spelled out at its
//! default value.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use lrkit_optim::{LrkitConfig, SchedulerConfig, SchedulerOptions};
use tracing::info;

use super::utils::{print_kv, print_success};
use crate::cli::InitArgs;
use crate::error::{CliError, CliResult};

/// File name written by `lrkit init`
pub const CONFIG_FILE: &str = "lrkit.toml";

// =============================================================================
// Init Command
// =============================================================================

/// Execute the init command
pub fn execute(args: InitArgs, quiet: bool) -> CliResult<()> {
    let path = args.path.join(CONFIG_FILE);
    if path.exists() && !args.force {
        return Err(CliError::ConfigExists(path.display().to_string()));
    }

    let options = match &args.scheduler {
        Some(name) => SchedulerOptions::named(name)?,
        None => SchedulerOptions::default(),
    };
    let config = LrkitConfig {
        scheduler: SchedulerConfig::from(&options),
        ..LrkitConfig::default()
    };

    std::fs::create_dir_all(&args.path)?;
    config.save(&path)?;
    info!(path = %path.display(), "wrote configuration");

    if !quiet {
        print_success(&format!("Created {}", path.display()));
        print_kv("scheduler", &config.scheduler.lr_scheduler);
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            scheduler: Some("cosine".to_string()),
            force: false,
        };
        execute(args, true).unwrap();

        let config = LrkitConfig::load(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.scheduler.lr_scheduler, "cosine");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "# keep").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            scheduler: None,
            force: false,
        };
        assert!(matches!(execute(args, true), Err(CliError::ConfigExists(_))));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap(),
            "# keep"
        );
    }

    #[test]
    fn test_init_rejects_unknown_scheduler() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            scheduler: Some("plateau".to_string()),
            force: false,
        };
        assert!(matches!(execute(args, true), Err(CliError::Scheduler(_))));
        assert!(!dir.path().join(CONFIG_FILE).exists());
    }
}
