//! Init command implementation

use anyhow::{Result, bail};
use std::path::PathBuf;

use questboard::config::Config;

/// Default configuration content for questboard init
pub const DEFAULT_CONFIG: &str = r#"# Questboard Configuration
# ========================

# ============================================================================
# STORAGE - Where tasks and progress are kept
# ============================================================================
#
# Available options:
#   backend - "sqlite" (default) or "memory" (nothing is kept after exit)
#   path    - Database file (default: ~/.questboard/questboard.db)

[storage]
backend = "sqlite"
# path = "~/.questboard/questboard.db"

# ============================================================================
# SETTINGS - Global configuration options
# ============================================================================
#
# Available options:
#   history_limit      - Completed tasks shown by `history` (default: 30)
#   default_column     - Column used by `add` (default: "do_first")
#   default_difficulty - Difficulty used by `add`, 1-3 (default: 1)

[settings]
history_limit = 30
default_column = "do_first"
default_difficulty = 1
"#;

/// Write the documented default config
pub async fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    Config::write_raw(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
