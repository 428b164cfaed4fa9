// mod.rs - CLI module

pub mod args;
pub mod config;
pub mod merge;
pub mod validation;

// Re-export main types for convenience
pub use args::{
    from_env, normalize_legacy_flags, parse_args, CombineArgs, FlagSpec, RestoreArgs,
    COMBINE_FLAGS, RESTORE_FLAGS,
};
pub use config::Config;
pub use validation::{ensure_extension, validate_combine, validate_restore};
