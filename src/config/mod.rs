//! Configuration: types, default paths and XML loading.
//!
//! Precedence is CLI flags > XML file > built-in defaults. The XML file is
//! located through `TASKMATE_CONFIG` or the per-user config directory.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{
    LoadResult, create_template_config, load_config_from_xml_path, load_or_init,
};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TASKMATE_CONFIG";

/// Extensions picked up by the image mover when none are configured.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Folder (relative to the working directory) images are moved into by default.
pub const DEFAULT_IMAGE_DESTINATION: &str = "Images";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
