//! Configuration: types, default paths and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, open_log_file_append, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BLUEPRINT_COPY_CONFIG";
pub(crate) const APP_DIR: &str = "blueprint_copy";
pub(crate) const CONFIG_FILE_NAME: &str = "config.xml";
pub(crate) const LOG_FILE_NAME: &str = "blueprint_copy.log";
