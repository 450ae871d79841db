pub mod error;
pub mod gateway;
pub mod loader;
pub mod selection;

pub use error::{ConfigError, SelectionError};
pub use gateway::{ClientInfo, GatewayConfig, Region, ResourceNames, is_valid_suffix};
pub use loader::ensure_env_loaded;
pub use selection::{choose_config_file, config_file_name, discover_configs};
