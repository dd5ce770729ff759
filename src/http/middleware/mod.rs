pub mod config_info;

pub use config_info::config_info_middleware;
