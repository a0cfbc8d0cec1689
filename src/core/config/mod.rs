pub mod explorer_config;
