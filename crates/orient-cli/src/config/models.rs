use lipidorient::core::targets::TargetTable;
use lipidorient::engine::config as core_config;

pub struct AppConfig {
    pub core_config: core_config::ReorientConfig,
    pub targets: TargetTable,
    pub title: String,
}
