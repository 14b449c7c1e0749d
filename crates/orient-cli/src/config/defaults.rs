use lipidorient::core::io::pdb::DEFAULT_TITLE;
use lipidorient::core::orientation::DEFAULT_TAIL_COUNT;

pub struct DefaultsConfig {
    pub root_preset: String,
    pub tail_count: usize,
    pub default_direction: [f64; 3],
    pub undetermined_direction: [f64; 3],
    pub grouping: String,
    pub validate_coordinates: bool,
    pub title: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            root_preset: "phosphorus".to_string(),
            tail_count: DEFAULT_TAIL_COUNT,
            default_direction: [0.0, 0.0, 1.0],
            undetermined_direction: [0.0, 0.0, 1.0],
            grouping: "by-fragment".to_string(),
            validate_coordinates: false,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}
