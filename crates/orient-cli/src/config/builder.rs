use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileTarget};
use super::models::AppConfig;
use crate::cli::{OrientationArgs, TargetArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use lipidorient::core::targets::TargetTable;
use lipidorient::engine::config as core_config;
use nalgebra::Vector3;
use tracing::debug;

/// Merges, in increasing priority: built-in defaults, the config file, `-S`
/// overrides, then dedicated command-line flags.
pub fn build_config(
    orientation: &OrientationArgs,
    targets: &TargetArgs,
    title: Option<&str>,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &orientation.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &orientation.set_values)?;
    let orient_file = file_config.orientation.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    // The preset and the marker list are one setting; the highest-priority
    // source that names either decides it.
    let (preset_name, root_markers) = if !orientation.root_markers.is_empty() {
        (None, Some(orientation.root_markers.clone()))
    } else if let Some(preset) = &orientation.root_preset {
        (Some(preset.clone()), None)
    } else {
        (orient_file.root_preset, orient_file.root_markers)
    };
    let root_preset = core_config::parse_root_preset(
        preset_name.as_deref().unwrap_or(&defaults.root_preset),
    )
    .map_err(|e| CliError::Config(e.to_string()))?;

    let tail_count = orientation
        .tail_count
        .or(orient_file.tail_count)
        .unwrap_or(defaults.tail_count);

    let grouping = if orientation.whole_structure {
        core_config::GroupingMode::WholeStructure
    } else {
        parse_grouping(orient_file.grouping.as_deref().unwrap_or(&defaults.grouping))?
    };

    let default_direction = Vector3::from(
        orient_file
            .default_direction
            .unwrap_or(defaults.default_direction),
    );
    let undetermined_direction = Vector3::from(
        orient_file
            .undetermined_direction
            .unwrap_or(defaults.undetermined_direction),
    );
    let validate_coordinates = orient_file
        .validate_coordinates
        .unwrap_or(defaults.validate_coordinates);

    let mut builder = core_config::ReorientConfigBuilder::new()
        .root_preset(root_preset)
        .tail_count(tail_count)
        .default_direction(default_direction)
        .undetermined_direction(undetermined_direction)
        .grouping(grouping)
        .validate_coordinates(validate_coordinates);
    if let Some(markers) = root_markers {
        builder = builder.root_markers(markers);
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let target_table = build_target_table(file_config.targets.take(), targets)?;
    debug!(
        "Resolved {} explicit target(s); uniform direction: {:?}.",
        target_table.len(),
        targets.direction
    );

    let title = title
        .map(str::to_string)
        .or(output_file.title)
        .unwrap_or(defaults.title);

    Ok(AppConfig {
        core_config,
        targets: target_table,
        title,
    })
}

/// Later sources win: config file entries, then the targets file, then `-t` flags.
fn build_target_table(
    file_targets: Option<Vec<FileTarget>>,
    args: &TargetArgs,
) -> Result<TargetTable> {
    let mut table: TargetTable = file_targets
        .unwrap_or_default()
        .into_iter()
        .map(|t| (t.fragment, Vector3::from(t.direction)))
        .collect();

    if let Some(path) = &args.targets_file {
        let loaded = TargetTable::load(path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;
        table.merge(loaded);
    }

    for (fragment_id, direction) in &args.targets {
        table.insert(*fragment_id, *direction);
    }

    if let Some(direction) = args.direction {
        table = table.with_uniform(direction);
    }
    Ok(table)
}

fn parse_grouping(value: &str) -> Result<core_config::GroupingMode> {
    match value {
        "by-fragment" => Ok(core_config::GroupingMode::ByFragment),
        "whole-structure" => Ok(core_config::GroupingMode::WholeStructure),
        other => Err(CliError::Config(format!(
            "Invalid grouping '{}'. Expected 'by-fragment' or 'whole-structure'.",
            other
        ))),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "orientation.root-preset" => {
                let orientation = config.orientation.get_or_insert_with(Default::default);
                orientation.root_preset = Some(value_str.to_string());
                orientation.root_markers = None;
            }
            "orientation.root-markers" => {
                config
                    .orientation
                    .get_or_insert_with(Default::default)
                    .root_markers = Some(
                    value_str
                        .split(',')
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                        .collect(),
                );
            }
            "orientation.tail-count" => {
                config
                    .orientation
                    .get_or_insert_with(Default::default)
                    .tail_count = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "orientation.default-direction" => {
                config
                    .orientation
                    .get_or_insert_with(Default::default)
                    .default_direction = Some(parse_direction_value(key, value_str)?);
            }
            "orientation.undetermined-direction" => {
                config
                    .orientation
                    .get_or_insert_with(Default::default)
                    .undetermined_direction = Some(parse_direction_value(key, value_str)?);
            }
            "orientation.grouping" => {
                config
                    .orientation
                    .get_or_insert_with(Default::default)
                    .grouping = Some(value_str.to_string());
            }
            "orientation.validate-coordinates" => {
                config
                    .orientation
                    .get_or_insert_with(Default::default)
                    .validate_coordinates = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            "output.title" => {
                config.output.get_or_insert_with(Default::default).title =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn parse_direction_value(key: &str, value: &str) -> Result<[f64; 3]> {
    parser::parse_direction(value)
        .map(|v| [v.x, v.y, v.z])
        .map_err(|e| CliError::Config(format!("{} ({})", e, key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipidorient::core::targets::TargetLookup;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn build_config_uses_defaults_without_inputs() {
        let app = build_config(&OrientationArgs::default(), &TargetArgs::default(), None).unwrap();
        let cfg = app.core_config;

        assert_eq!(cfg.orientation.root_markers, vec!["P".to_string()]);
        assert_eq!(cfg.orientation.tail_count, DefaultsConfig::default().tail_count);
        assert_eq!(cfg.default_direction, Vector3::z());
        assert_eq!(cfg.orientation.undetermined_direction, Vector3::z());
        assert_eq!(cfg.grouping, core_config::GroupingMode::ByFragment);
        assert!(!cfg.validate_coordinates);
        assert!(app.targets.is_empty());
        assert_eq!(app.title, DefaultsConfig::default().title);
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let cfg_path = write_file(
            &dir,
            "config.toml",
            r#"
            [orientation]
            root-preset = "nitrogen-first"
            tail-count = 4
            default-direction = [0.0, 1.0, 0.0]
            undetermined-direction = [1.0, 0.0, 0.0]
            grouping = "whole-structure"
            validate-coordinates = true

            [output]
            title = "FROM FILE"

            [[targets]]
            fragment = 1
            direction = [1.0, 0.0, 0.0]
            "#,
        );
        let args = OrientationArgs {
            config: Some(cfg_path),
            ..Default::default()
        };

        let app = build_config(&args, &TargetArgs::default(), None).unwrap();
        let cfg = app.core_config;

        assert_eq!(
            cfg.orientation.root_markers,
            vec!["N".to_string(), "P".to_string()]
        );
        assert_eq!(cfg.orientation.tail_count, 4);
        assert_eq!(cfg.default_direction, Vector3::y());
        assert_eq!(cfg.orientation.undetermined_direction, Vector3::x());
        assert_eq!(cfg.grouping, core_config::GroupingMode::WholeStructure);
        assert!(cfg.validate_coordinates);
        assert_eq!(app.title, "FROM FILE");
        assert_eq!(app.targets.lookup(1), TargetLookup::Explicit(Vector3::x()));
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let cfg_path = write_file(
            &dir,
            "config.toml",
            r#"
            [orientation]
            root-markers = ["O"]
            tail-count = 4

            [output]
            title = "FROM FILE"

            [[targets]]
            fragment = 1
            direction = [1.0, 0.0, 0.0]
            "#,
        );
        let orientation = OrientationArgs {
            config: Some(cfg_path),
            root_markers: vec!["N".to_string()],
            tail_count: Some(3),
            whole_structure: true,
            ..Default::default()
        };
        let targets = TargetArgs {
            direction: Some(-Vector3::z()),
            targets: vec![(1, Vector3::y())],
            targets_file: None,
        };

        let app = build_config(&orientation, &targets, Some("FROM CLI")).unwrap();
        let cfg = app.core_config;

        assert_eq!(cfg.orientation.root_markers, vec!["N".to_string()]);
        assert_eq!(cfg.orientation.tail_count, 3);
        assert_eq!(cfg.grouping, core_config::GroupingMode::WholeStructure);
        assert_eq!(app.title, "FROM CLI");
        assert_eq!(app.targets.lookup(1), TargetLookup::Explicit(Vector3::y()));
        assert_eq!(app.targets.lookup(9), TargetLookup::Uniform(-Vector3::z()));
    }

    #[test]
    fn cli_root_preset_replaces_file_markers() {
        let dir = tempdir().unwrap();
        let cfg_path = write_file(
            &dir,
            "config.toml",
            "[orientation]\nroot-markers = [\"O\"]\n",
        );

        let from_flag = OrientationArgs {
            config: Some(cfg_path.clone()),
            root_preset: Some("nitrogen".to_string()),
            ..Default::default()
        };
        let app = build_config(&from_flag, &TargetArgs::default(), None).unwrap();
        assert_eq!(app.core_config.orientation.root_markers, vec!["N".to_string()]);

        let from_set = OrientationArgs {
            config: Some(cfg_path.clone()),
            set_values: vec!["orientation.root-preset=first-atom".to_string()],
            ..Default::default()
        };
        let app = build_config(&from_set, &TargetArgs::default(), None).unwrap();
        assert!(app.core_config.orientation.root_markers.is_empty());

        let markers_beat_preset = OrientationArgs {
            config: Some(cfg_path),
            root_preset: Some("nitrogen".to_string()),
            root_markers: vec!["C1".to_string()],
            ..Default::default()
        };
        let app = build_config(&markers_beat_preset, &TargetArgs::default(), None).unwrap();
        assert_eq!(app.core_config.orientation.root_markers, vec!["C1".to_string()]);
    }

    #[test]
    fn targets_file_sits_between_config_and_flags() {
        let dir = tempdir().unwrap();
        let cfg_path = write_file(
            &dir,
            "config.toml",
            "[[targets]]\nfragment = 1\ndirection = [1.0, 0.0, 0.0]\n\n[[targets]]\nfragment = 2\ndirection = [1.0, 0.0, 0.0]\n",
        );
        let table_path = write_file(&dir, "targets.csv", "fragment,x,y,z\n2,0,1,0\n3,0,1,0\n");

        let orientation = OrientationArgs {
            config: Some(cfg_path),
            ..Default::default()
        };
        let targets = TargetArgs {
            direction: None,
            targets: vec![(3, Vector3::z())],
            targets_file: Some(table_path),
        };

        let app = build_config(&orientation, &targets, None).unwrap();
        assert_eq!(app.targets.lookup(1), TargetLookup::Explicit(Vector3::x()));
        assert_eq!(app.targets.lookup(2), TargetLookup::Explicit(Vector3::y()));
        assert_eq!(app.targets.lookup(3), TargetLookup::Explicit(Vector3::z()));
        assert_eq!(app.targets.lookup(4), TargetLookup::Missing);
    }

    #[test]
    fn set_values_override() {
        let orientation = OrientationArgs {
            set_values: vec![
                "orientation.root-markers=N, P".to_string(),
                "orientation.tail-count=5".to_string(),
                "orientation.default-direction=1,0,0".to_string(),
                "orientation.grouping=whole-structure".to_string(),
                "orientation.validate-coordinates=true".to_string(),
                "output.title=SET TITLE".to_string(),
            ],
            ..Default::default()
        };

        let app = build_config(&orientation, &TargetArgs::default(), None).unwrap();
        let cfg = app.core_config;

        assert_eq!(
            cfg.orientation.root_markers,
            vec!["N".to_string(), "P".to_string()]
        );
        assert_eq!(cfg.orientation.tail_count, 5);
        assert_eq!(cfg.default_direction, Vector3::x());
        assert_eq!(cfg.grouping, core_config::GroupingMode::WholeStructure);
        assert!(cfg.validate_coordinates);
        assert_eq!(app.title, "SET TITLE");
    }

    #[test]
    fn invalid_values_are_config_errors() {
        for set in [
            "orientation.tail-count=many",
            "orientation.tail-count=0",
            "orientation.default-direction=0,0",
            "orientation.grouping=sideways",
            "orientation.root-preset=sulfur",
            "unknown.key=1",
            "missing-separator",
        ] {
            let orientation = OrientationArgs {
                set_values: vec![set.to_string()],
                ..Default::default()
            };
            let result = build_config(&orientation, &TargetArgs::default(), None);
            assert!(
                matches!(result, Err(CliError::Config(_))),
                "expected config error for '{}'",
                set
            );
        }
    }
}
