use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileLimitsConfig};
use super::models::{AppConfig, SearchConfig};
use crate::cli::{ExpandArgs, SystemArgs};
use crate::error::{CliError, Result};
use fragex::engine::config::{ExpansionConfigBuilder, ExpansionLimits, ZeroCoefficientPolicy};

pub fn build_config(args: &ExpandArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = FileConfig::load(args.system.config.as_deref())?;

    let expansion = file_config.expansion.take().unwrap_or_default();
    let limits = merge_limits(&args.system, file_config.limits.take());

    let truncation_order = args
        .order
        .or(expansion.truncation_order)
        .unwrap_or(defaults.truncation_order);
    let include_lower_orders = args.include_lower_orders
        || expansion
            .include_lower_orders
            .unwrap_or(defaults.include_lower_orders);
    let keep_zero_terms = args.keep_zero_terms
        || expansion
            .keep_zero_terms
            .unwrap_or(defaults.keep_zero_terms);
    let property = args
        .property
        .or(expansion.property)
        .unwrap_or(defaults.property);

    let mut builder = ExpansionConfigBuilder::new()
        .truncation_order(truncation_order)
        .include_lower_orders(include_lower_orders)
        .zero_policy(zero_policy(keep_zero_terms));
    if let Some(depth) = limits.max_depth {
        builder = builder.max_depth(depth);
    }
    if let Some(count) = limits.max_subsets {
        builder = builder.max_subsets(count);
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.system.input.clone(),
        csv_path: args.csv.clone(),
        property,
        core_config,
    })
}

pub fn build_search_config(args: &SystemArgs, keep_zero_terms: bool) -> Result<SearchConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = FileConfig::load(args.config.as_deref())?;

    let keep_zero_terms = keep_zero_terms
        || file_config
            .expansion
            .take()
            .and_then(|expansion| expansion.keep_zero_terms)
            .unwrap_or(defaults.keep_zero_terms);
    let limits = merge_limits(args, file_config.limits.take());
    for (name, value) in [
        ("max-depth", limits.max_depth),
        ("max-subsets", limits.max_subsets),
    ] {
        if value == Some(0) {
            return Err(CliError::Config(format!(
                "Invalid value for parameter '{}': must be at least 1",
                name
            )));
        }
    }

    Ok(SearchConfig {
        input_path: args.input.clone(),
        limits,
        zero_policy: zero_policy(keep_zero_terms),
    })
}

fn merge_limits(args: &SystemArgs, file_val: Option<FileLimitsConfig>) -> ExpansionLimits {
    let file_val = file_val.unwrap_or_default();
    ExpansionLimits::new(
        args.max_depth.or(file_val.max_depth),
        args.max_subsets.or(file_val.max_subsets),
    )
}

fn zero_policy(keep_zero_terms: bool) -> ZeroCoefficientPolicy {
    if keep_zero_terms {
        ZeroCoefficientPolicy::Retain
    } else {
        ZeroCoefficientPolicy::Drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropertyKind;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("expansion.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn system_args(config: Option<&Path>) -> SystemArgs {
        SystemArgs {
            input: PathBuf::from("system.toml"),
            config: config.map(Path::to_path_buf),
            max_depth: None,
            max_subsets: None,
        }
    }

    fn base_expand_args(config: Option<&Path>) -> ExpandArgs {
        ExpandArgs {
            system: system_args(config),
            order: None,
            include_lower_orders: false,
            keep_zero_terms: false,
            property: None,
            csv: None,
        }
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let app = build_config(&base_expand_args(None)).unwrap();
        let cfg = app.core_config;

        assert_eq!(cfg.truncation_order, 2);
        assert!(!cfg.include_lower_orders);
        assert_eq!(cfg.limits, ExpansionLimits::unbounded());
        assert_eq!(cfg.zero_policy, ZeroCoefficientPolicy::Drop);
        assert_eq!(app.property, PropertyKind::Electrons);
        assert_eq!(app.input_path, PathBuf::from("system.toml"));
        assert!(app.csv_path.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [expansion]
            truncation-order = 3
            include-lower-orders = true
            keep-zero-terms = true
            property = "basis-functions"

            [limits]
            max-depth = 4
            "#,
        );

        let app = build_config(&base_expand_args(Some(&path))).unwrap();
        let cfg = app.core_config;

        assert_eq!(cfg.truncation_order, 3);
        assert!(cfg.include_lower_orders);
        assert_eq!(cfg.zero_policy, ZeroCoefficientPolicy::Retain);
        assert_eq!(cfg.limits, ExpansionLimits::new(Some(4), None));
        assert_eq!(app.property, PropertyKind::BasisFunctions);
    }

    #[test]
    fn cli_arguments_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [expansion]
            truncation-order = 3
            property = "basis-functions"

            [limits]
            max-depth = 4
            max-subsets = 10
            "#,
        );

        let mut args = base_expand_args(Some(&path));
        args.order = Some(1);
        args.property = Some(PropertyKind::Electrons);
        args.system.max_subsets = Some(99);
        args.csv = Some(PathBuf::from("out.csv"));

        let app = build_config(&args).unwrap();
        assert_eq!(app.core_config.truncation_order, 1);
        assert_eq!(app.core_config.limits, ExpansionLimits::new(Some(4), Some(99)));
        assert_eq!(app.property, PropertyKind::Electrons);
        assert_eq!(app.csv_path, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn zero_order_is_a_configuration_error() {
        let mut args = base_expand_args(None);
        args.order = Some(0);
        let result = build_config(&args);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("truncation_order")));
    }

    #[test]
    fn search_config_merges_limits_and_zero_policy() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [expansion]
            keep-zero-terms = true

            [limits]
            max-subsets = 64
            "#,
        );
        let mut args = system_args(Some(&path));
        args.max_depth = Some(3);

        let search = build_search_config(&args, false).unwrap();
        assert_eq!(search.limits, ExpansionLimits::new(Some(3), Some(64)));
        assert_eq!(search.zero_policy, ZeroCoefficientPolicy::Retain);
    }

    #[test]
    fn search_config_rejects_zero_limits() {
        let mut args = system_args(None);
        args.max_depth = Some(0);
        let result = build_search_config(&args, false);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("max-depth")));
    }
}
