use crate::cli::WeightsArgs;
use crate::config;
use crate::error::Result;
use crate::output;
use crate::system::LoadedSystem;
use fragex::engine::weights::weighted_expression;
use tracing::info;

pub fn run(args: WeightsArgs) -> Result<()> {
    let search = config::build_search_config(&args.system, args.keep_zero_terms)?;

    info!("Loading system description from {:?}", &search.input_path);
    let system = LoadedSystem::from_file(&search.input_path)?;
    let expansion =
        weighted_expression(&system.fragmented()?, &search.limits, search.zero_policy)?;

    let family = expansion.system.family()?;
    let records = output::term_records(&expansion.expression, family, None)?;
    println!(
        "{} weighted subsystem(s) over {} fragment(s) and their intersections.",
        records.len(),
        system.family.len()
    );
    print!("{}", output::render_terms(&records));
    println!(
        "Coefficient sum: {}",
        expansion.expression.coefficient_sum()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SystemArgs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn overlapping_pair_is_weighted() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pair.toml");
        fs::write(
            &input,
            r#"
            fragments = [[0, 1], [1, 2]]
            [[atoms]]
            element = "O"
            basis-functions = 5
            [[atoms]]
            element = "H"
            basis-functions = 1
            [[atoms]]
            element = "O"
            basis-functions = 5
            "#,
        )
        .unwrap();

        let args = WeightsArgs {
            system: SystemArgs {
                input,
                config: None,
                max_depth: None,
                max_subsets: None,
            },
            keep_zero_terms: true,
        };
        run(args).unwrap();
    }
}
