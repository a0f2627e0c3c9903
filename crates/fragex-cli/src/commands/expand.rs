use crate::cli::ExpandArgs;
use crate::config;
use crate::error::Result;
use crate::output;
use crate::system::LoadedSystem;
use crate::utils::progress::CliProgressHandler;
use fragex::engine::progress::ProgressReporter;
use fragex::workflows;
use tracing::{info, warn};

pub fn run(args: ExpandArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = config::build_config(&args)?;

    info!("Loading system description from {:?}", &app.input_path);
    let system = LoadedSystem::from_file(&app.input_path)?;
    let fragments = system.fragmented()?;
    if !system.family.is_pairwise_disjoint() {
        warn!("Fragments overlap; shared atoms are handled through intersection k-mers.");
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Expanding {} ({} fragments) to order {} and evaluating {}...",
        system.formula(),
        system.family.len(),
        app.core_config.truncation_order,
        app.property
    );
    info!("Invoking the expansion workflow...");

    let result =
        workflows::evaluate::run(fragments, &app.core_config, &app.property, &reporter)?;
    drop(reporter);

    info!(
        terms = result.expression.size(),
        total = result.total,
        "Workflow finished."
    );

    let records = output::term_records(
        &result.expression,
        &system.family,
        Some(&result.term_values),
    )?;
    print!("{}", output::render_terms(&records));
    println!(
        "Expansion total ({}): {:.4} from {} term(s)",
        app.property,
        result.total,
        records.len()
    );

    if let Some(path) = &app.csv_path {
        output::write_csv(path, &records)?;
        println!("✓ Term table written to: {}", path.display());
    }

    Ok(())
}
