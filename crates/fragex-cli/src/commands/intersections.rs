use crate::cli::SystemArgs;
use crate::config;
use crate::error::Result;
use crate::output;
use crate::system::LoadedSystem;
use fragex::engine::intersections::find_intersections_with;
use tracing::info;

pub fn run(args: SystemArgs) -> Result<()> {
    let search = config::build_search_config(&args, false)?;

    info!("Loading system description from {:?}", &search.input_path);
    let system = LoadedSystem::from_file(&search.input_path)?;
    let closed = find_intersections_with(&system.family, &search.limits)?;

    let original = system.family.len();
    println!(
        "Found {} distinct intersection(s) among {} fragment(s).",
        closed.len() - original,
        original
    );
    print!("{}", output::render_fragments(&closed, original));
    Ok(())
}
