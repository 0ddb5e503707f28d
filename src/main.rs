mod cli;

use crate::cli::Arguments;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tri_obj::{LoaderConfig, ObjLoader};

fn main() -> Result<()> {
    pretty_env_logger::init();
    let arguments = Arguments::parse();

    let config = load_config(&arguments)?;
    info!("Loader options: {:?}", config);

    let mut loader = ObjLoader::with_config(config);
    let model = loader
        .load_file(&arguments.file)
        .with_context(|| format!("Failed to load {}", arguments.file.display()))?;

    println!("Vertices: {}", model.vertex_count());
    println!("Normals: {}", model.normal_count());
    println!("Triangles: {}", model.triangle_count());
    if arguments.print_vertices {
        let values: Vec<String> = model.positions().iter().map(|v| v.to_string()).collect();
        println!("{}", values.join(" "));
    }

    Ok(())
}

/// Reads the config file if given, then applies the flags on top of it.
fn load_config(arguments: &Arguments) -> Result<LoaderConfig> {
    let mut config = match &arguments.config {
        Some(path) => LoaderConfig::load(path)?,
        None => LoaderConfig::default(),
    };

    config.strict_index_groups |= arguments.strict_index_groups;
    config.check_index_bounds |= arguments.check_index_bounds;
    config.strict_arity |= arguments.strict_arity;
    Ok(config)
}
