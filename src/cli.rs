use std::path::PathBuf;

use clap::Parser;

/// Represents CLI arguments.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Arguments {
    /// Specifies the OBJ file to load.
    pub file: PathBuf,

    /// Specifies a TOML file with loader options.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Validates texcoord and normal references in faces.
    #[clap(long)]
    pub strict_index_groups: bool,

    /// Rejects faces referencing undefined vertices.
    #[clap(long)]
    pub check_index_bounds: bool,

    /// Rejects records with more than three values.
    #[clap(long)]
    pub strict_arity: bool,

    /// Prints the flattened vertex positions.
    #[clap(short, long)]
    pub print_vertices: bool,
}
