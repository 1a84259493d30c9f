//! Types command for inspecting the communication-type catalog.

use std::path::Path;

use clap::Args;
use console::style;

use geokat_core::TypeCatalog;

/// Arguments for the types command.
#[derive(Args)]
pub struct TypesArgs {
    /// Include disabled entries
    #[arg(long)]
    all: bool,

    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TypesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let catalog = match config_path {
        Some(path) => TypeCatalog::from_file(Path::new(path))?,
        None => TypeCatalog::default(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if config_path.is_none() {
        println!(
            "{} No catalog file given, showing the built-in defaults.",
            style("ℹ").blue()
        );
    }

    for entry in &catalog.types {
        if entry.enabled {
            println!("{} {}", style("✓").green(), entry.name);
        } else if args.all {
            println!("{} {}", style("✗").red(), style(&entry.name).dim());
        }
    }

    let enabled = catalog.types.iter().filter(|t| t.enabled).count();
    println!();
    println!(
        "{} {} of {} types enabled",
        style("ℹ").blue(),
        enabled,
        catalog.types.len()
    );

    Ok(())
}
