use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cssflow::{parse_css, parse_css_properties, Stylesheet};

/// Parse a CSS stylesheet and report diagnostics.
#[derive(Parser)]
#[command(name = "cssflow", version)]
struct Args {
    /// Stylesheet file to parse
    file: PathBuf,

    /// Treat the input as a bare declaration list (inline style attribute)
    #[arg(long)]
    inline: bool,

    /// Print the parsed rules back as CSS on stdout
    #[arg(long)]
    print: bool,
}

fn main() -> anyhow::Result<()> {
    cssflow::logging::tracing_init();
    let args = Args::parse();

    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("could not read {}", args.file.display()))?;

    if args.inline {
        let declarations = parse_css_properties(&source)?;
        info!(declarations = declarations.len(), "parse ok");
        if args.print {
            for declaration in &declarations {
                println!("{declaration};");
            }
        }
    } else {
        let file = args.file.display().to_string();
        let mut sheet = Stylesheet::new();
        parse_css(&mut sheet, &source, &file)?;
        info!(rules = sheet.len(), "parse ok");
        if args.print {
            print!("{sheet}");
        }
    }

    return Ok(());
}
