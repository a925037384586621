mod error;

use std::path::{Path, PathBuf};

use bu_core::FormatVersion;
use bu_document::UnitDocument;
use bu_units::{
    Kind, SiOptions, UnitClass, UnitExpression, are_compatible, are_equivalent, are_identical,
    derive_units, get_predefined_unit, to_si, write_attributes,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "bu-cli")]
#[command(about = "BioUnits CLI - unit algebra for biological model descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct VersionArgs {
    /// Format level
    #[arg(long, default_value_t = 3)]
    level: u32,
    /// Format version within the level
    #[arg(long, default_value_t = 2)]
    version: u32,
}

impl VersionArgs {
    fn format(self) -> CliResult<FormatVersion> {
        Ok(FormatVersion::checked(self.level, self.version)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a unit document and summarize its definitions
    Check {
        /// Path to the unit document (YAML or JSON)
        document_path: PathBuf,
    },
    /// Show one unit in full: simplified, SI form and quantity classes
    Show {
        /// Path to the unit document (YAML or JSON)
        document_path: PathBuf,
        /// Unit definition id, predefined unit or base kind
        unit_id: String,
        /// Also print the serialized attributes of every term
        #[arg(long)]
        attributes: bool,
    },
    /// Compare two units of a document
    Compare {
        /// Path to the unit document (YAML or JSON)
        document_path: PathBuf,
        /// First unit id
        a: String,
        /// Second unit id
        b: String,
    },
    /// Print a predefined unit or base kind
    Predefined {
        /// substance, volume, area, length, time or a kind name
        name: String,
        #[command(flatten)]
        format: VersionArgs,
    },
    /// List the unit kinds legal in a format version
    Kinds {
        #[command(flatten)]
        format: VersionArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { document_path } => cmd_check(&document_path),
        Commands::Show {
            document_path,
            unit_id,
            attributes,
        } => cmd_show(&document_path, &unit_id, attributes),
        Commands::Compare { document_path, a, b } => cmd_compare(&document_path, &a, &b),
        Commands::Predefined { name, format } => cmd_predefined(&name, format),
        Commands::Kinds { format } => cmd_kinds(format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_check(document_path: &Path) -> CliResult<()> {
    println!("Checking unit document: {}", document_path.display());
    let document = bu_document::load(document_path)?;
    println!(
        "✓ Document is valid ({} unit definitions, {})",
        document.unit_definitions.len(),
        document.format_version()
    );

    for (id, expression) in document.expressions()? {
        let derived = derive_units(&expression)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "(no units)".to_string());
        println!("  {id} = {derived}{}", classes_suffix(&expression));
    }
    Ok(())
}

fn cmd_show(document_path: &Path, unit_id: &str, attributes: bool) -> CliResult<()> {
    let document = bu_document::load(document_path)?;
    tracing::debug!(unit_id, "resolving unit");
    let expression = document.resolve(unit_id)?;
    print_expression(unit_id, &expression, attributes);
    Ok(())
}

fn cmd_compare(document_path: &Path, a: &str, b: &str) -> CliResult<()> {
    let document: UnitDocument = bu_document::load(document_path)?;
    let (ea, eb) = (document.resolve(a)?, document.resolve(b)?);
    println!("{a} = {ea}");
    println!("{b} = {eb}");
    println!("  identical:  {}", yes_no(are_identical(&ea, &eb)));
    println!("  equivalent: {}", yes_no(are_equivalent(&ea, &eb)));
    println!("  compatible: {}", yes_no(are_compatible(&ea, &eb)));
    Ok(())
}

fn cmd_predefined(name: &str, args: VersionArgs) -> CliResult<()> {
    let format = args.format()?;
    let expression = get_predefined_unit(name, format.level, format.version).ok_or_else(|| {
        CliError::NoPredefinedUnit {
            name: name.to_string(),
            format: format.to_string(),
        }
    })?;
    print_expression(name, &expression, true);
    Ok(())
}

fn cmd_kinds(args: VersionArgs) -> CliResult<()> {
    let format = args.format()?;
    let kinds = Kind::defined_in(format);
    println!("Unit kinds in {format} ({}):", kinds.len());
    for kind in kinds {
        let ontology = kind.ontology_id().unwrap_or_default();
        println!("  {:<14} {:<6} {}", kind.as_str(), kind.symbol(), ontology);
    }
    Ok(())
}

fn print_expression(id: &str, expression: &UnitExpression, attributes: bool) {
    println!("{id} ({})", expression.format_version());
    println!("  terms:      {}", expression.describe());
    if let Some(derived) = derive_units(expression) {
        println!("  simplified: {derived}");
    }
    println!("  SI:         {}", to_si(expression, SiOptions::default()));
    println!(
        "  classes:    {}",
        classes(expression)
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if attributes {
        for term in expression {
            let rendered: Vec<String> = write_attributes(term)
                .into_iter()
                .map(|(k, v)| format!("{k}=\"{v}\""))
                .collect();
            println!("  <unit {}/>", rendered.join(" "));
        }
    }
}

fn classes(expression: &UnitExpression) -> Vec<UnitClass> {
    UnitClass::ALL
        .into_iter()
        .filter(|c| c.matches(expression))
        .collect()
}

fn classes_suffix(expression: &UnitExpression) -> String {
    let names: Vec<&str> = classes(expression).iter().map(|c| c.as_str()).collect();
    if names.is_empty() {
        String::new()
    } else {
        format!("  [{}]", names.join(", "))
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}
