//! cellform CLI - compile formula definitions into spreadsheet documents

use anyhow::{bail, Context, Result};
use cellform_dsl::{compile_formula, render_tree, Definitions};
use cellform_fods::{Cell, CellKind, FodsWriter, Spreadsheet};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cellform")]
#[command(
    author,
    version,
    about = "Compile formula-definition DSL files into spreadsheet formulas"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List constants and formula signatures in a DSL file
    List {
        /// Input DSL file
        input: PathBuf,
    },

    /// Pretty-print the AST of a formula definition
    Ast {
        /// Input DSL file
        input: PathBuf,

        /// Formula name to inspect
        formula: String,
    },

    /// Compile a formula to a flat spreadsheet expression
    Compile {
        /// Input DSL file
        input: PathBuf,

        /// Formula name to compile
        formula: String,

        /// Argument texts bound to the formula's parameters, in order
        args: Vec<String>,
    },

    /// Build a .fods spreadsheet with named input cells and the compiled formula
    Build {
        /// Input DSL file
        input: PathBuf,

        /// Formula name to compile; the --cell names are its arguments, in order
        #[arg(short, long)]
        formula: String,

        /// Input cell as NAME=VALUE:KIND (kind: currency, percentage, float, string)
        #[arg(short, long = "cell", value_name = "NAME=VALUE:KIND")]
        cells: Vec<String>,

        /// Output .fods file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { input } => list(&input),
        Commands::Ast { input, formula } => ast(&input, &formula),
        Commands::Compile {
            input,
            formula,
            args,
        } => compile(&input, &formula, &args),
        Commands::Build {
            input,
            formula,
            cells,
            output,
        } => build(&input, &formula, &cells, &output),
    }
}

fn load_definitions(input: &Path) -> Result<Definitions> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    Definitions::parse(&source)
        .with_context(|| format!("Failed to parse '{}'", input.display()))
}

fn list(input: &Path) -> Result<()> {
    let defs = load_definitions(input)?;

    let mut constants: Vec<_> = defs.constants().collect();
    constants.sort();
    for (name, value) in constants {
        println!("let {name} = {value}");
    }

    let mut formulas: Vec<_> = defs.formulas().collect();
    formulas.sort_by_key(|(name, _)| *name);
    for (name, formula) in formulas {
        println!("define {name}({})", formula.params.join(", "));
    }

    Ok(())
}

fn ast(input: &Path, formula: &str) -> Result<()> {
    let defs = load_definitions(input)?;

    let definition = match defs.formula(formula) {
        Some(f) => f,
        None => bail!("No formula named '{formula}' in '{}'", input.display()),
    };

    print!("{}", render_tree(&definition.body));
    Ok(())
}

fn compile(input: &Path, formula: &str, args: &[String]) -> Result<()> {
    let defs = load_definitions(input)?;

    let compiled = compile_formula(formula, args, &defs)
        .with_context(|| format!("Failed to compile '{formula}'"))?;

    println!("{compiled}");
    Ok(())
}

fn build(input: &Path, formula: &str, cell_specs: &[String], output: &Path) -> Result<()> {
    let defs = load_definitions(input)?;

    // Each input cell goes on its own row; its name doubles as the argument
    // text handed to the formula, so the compiled expression references the
    // named cells
    let mut sheet = Spreadsheet::new();
    let mut arg_names = Vec::new();
    for spec in cell_specs {
        let (name, cell) = parse_cell_spec(spec)?;
        arg_names.push(name);
        sheet.push_row(vec![cell]);
    }

    let compiled = compile_formula(formula, &arg_names, &defs)
        .with_context(|| format!("Failed to compile '{formula}'"))?;
    sheet.push_row(vec![Cell::new(&compiled, CellKind::Formula)]);

    FodsWriter::write_file(&sheet, output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    eprintln!(
        "Wrote {} input cells and formula {compiled} to '{}'",
        arg_names.len(),
        output.display()
    );
    Ok(())
}

/// Parse a NAME=VALUE:KIND cell specification
fn parse_cell_spec(spec: &str) -> Result<(String, Cell)> {
    let (name, rest) = spec
        .split_once('=')
        .with_context(|| format!("Expected NAME=VALUE:KIND, got '{spec}'"))?;
    let (value, kind) = rest
        .split_once(':')
        .with_context(|| format!("Expected NAME=VALUE:KIND, got '{spec}'"))?;

    let kind: CellKind = kind
        .parse()
        .with_context(|| format!("In cell spec '{spec}'"))?;

    if name.is_empty() {
        bail!("Empty cell name in '{spec}'");
    }

    Ok((name.to_string(), Cell::named(value, kind, name)))
}
