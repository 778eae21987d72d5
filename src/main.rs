use std::io::{self, BufRead, Write};

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::bail;
use log::debug;
use simplelog::LevelFilter;

use booltable::ops::legend;
use booltable::render::{RenderConfig, TablePreset};
use booltable::TruthTable;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Style {
    Utf8,
    Ascii,
    Markdown,
}

impl From<Style> for TablePreset {
    fn from(style: Style) -> Self {
        match style {
            Style::Utf8 => TablePreset::Utf8,
            Style::Ascii => TablePreset::Ascii,
            Style::Markdown => TablePreset::Markdown,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Expression to tabulate, e.g. "(a and b) or (not a)". Read from stdin when omitted.
    #[arg(value_name = "EXPR")]
    expression: Vec<String>,

    /// Print the operator legend and exit.
    #[clap(long)]
    legend: bool,

    /// Name of the result column.
    #[clap(long, value_name = "NAME")]
    name: Option<String>,

    /// Show only the variable columns and the result column.
    #[clap(long)]
    result_only: bool,

    /// Table border style.
    #[clap(long, value_enum, default_value = "utf8")]
    style: Style,

    /// Print every reduction step before the table.
    #[clap(long)]
    steps: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Prints the legend and reads one expression line from stdin.
fn prompt_expression() -> color_eyre::Result<String> {
    print!("{}", legend());
    print!("Enter expression: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    if line.trim().is_empty() {
        bail!("no expression given");
    }
    Ok(line.trim_end().to_string())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        level_filter(args.verbose),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    debug!("args = {:?}", args);

    if args.legend {
        print!("{}", legend());
        return Ok(());
    }

    let input = if args.expression.is_empty() {
        prompt_expression()?
    } else {
        args.expression.join(" ")
    };

    let mut tt = TruthTable::from_expression(&input)?;

    if args.steps {
        println!("{}", tt.expression());
        for step in tt.steps() {
            println!("  {}", step);
        }
    }

    if let Some(name) = &args.name {
        tt.rename_result(name.as_str())?;
    }

    let config = RenderConfig {
        preset: args.style.into(),
        result_only: args.result_only,
    };
    println!("{}", tt.render(&config));

    Ok(())
}
