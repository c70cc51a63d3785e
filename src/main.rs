//! export-as - export HTML tables and elements to files

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use export_as::{Document, ExportAs, ExportConfig, Format, dom};

#[derive(Parser)]
#[command(name = "export-as")]
#[command(version, about = "Export HTML tables and elements to files", long_about = None)]
#[command(after_help = "EXAMPLES:
    export-as page.html table.csv --element grid    Export #grid as CSV
    export-as page.html table.xlsx --element grid   Export #grid as a workbook
    export-as page.html page.pdf                    Export the whole page as PDF")]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file; the export format comes from its extension
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Id of the element to export (default: the whole input markup)
    #[arg(short, long)]
    element: Option<String>,

    /// Worksheet name for xls/xlsx output
    #[arg(long)]
    sheet: Option<String>,

    /// Landscape pages for doc/docx output
    #[arg(long)]
    landscape: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => {
            if !cli.quiet {
                println!("wrote {}", cli.output.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> export_as::Result<()> {
    let format = Format::from_path(&cli.output)?;
    let bytes = fs::read(&cli.input)?;
    let markup = dom::decode_markup(&bytes).into_owned();
    let document = Document::parse(&markup);

    let source = cli.element.clone().unwrap_or(markup);
    let mut config = ExportConfig::new(format, source);
    config.options.sheet.sheet_name = cli.sheet.clone();
    config.options.doc.landscape = cli.landscape;

    let out_dir = cli.output.parent().filter(|p| !p.as_os_str().is_empty());
    let service = ExportAs::new().with_output_dir(out_dir.unwrap_or(Path::new(".")));

    let base_name = cli
        .output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    service.save(&document, &mut config, base_name)
}
