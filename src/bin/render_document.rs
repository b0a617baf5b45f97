//! Render a business record to PDF
//!
//! Reads one JSON record (tagged by `document_type`) and writes the PDF under
//! its suggested filename.
//!
//! Usage:
//!   render_document record.json
//!   render_document record.json --output-dir out --config render.json --compress
//!   render_document record.json --locale locale.json --company company.json
//!
//! `RUST_LOG=stockdocs=debug` shows layout decisions; `--verbose` sets it.

use stockdocs::config::RenderConfig;
use stockdocs::format::LocaleFormatter;
use stockdocs::renderer::render_record;
use stockdocs::schemas::{build_company_branding, CompanyDetails, DocumentRecord};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: render_document <record.json> [--config FILE] [--locale FILE] \
                     [--company FILE] [--company-name NAME] [--output-dir DIR] [--compress] [--verbose]";

struct CliArgs {
    record: PathBuf,
    config: Option<PathBuf>,
    locale: Option<PathBuf>,
    company: Option<PathBuf>,
    company_name: Option<String>,
    output_dir: PathBuf,
    compress: bool,
    verbose: bool,
}

impl CliArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut record = None;
        let mut config = None;
        let mut locale = None;
        let mut company = None;
        let mut company_name = None;
        let mut output_dir = PathBuf::from(".");
        let mut compress = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "--locale" | "--company" | "--company-name" | "--output-dir" => {
                    let flag = args[i].clone();
                    i += 1;
                    let Some(value) = args.get(i) else {
                        return Err(format!("{} needs a value", flag));
                    };
                    match flag.as_str() {
                        "--config" => config = Some(PathBuf::from(value)),
                        "--locale" => locale = Some(PathBuf::from(value)),
                        "--company" => company = Some(PathBuf::from(value)),
                        "--company-name" => company_name = Some(value.clone()),
                        _ => output_dir = PathBuf::from(value),
                    }
                },
                "--compress" => compress = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => return Err(USAGE.to_string()),
                other if other.starts_with('-') => {
                    return Err(format!("Unknown option: {}\n{}", other, USAGE));
                },
                other => record = Some(PathBuf::from(other)),
            }
            i += 1;
        }

        let record = record.ok_or_else(|| USAGE.to_string())?;
        Ok(Self {
            record,
            config,
            locale,
            company,
            company_name,
            output_dir,
            compress,
            verbose,
        })
    }
}

fn run(args: &CliArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };
    if args.compress {
        config = config.with_compress(true);
    }

    let formatter: LocaleFormatter = match &args.locale {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => LocaleFormatter::default(),
    };

    let details: CompanyDetails = match &args.company {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => CompanyDetails::default(),
    };
    let branding = build_company_branding(args.company_name.as_deref(), &details);

    let record = DocumentRecord::from_json_str(&fs::read_to_string(&args.record)?)?;
    let rendered = render_record(&record, &formatter, branding.as_ref(), &config)?;
    println!("{}: {} page(s), {} bytes", rendered.filename, rendered.page_count, rendered.bytes.len());
    Ok(rendered.save_to(&args.output_dir)?)
}

fn main() -> ExitCode {
    let args = match CliArgs::from_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        },
    };

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_module("stockdocs", log::LevelFilter::Debug);
    }
    logger.init();

    match run(&args) {
        Ok(path) => {
            println!("Saved {}", path.display());
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
