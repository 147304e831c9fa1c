//! Print the OpenAPI document as JSON.
//!
//! Document metadata follows the `APP_DOCS_*` settings, so the dump matches
//! what a deployed server serves at `/api/schema/`.

use std::error::Error;
use std::ffi::OsString;

use clap::Parser;
use ortho_config::OrthoConfig;

use groundwork::doc::openapi_for;
use groundwork::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the REST API OpenAPI document")]
struct Cli {
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let settings = Settings::load_from_iter([OsString::from("openapi-dump")])?;
    let doc = openapi_for(&settings);
    let json = if cli.pretty {
        doc.to_pretty_json()?
    } else {
        doc.to_json()?
    };
    println!("{json}");
    Ok(())
}
