//! Subcommands. Each one fills a console form and dispatches one action.

mod item;
mod shopcart;

use std::process::ExitCode;

use shopcart_console::{
    api::ShopcartApi,
    config::{DEFAULT_API_URL, parse_api_url},
    controller::Console,
};

pub use item::ItemCommand;
pub use shopcart::ShopcartCommand;

/// Build the API client from `--api-url`, `SHOPCART_API_URL` or the default.
///
/// # Errors
///
/// Returns an error if the URL is not an absolute http(s) URL.
pub fn connect(api_url: Option<&str>) -> Result<ShopcartApi, Box<dyn std::error::Error>> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let raw = api_url.map_or_else(
        || std::env::var("SHOPCART_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        str::to_string,
    );
    let url = parse_api_url(&raw)?;
    tracing::debug!(api_url = %url, "using shopcart service");

    Ok(ShopcartApi::new(url)?)
}

/// Print the flash line and the result table.
#[allow(clippy::print_stdout)]
pub fn report(console: &Console) -> ExitCode {
    let flash = console.flash.text();
    if !flash.is_empty() {
        println!("{flash}");
    }

    if !console.results.is_empty() {
        println!();
        println!("{}", console.results.to_text());
    }

    if console.flash.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
