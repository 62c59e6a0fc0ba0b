use anyhow::Result;
use clap::{Parser, ValueEnum};
use grout_resolve::{full_json_handler, json_handler, Resolver};
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grout-resolve")]
#[command(about = "Match a url against a route pattern and print its parameters", long_about = None)]
struct Cli {
	/// Route pattern, e.g. `/:lang/products/:id[?:tab]`
	pattern: String,

	/// Absolute or relative url to resolve
	url: String,

	#[arg(short, long, value_enum, default_value_t = Format::Params)]
	format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
	/// Only the bound parameters
	Params,
	/// Scheme, host, path and parameters
	Full,
}

fn main() -> Result<()> {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "grout_resolve=info".into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
		.init();

	let cli = Cli::parse();
	run(&cli, &mut io::stdout().lock())
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
	let resolver = Resolver::new();
	let response = match cli.format {
		Format::Params => resolver.resolve(&cli.pattern, &cli.url, json_handler),
		Format::Full => resolver.resolve(&cli.pattern, &cli.url, full_json_handler),
	};

	tracing::info!(pattern = %cli.pattern, url = %cli.url, failed = response.is_err(), "resolved");
	response.render(out)
}
