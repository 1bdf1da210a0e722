#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "structpack", about = "Fixed-layout binary structure tools")]
struct Cli {
	/// Log debug output to stderr (otherwise `RUST_LOG` decides).
	#[arg(long, short, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print a definition's declaration, layout, and width.
	Describe(cmd::describe::Args),
	/// Pack named values into hex.
	Pack(cmd::pack::Args),
	/// Unpack bytes into named values.
	Unpack(cmd::unpack::Args),
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_logging(verbose: bool) {
	let mut builder = env_logger::Builder::from_default_env();
	if verbose {
		builder.filter_level(log::LevelFilter::Debug);
	}
	builder.format_timestamp(None).init();
}

fn run(command: Commands) -> cmd::Result<()> {
	match command {
		Commands::Describe(args) => cmd::describe::run(args),
		Commands::Pack(args) => cmd::pack::run(args),
		Commands::Unpack(args) => cmd::unpack::run(args),
	}
}
