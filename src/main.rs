use capitask::CapitaskError;
use capitask::cli::commands;
use capitask::cli::{Cli, Commands};
use capitask::config;
use capitask::logging::init_logging;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
        // Continue without logging rather than bail.
    }

    let overrides = build_cli_overrides(&cli);

    let result = match cli.command {
        Commands::Init { force } => commands::init::execute(force, &overrides),
        Commands::Create(args) => commands::create::execute(args, cli.json, &overrides),
        Commands::Update(args) => commands::update::execute(args, cli.json, &overrides),
        Commands::Move { ref id, ref status } => commands::mv::execute(id, status, &overrides),
        Commands::List(args) => commands::list::execute(args, cli.json, &overrides),
        Commands::Show { ref id } => commands::show::execute(id, cli.json, &overrides),
        Commands::Comment {
            ref id,
            ref text,
            ref author,
        } => commands::comment::execute(id, text, author, &overrides),
        Commands::Link(ref args) => commands::link::link(args, &overrides),
        Commands::Unlink(ref args) => commands::link::unlink(args, &overrides),
        Commands::Sprint(ref args) => commands::sprint::execute(args, cli.json, &overrides),
        Commands::Export(ref args) => commands::export::execute(args, &overrides),
        Commands::Gantt(ref args) => commands::gantt::execute(args, cli.json, &overrides),
        Commands::Config { ref command } => commands::config::execute(command, cli.json, &overrides),
    };

    if let Err(e) = result {
        handle_error(&e);
    }
}

fn handle_error(err: &CapitaskError) -> ! {
    eprintln!("Error: {err}");
    if let Some(suggestion) = err.suggestion() {
        eprintln!("  {suggestion}");
    }
    std::process::exit(err.exit_code());
}

fn build_cli_overrides(cli: &Cli) -> config::CliOverrides {
    config::CliOverrides {
        data: cli.data.clone(),
        lang: cli.lang,
    }
}
