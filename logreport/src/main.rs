use clap::{Parser, Subcommand};
use logreport_core::cli::{self, AnalyzeArgs, ConfigCmd};
use logreport_core::logging::{LogFormat, default_log_format, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "logreport",
    version,
    about = "logreport: access log traffic and failure report"
)]
struct Cli {
    /// Diagnostic log format on stderr (default: pretty on a terminal, JSON otherwise)
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze an access log and write the report
    Analyze(AnalyzeArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    let result = match cli.command {
        Command::Analyze(args) => cli::run_analyze(args),
        Command::Config { cmd } => cli::conf::run(cmd),
    };

    if let Err(e) = result {
        eprintln!("logreport error: {e:#}");
        std::process::exit(1);
    }
}
