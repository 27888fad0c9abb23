use clap::Parser;

/// Exploratory entry point: prints whatever it is given and the version
#[derive(Parser, Debug)]
#[command(name = "echo_args", disable_help_flag = true, disable_version_flag = true)]
#[command(about = "Echo the given arguments and the program version")]
struct Cli {
    /// Free-form arguments; content is ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    println!("Args: {:?}", cli.args);
    println!("Version: {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}
