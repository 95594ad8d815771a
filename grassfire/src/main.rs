use grassfire::cli::{self, Cli};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Cli = argh::from_env();
    cli::run(&args.command)?;

    Ok(())
}
