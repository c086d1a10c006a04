// src/bin/cli.rs
use schulfinder::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let code = cli::run(std::env::args_os())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
