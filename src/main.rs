//! Tvo installer - provisions the Tvo security scan platform on AWS

use clap::Parser;

use tvo_installer::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
