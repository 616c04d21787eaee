//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "excess-watch")]
#[command(author, version = env!("APP_VERSION"), about = "Notify when a solar station flips between excess and deficit")]
#[command(
    long_about = "Runs one polling cycle: fetches the station overview from the portal,\n\
    stores the reading, forwards it to the spreadsheet webhook and sends a Telegram\n\
    message if the excess state changed since the previous run.\n\
    \nSchedule it externally, e.g. every 5 minutes from cron:\n  \
    */5 * * * * excess-watch -c /etc/excess-watch/config.json -o /var/lib/excess-watch/old.json"
)]
pub struct Cli {
    /// State file holding the previous reading
    #[arg(short = 'o', long = "output", default_value = "old.json")]
    pub output: PathBuf,

    /// Configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short = 'c', long = "config", default_value = "config.json")]
    pub config: PathBuf,
}
