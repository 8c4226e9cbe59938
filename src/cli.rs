use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Weather forecast for a small e-ink display";

const LONG_ABOUT: &str = "
Fetches a forecast for the configured location, either from the forecast API (when an api key
is configured) or from the public forecast page, and draws high/low temperature, UV index and
sky condition on the e-ink panel.

The panel is only redrawn when something shown on it has changed since the last run, so it is
fine to run this from cron every few minutes.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(short, long, default_value = "resources/config.toml", help = "Path to the configuration file")]
    pub config: String,

    #[arg(short, long, help = "Redraw the display even if the forecast is unchanged")]
    pub force: bool,

    #[arg(long, help = "Scrape the forecast page even if an api key is configured")]
    pub scrape_only: bool,
}
