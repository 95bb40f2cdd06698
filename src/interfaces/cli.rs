use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Command-line flags. Everything is optional here so a config file can fill
/// the gaps; required values are enforced when the config is resolved.
#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "pagewatch",
    about = "Polls a web page and sends an SMS once a phrase disappears from it"
)]
pub struct Args {
    /// Page to check, ex: "https://google.com"
    #[arg(long)]
    pub url: Option<String>,

    /// Phrase to look for, ex: "Hello World"
    #[arg(long)]
    pub phrase: Option<String>,

    /// Recipient's phone number, ex: "503-123-4567"
    #[arg(long)]
    pub to: Option<String>,

    /// Sender's phone number; must exist in the messaging account
    #[arg(long)]
    pub from: Option<String>,

    /// How often the page is checked, in seconds [default: 60]
    #[arg(long)]
    pub frequency: Option<u64>,

    /// Log the notification instead of sending it; `--dryrun=false` overrides a config file
    #[arg(
        long,
        alias = "dry-run",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub dryrun: Option<bool>,

    /// Optional YAML file supplying any of the flags above
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, hide = true)]
    pub api_base: Option<String>,
}

/// Long flags that may also be written with a single dash, e.g. `-url`.
const SINGLE_DASH_FLAGS: [&str; 7] = [
    "url", "phrase", "to", "from", "frequency", "dryrun", "config",
];

/// Rewrite `-url` / `-url=x` style flags to `--url` / `--url=x` so clap accepts
/// them. Nothing after a bare `--` is touched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        let arg: OsString = arg.into();
        if passthrough {
            out.push(arg);
            continue;
        }
        match arg.to_str() {
            Some("--") => {
                passthrough = true;
                out.push(arg);
            }
            Some(s) if is_single_dash_long(s) => out.push(OsString::from(format!("-{s}"))),
            _ => out.push(arg),
        }
    }
    out
}

fn is_single_dash_long(s: &str) -> bool {
    match s.strip_prefix('-') {
        Some(rest) if !rest.starts_with('-') => {
            let name = rest.split('=').next().unwrap_or(rest);
            SINGLE_DASH_FLAGS.contains(&name)
        }
        _ => false,
    }
}

impl Args {
    /// Parse the process arguments, accepting single-dash long flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}
