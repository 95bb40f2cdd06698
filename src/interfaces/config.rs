use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{Credentials, PageTarget, SmsRoute};
use crate::infrastructure::twilio_notifier::DEFAULT_API_BASE;
use crate::interfaces::cli::Args;

pub const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const DEFAULT_FREQUENCY_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set in environment")]
    MissingEnv(&'static str),
    #[error("\"{0}\" flag must be included")]
    MissingFlag(&'static str),
    #[error("\"frequency\" must be a positive number of seconds")]
    ZeroFrequency,
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Values a YAML config file may provide. Flags win over these.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub phrase: Option<String>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub frequency: Option<u64>,
    pub dryrun: Option<bool>,
}

impl FileConfig {
    pub fn load_from_file(
        path: &Path,
        env: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&expand_env(&raw, env)).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Immutable runtime configuration, resolved once at startup.
#[derive(Debug)]
pub struct Config {
    pub target: PageTarget,
    pub route: SmsRoute,
    pub interval: Duration,
    pub dry_run: bool,
    /// Empty in dry-run mode when the environment does not provide them.
    pub credentials: Credentials,
    pub api_base: String,
}

impl Config {
    /// Resolve against the process environment.
    pub fn from_env(args: &Args) -> Result<Self, ConfigError> {
        Self::resolve(args, |k| std::env::var(k).ok())
    }

    pub fn resolve(
        args: &Args,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load_from_file(path, &env)?,
            None => FileConfig::default(),
        };

        let dry_run = args.dryrun.or(file.dryrun).unwrap_or(false);

        let account_sid = non_empty(env(ENV_ACCOUNT_SID));
        let auth_token = non_empty(env(ENV_AUTH_TOKEN));
        if !dry_run {
            if account_sid.is_none() {
                return Err(ConfigError::MissingEnv(ENV_ACCOUNT_SID));
            }
            if auth_token.is_none() {
                return Err(ConfigError::MissingEnv(ENV_AUTH_TOKEN));
            }
        }

        let url = pick(&args.url, file.url).ok_or(ConfigError::MissingFlag("url"))?;
        let phrase = pick(&args.phrase, file.phrase).ok_or(ConfigError::MissingFlag("phrase"))?;
        let to = pick(&args.to, file.to).ok_or(ConfigError::MissingFlag("to"))?;
        let from = pick(&args.from, file.from).ok_or(ConfigError::MissingFlag("from"))?;

        let frequency = args
            .frequency
            .or(file.frequency)
            .unwrap_or(DEFAULT_FREQUENCY_SECS);
        if frequency == 0 {
            return Err(ConfigError::ZeroFrequency);
        }

        Ok(Self {
            target: PageTarget::new(url, phrase),
            route: SmsRoute { to, from },
            interval: Duration::from_secs(frequency),
            dry_run,
            credentials: Credentials::new(
                account_sid.unwrap_or_default(),
                auth_token.unwrap_or_default(),
            ),
            api_base: non_empty(args.api_base.clone())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// Flag value if set and non-empty, else the file value.
fn pick(flag: &Option<String>, file: Option<String>) -> Option<String> {
    non_empty(flag.clone()).or_else(|| non_empty(file))
}

/// Small `${VAR}` expansion; unknown variables are left as written.
fn expand_env(s: &str, env: &impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match env(name) {
                    Some(v) => out.push_str(&v),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
