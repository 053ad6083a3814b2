use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_REGULAR_URL: &str =
    "https://web.dmi.unict.it/sites/default/files/ESAMI%202025-26_v6.pdf";
pub const DEFAULT_OUT_OF_COURSE_URL: &str =
    "https://web.dmi.unict.it/sites/default/files/ESAMI%20Fuori%20Corso%202025-26.pdf";

/// Bad command line. The only configuration failure that warrants
/// printing usage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("unknown argument: {0}")]
    Unknown(String),
    #[error("missing value for {0}")]
    MissingValue(String),
}

/// Settings shared by both binaries. Defaults, then `EXAMS_*` environment
/// variables, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub regular_url: String,
    pub out_of_course_url: String,
    pub regular_pdf: PathBuf,
    pub out_of_course_pdf: PathBuf,
    pub http_timeout: Duration,
    pub allow_download: bool,
    pub reset_db: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("esami.db"),
            regular_url: DEFAULT_REGULAR_URL.to_string(),
            out_of_course_url: DEFAULT_OUT_OF_COURSE_URL.to_string(),
            regular_pdf: PathBuf::from("esami_regolari.pdf"),
            out_of_course_pdf: PathBuf::from("esami_fuori_corso.pdf"),
            http_timeout: Duration::from_secs(30),
            allow_download: true,
            reset_db: true,
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `EXAMS_*` key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = lookup("EXAMS_DB") {
            cfg.db_path = v.into();
        }
        if let Some(v) = lookup("EXAMS_REGULAR_URL") {
            cfg.regular_url = v;
        }
        if let Some(v) = lookup("EXAMS_OUT_OF_COURSE_URL") {
            cfg.out_of_course_url = v;
        }
        if let Some(v) = lookup("EXAMS_REGULAR_PDF") {
            cfg.regular_pdf = v.into();
        }
        if let Some(v) = lookup("EXAMS_OUT_OF_COURSE_PDF") {
            cfg.out_of_course_pdf = v.into();
        }
        if let Some(v) = lookup("EXAMS_HTTP_TIMEOUT_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("EXAMS_HTTP_TIMEOUT_SECS={:?}", v))?;
            cfg.http_timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }

    /// Apply the import flags. Unknown flags are an error.
    pub fn apply_args<I>(&mut self, args: I) -> Result<(), ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(a) = args.next() {
            match a.as_str() {
                "--db" => self.db_path = next_value(&mut args, "--db")?.into(),
                "--regular-pdf" => self.regular_pdf = next_value(&mut args, "--regular-pdf")?.into(),
                "--out-of-course-pdf" => {
                    self.out_of_course_pdf = next_value(&mut args, "--out-of-course-pdf")?.into()
                }
                "--regular-url" => self.regular_url = next_value(&mut args, "--regular-url")?,
                "--out-of-course-url" => {
                    self.out_of_course_url = next_value(&mut args, "--out-of-course-url")?
                }
                "--no-download" => self.allow_download = false,
                "--no-reset" => self.reset_db = false,
                other => return Err(ArgsError::Unknown(other.to_string())),
            }
        }
        Ok(())
    }
}

pub fn next_value(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String, ArgsError> {
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_env_overrides_defaults() {
        let vars: HashMap<&str, &str> = [("EXAMS_DB", "/tmp/x.db"), ("EXAMS_HTTP_TIMEOUT_SECS", "5")]
            .into_iter()
            .collect();
        let cfg = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(cfg.http_timeout, Duration::from_secs(5));
        assert_eq!(cfg.regular_url, DEFAULT_REGULAR_URL);
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = Config::from_lookup(|k| (k == "EXAMS_HTTP_TIMEOUT_SECS").then(|| "soon".into()));
        assert!(err.is_err());
    }

    #[test]
    fn test_flags() {
        let mut cfg = Config::default();
        cfg.apply_args(args(&["--db", "a.db", "--no-download", "--no-reset", "--regular-pdf", "r.json"]))
            .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("a.db"));
        assert_eq!(cfg.regular_pdf, PathBuf::from("r.json"));
        assert!(!cfg.allow_download);
        assert!(!cfg.reset_db);

        assert_eq!(
            Config::default().apply_args(args(&["--db"])),
            Err(ArgsError::MissingValue("--db".to_string()))
        );
        assert_eq!(
            Config::default().apply_args(args(&["--lista"])),
            Err(ArgsError::Unknown("--lista".to_string()))
        );
    }
}
