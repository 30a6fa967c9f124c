//! Command-line parsing and dispatch for the `build-identity` binary.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::build_info::VersionIdentity;
use crate::util::config::{Config, ConfigWriter};

pub const USAGE: &str = "usage: build-identity [--config <path>] [summary | verbose | json | init | check <id> [--on-mismatch raise|warn]]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Summary,
    Verbose,
    Json,
    /// Write a configuration template to the config path.
    Init,
    Check {
        foreign_id: String,
        /// Mode as typed on the command line; the configured default applies when absent.
        on_mismatch: Option<String>,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

impl Invocation {
    /// Parse arguments, program name excluded.
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().peekable();

        let mut config_path = None;
        if args.peek().map(String::as_str) == Some("--config") {
            args.next();
            config_path = Some(PathBuf::from(args.next().context("--config needs a path")?));
        }

        let command = match args.next().as_deref() {
            None | Some("summary") => Command::Summary,
            Some("verbose") | Some("--verbose") => Command::Verbose,
            Some("json") | Some("--json") => Command::Json,
            Some("init") => Command::Init,
            Some("check") => {
                let foreign_id = args.next().context(USAGE)?;
                let on_mismatch = match args.next().as_deref() {
                    None => None,
                    Some("--on-mismatch") => {
                        Some(args.next().context("--on-mismatch needs a value")?)
                    }
                    Some(other) => bail!("unexpected argument {other}\n{USAGE}"),
                };
                Command::Check {
                    foreign_id,
                    on_mismatch,
                }
            }
            Some("help") | Some("--help") | Some("-h") => Command::Help,
            Some(other) => bail!("unknown command {other}\n{USAGE}"),
        };

        if let Some(extra) = args.next() {
            bail!("unexpected argument {extra}\n{USAGE}");
        }

        Ok(Self {
            config_path,
            command,
        })
    }
}

/// Run `command` against `identity`, writing normal output to `out`.
///
/// A mismatch under `raise` comes back as an error wrapping
/// [`crate::IdentityError::VersionMismatch`], which makes the binary exit non-zero.
pub fn run<W: Write>(
    invocation: &Invocation,
    config: &Config,
    identity: &VersionIdentity,
    out: &mut W,
) -> anyhow::Result<()> {
    match &invocation.command {
        Command::Summary => writeln!(out, "{}", identity.summary())?,
        Command::Verbose => writeln!(out, "{}", identity.verbose_message())?,
        Command::Json => writeln!(out, "{}", serde_json::to_string_pretty(identity)?)?,
        Command::Init => {
            let path = invocation
                .config_path
                .clone()
                .unwrap_or_else(crate::find_config_file_path);
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            ConfigWriter::write_yaml_with_dir(&ConfigWriter::generate_template(), &path)?;
            writeln!(out, "wrote {}", path.display())?;
        }
        Command::Check {
            foreign_id,
            on_mismatch,
        } => match on_mismatch {
            Some(mode) => identity.check_match_str(foreign_id, mode)?,
            None => identity.check_match(foreign_id, config.on_mismatch)?,
        },
        Command::Help => writeln!(out, "{USAGE}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::OnMismatch;
    use crate::error::IdentityError;
    use crate::test_support::capture_warnings;
    use crate::util::config::ConfigLoader;

    const LOCAL: VersionIdentity = VersionIdentity::new("1.0.dev3");

    fn parse(args: &[&str]) -> anyhow::Result<Invocation> {
        Invocation::parse(args.iter().map(|s| s.to_string()))
    }

    fn run_args(args: &[&str], config: &Config) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let result = parse(args).and_then(|inv| run(&inv, config, &LOCAL, &mut out));
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_config_and_check() {
        let inv = parse(&["--config", "x.yaml", "check", "0.9", "--on-mismatch", "warn"]).unwrap();
        assert_eq!(inv.config_path, Some(PathBuf::from("x.yaml")));
        assert_eq!(
            inv.command,
            Command::Check {
                foreign_id: "0.9".to_string(),
                on_mismatch: Some("warn".to_string()),
            }
        );
        assert_eq!(parse(&[]).unwrap().command, Command::Summary);
    }

    #[test]
    fn leftover_arguments_are_rejected() {
        for args in [
            &["check", "0.9", "--on-mismatch", "warn", "extra"][..],
            &["summary", "extra"][..],
            &["check", "0.9", "junk"][..],
            &["check"][..],
        ] {
            let err = parse(args).unwrap_err();
            assert!(err.to_string().contains("usage:"), "{args:?}: {err}");
        }
    }

    #[test]
    fn check_falls_back_to_configured_mode() {
        let config = Config {
            on_mismatch: OnMismatch::Warn,
            ..Config::default()
        };
        let ((result, _), warnings) = capture_warnings(|| run_args(&["check", "0.9"], &config));
        assert!(result.is_ok());
        assert_eq!(warnings.len(), 1);

        let (result, _) = run_args(&["check", "0.9"], &Config::default());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<IdentityError>().unwrap().is_mismatch());
    }

    #[test]
    fn command_line_mode_overrides_config() {
        let config = Config {
            on_mismatch: OnMismatch::Warn,
            ..Config::default()
        };
        let (result, _) = run_args(&["check", "0.9", "--on-mismatch", "raise"], &config);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Program id (1.0.dev3) does not match given id (0.9)."
        );
    }

    #[test]
    fn unknown_mode_is_invalid_argument() {
        let (result, _) = run_args(
            &["check", "1.0.dev3", "--on-mismatch", "ignore"],
            &Config::default(),
        );
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<IdentityError>(),
            Some(&IdentityError::InvalidArgument {
                value: "ignore".to_string()
            })
        );
    }

    #[test]
    fn matching_check_prints_nothing() {
        let (result, out) = run_args(&["check", "1.0.dev3"], &Config::default());
        assert!(result.is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn display_commands_write_identity() {
        let (_, out) = run_args(&["verbose"], &Config::default());
        assert!(out.contains("Id: 1.0.dev3"));

        let (_, out) = run_args(&["json"], &Config::default());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["identifier"], "1.0.dev3");

        let (_, out) = run_args(&[], &Config::default());
        assert!(out.contains("id 1.0.dev3"));
    }

    #[test]
    fn init_writes_loadable_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("build-identity.yaml");
        let path_arg = path.to_str().unwrap();

        let (result, out) = run_args(&["--config", path_arg, "init"], &Config::default());
        result.unwrap();
        assert!(out.starts_with("wrote "));
        assert_eq!(ConfigLoader::read_yaml(&path).unwrap(), Config::default());

        let (result, _) = run_args(&["--config", path_arg, "init"], &Config::default());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }
}
