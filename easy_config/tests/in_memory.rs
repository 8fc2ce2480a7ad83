//! Populate tests that inject the environment instead of mutating the process.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use easy_config::{
    Binder, CommandLine, ConfigError, ConfigResult, FieldSpec, FromRaw, MapEnv, Populate,
    RawLookup, SourceKind, TypeTag, docs,
};
use easy_config as aliased_config;
use rstest::{fixture, rstest};
use url::Url;

#[derive(Debug, Populate)]
struct ServiceSettings {
    #[config(env_or_cli = "endpoint", required)]
    endpoint: Url,
    #[config(env = "SERVICE_LISTEN", default = "127.0.0.1:8080")]
    listen: SocketAddr,
    #[config(cli = "timeout", default = "30")]
    timeout: Duration,
    #[config(cli)]
    verbose: bool,
    #[config(env_or_cli = "SERVICE_STATE_DIR")]
    state_dir: Option<PathBuf>,
    #[config(env = "SERVICE_WORKERS")]
    workers: u16,
    label: String,
}

#[derive(Debug, Populate)]
#[config(crate = "aliased_config")]
struct Aliased {
    #[config(cli = "name", required)]
    name: String,
}

/// Two failing fields; the first declared must be reported.
#[derive(Debug, Populate)]
struct TwoFailures {
    #[config(cli = "first", required)]
    first: u8,
    #[config(cli = "second", required)]
    second: u8,
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Fast,
    Safe,
}

impl FromRaw for Mode {
    const TYPE_TAG: TypeTag = TypeTag::Custom { name: "mode" };

    fn from_raw(raw: &str) -> Result<Self, easy_config::ConversionError> {
        match raw {
            "fast" => Ok(Self::Fast),
            "safe" => Ok(Self::Safe),
            other => Err(format!("unknown mode `{other}`").into()),
        }
    }
}

/// Hand-written implementation exercising the builder-style metadata API.
struct Tuning {
    mode: Mode,
    ratio: f64,
}

impl Populate for Tuning {
    fn field_specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::env_or_cli("mode", "TUNING_MODE", Mode::TYPE_TAG).with_default("safe"),
            FieldSpec::cli_named("ratio", f64::TYPE_TAG).required(),
        ]
    }

    fn bind(binder: &Binder<'_>) -> ConfigResult<Self> {
        Ok(Self {
            mode: binder.value("mode")?,
            ratio: binder.value("ratio")?,
        })
    }
}

#[fixture]
fn env() -> MapEnv {
    MapEnv::from_pairs([
        ("endpoint", "http://env.example"),
        ("SERVICE_WORKERS", "4"),
    ])
}

#[rstest]
fn binds_mixed_field_types(env: MapEnv) -> Result<()> {
    let settings = ServiceSettings::populate_from(
        ["verbose=true", "SERVICE_STATE_DIR=/var/lib/service", "unknown=ignored"],
        &env,
    )
    .map_err(|err| anyhow!(err))?;
    ensure!(settings.endpoint == Url::parse("http://env.example")?, "endpoint");
    ensure!(settings.listen == "127.0.0.1:8080".parse::<SocketAddr>()?, "listen");
    ensure!(settings.timeout == Duration::from_secs(30), "timeout");
    ensure!(settings.verbose, "verbose");
    ensure!(
        settings.state_dir == Some(PathBuf::from("/var/lib/service")),
        "state_dir {:?}",
        settings.state_dir
    );
    ensure!(settings.workers == 4, "workers {}", settings.workers);
    ensure!(settings.label.is_empty(), "unsourced label was set");
    Ok(())
}

#[rstest]
fn command_line_wins_over_environment(mut env: MapEnv) -> Result<()> {
    env.set("SERVICE_STATE_DIR", "/from/env");
    let settings = ServiceSettings::populate_from(
        ["endpoint=http://cli.example", "SERVICE_STATE_DIR=/from/cli"],
        &env,
    )
    .map_err(|err| anyhow!(err))?;
    ensure!(
        settings.endpoint == Url::parse("http://cli.example")?,
        "expected command-line endpoint, got {}",
        settings.endpoint
    );
    ensure!(
        settings.state_dir == Some(PathBuf::from("/from/cli")),
        "expected command-line state dir, got {:?}",
        settings.state_dir
    );
    Ok(())
}

#[rstest]
fn environment_only_field_ignores_command_line(env: MapEnv) -> Result<()> {
    let settings = ServiceSettings::populate_from(["SERVICE_WORKERS=9"], &env)
        .map_err(|err| anyhow!(err))?;
    ensure!(settings.workers == 4, "workers {}", settings.workers);
    Ok(())
}

#[rstest]
fn command_line_only_field_ignores_environment(mut env: MapEnv) -> Result<()> {
    env.set("verbose", "true");
    let settings = ServiceSettings::populate_from(Vec::<String>::new(), &env)
        .map_err(|err| anyhow!(err))?;
    ensure!(!settings.verbose, "verbose read from environment");
    Ok(())
}

#[rstest]
fn malformed_environment_value_is_type_mismatch(env: MapEnv) {
    let mut env = env;
    env.set("SERVICE_LISTEN", "not-an-address");
    let err = ServiceSettings::populate_from(Vec::<String>::new(), &env).err();
    assert!(
        matches!(err, Some(ConfigError::TypeMismatch { ref field, .. }) if field == "listen"),
        "{err:?}"
    );
}

#[test]
fn first_failing_field_is_reported() {
    let err = TwoFailures::populate_from(["second=not-a-number"], &MapEnv::new()).err();
    assert!(
        matches!(err, Some(ConfigError::Missing { ref field, .. }) if field == "first"),
        "{err:?}"
    );

    let err = TwoFailures::populate_from(["first=300", "second=x"], &MapEnv::new()).err();
    assert!(
        matches!(err, Some(ConfigError::TypeMismatch { ref field, .. }) if field == "first"),
        "{err:?}"
    );
}

#[test]
fn crate_alias_is_honoured() -> Result<()> {
    let aliased = Aliased::populate_from(["name=alias"], &MapEnv::new()).map_err(|err| anyhow!(err))?;
    ensure!(aliased.name == "alias", "got {}", aliased.name);
    Ok(())
}

#[rstest]
#[case::default_mode(&["ratio=0.5"], Mode::Safe)]
#[case::explicit_mode(&["ratio=0.5", "TUNING_MODE=fast"], Mode::Fast)]
fn hand_written_implementation(#[case] args: &[&str], #[case] expected: Mode) -> Result<()> {
    let tuning = Tuning::populate_from(args, &MapEnv::new()).map_err(|err| anyhow!(err))?;
    ensure!(tuning.mode == expected, "got {:?}", tuning.mode);
    ensure!(tuning.ratio.total_cmp(&0.5).is_eq(), "ratio {}", tuning.ratio);
    Ok(())
}

#[test]
fn custom_conversion_failures_name_the_custom_type() {
    let err = Tuning::populate_from(["ratio=1", "TUNING_MODE=turbo"], &MapEnv::new()).err();
    let rendered = err.map(|err| err.to_string()).unwrap_or_default();
    assert!(
        rendered.contains("expected mode: unknown mode `turbo`"),
        "unexpected message: {rendered}"
    );
}

#[test]
fn concurrent_populate_calls_are_independent() {
    let handles: Vec<_> = (0..8)
        .map(|n| {
            thread::spawn(move || {
                let lookup = RawLookup::new(
                    CommandLine::parse([format!("first={n}"), format!("second={}", n + 1)]),
                    Vec::<(String, String)>::new(),
                );
                TwoFailures::populate_with(&lookup).map(|v| (n, v.first, v.second))
            })
        })
        .collect();
    for handle in handles {
        match handle.join() {
            Ok(Ok((n, first, second))) => {
                assert_eq!(u32::from(first), n);
                assert_eq!(u32::from(second), n + 1);
            }
            other => panic!("populate failed: {other:?}"),
        }
    }
}

#[test]
fn describes_derived_fields() {
    let described = docs::describe::<ServiceSettings>();
    let names: Vec<_> = described.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        ["endpoint", "listen", "timeout", "verbose", "state_dir", "workers"]
    );
    let verbose = described.fields.iter().find(|f| f.name == "verbose");
    assert!(matches!(
        verbose,
        Some(field) if field.source == SourceKind::CommandLineOnly
            && field.cli_key.as_deref() == Some("verbose")
            && field.env_var.is_none()
            && field.value_type == TypeTag::Bool
    ));
    assert!(described.type_name.ends_with("ServiceSettings"));
}
