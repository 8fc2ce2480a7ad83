//! Unit tests for the required/default/optional policy matrix.

use std::error::Error as _;
use std::ffi::OsString;

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use test_helpers::os;

use super::Binder;
use crate::convert::{FromRaw, TypeTag};
use crate::error::ConfigError;
use crate::field::{FieldSpec, SourceKind};
use crate::lookup::{CommandLine, EnvSource, RawLookup};
use crate::resolve::ValueOrigin;

const STRING: TypeTag = TypeTag::String;

#[fixture]
fn lookup() -> RawLookup {
    RawLookup::new(
        CommandLine::parse(["present=cli", "number=12", "bad_number=twelve"]),
        [("PRESENT_ENV", "env")],
    )
}

fn binder(specs: Vec<FieldSpec>, lookup: &RawLookup) -> Binder<'_> {
    Binder::new("Demo", specs, lookup)
}

#[rstest]
#[case::found_required(FieldSpec::cli("f", "present", STRING).required(), Some("cli"))]
#[case::found_optional(FieldSpec::cli("f", "present", STRING), Some("cli"))]
#[case::found_ignores_default(FieldSpec::cli("f", "present", STRING).with_default("d"), Some("cli"))]
#[case::absent_default(FieldSpec::cli("f", "absent", STRING).with_default("d"), Some("d"))]
#[case::absent_required_default(FieldSpec::cli("f", "absent", STRING).required().with_default("d"), Some("d"))]
#[case::absent_optional(FieldSpec::cli("f", "absent", STRING), None)]
fn policy_matrix(
    lookup: RawLookup,
    #[case] spec: FieldSpec,
    #[case] expected: Option<&str>,
) -> Result<()> {
    let binder = binder(vec![spec], &lookup);
    let value = binder.optional::<String>("f").map_err(|err| anyhow!(err))?;
    ensure!(
        value.as_deref() == expected,
        "expected {expected:?}, got {value:?}"
    );
    Ok(())
}

#[rstest]
fn absent_required_is_missing(lookup: RawLookup) {
    let spec = FieldSpec::env("f", "ABSENT_ENV", STRING).required();
    let binder = binder(vec![spec], &lookup);
    match binder.optional::<String>("f") {
        Err(ConfigError::Missing {
            field,
            source_kind,
            key,
        }) => {
            assert_eq!(field, "f");
            assert_eq!(source_kind, SourceKind::EnvironmentOnly);
            assert_eq!(key, "ABSENT_ENV");
        }
        other => panic!("expected Missing, got {other:?}"),
    }
}

#[rstest]
fn value_or_default_uses_zero_value(lookup: RawLookup) -> Result<()> {
    let spec = FieldSpec::env("count", "ABSENT_ENV", <u32 as FromRaw>::TYPE_TAG);
    let binder = binder(vec![spec], &lookup);
    let count: u32 = binder.value_or_default("count").map_err(|err| anyhow!(err))?;
    ensure!(count == 0, "expected zero, got {count}");
    Ok(())
}

#[rstest]
fn value_treats_unset_optional_as_missing(lookup: RawLookup) {
    let spec = FieldSpec::env("f", "ABSENT_ENV", STRING);
    let binder = binder(vec![spec], &lookup);
    let err = binder.value::<String>("f").err();
    assert!(matches!(err, Some(ConfigError::Missing { .. })), "{err:?}");
}

#[rstest]
fn converts_found_values(lookup: RawLookup) -> Result<()> {
    let spec = FieldSpec::env_or_cli("n", "number", <i64 as FromRaw>::TYPE_TAG).required();
    let binder = binder(vec![spec], &lookup);
    let n: i64 = binder.value("n").map_err(|err| anyhow!(err))?;
    ensure!(n == 12, "expected 12, got {n}");
    Ok(())
}

#[rstest]
#[case::from_source(FieldSpec::cli("n", "bad_number", <i32 as FromRaw>::TYPE_TAG), "twelve", ValueOrigin::CommandLine)]
#[case::from_default(FieldSpec::cli("n", "absent", <i32 as FromRaw>::TYPE_TAG).with_default("many"), "many", ValueOrigin::Default)]
fn conversion_failures_are_type_mismatches(
    lookup: RawLookup,
    #[case] spec: FieldSpec,
    #[case] expected_raw: &str,
    #[case] expected_origin: ValueOrigin,
) {
    let binder = binder(vec![spec], &lookup);
    match binder.value::<i32>("n") {
        Err(ConfigError::TypeMismatch {
            field,
            raw,
            expected,
            origin,
            ..
        }) => {
            assert_eq!(field, "n");
            assert_eq!(raw, expected_raw);
            assert_eq!(expected, <i32 as FromRaw>::TYPE_TAG);
            assert_eq!(origin, expected_origin);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[rstest]
fn unknown_field_is_reported(lookup: RawLookup) {
    let binder = binder(Vec::new(), &lookup);
    let err = binder.value::<String>("ghost").err();
    assert!(
        matches!(err, Some(ConfigError::UnknownField { type_name: "Demo", ref field }) if field == "ghost"),
        "{err:?}"
    );
}

/// Environment whose values are arbitrary operating-system strings.
struct OsEnv(Vec<(String, OsString)>);

impl EnvSource for OsEnv {
    fn vars(&self) -> Box<dyn Iterator<Item = (String, OsString)> + '_> {
        Box::new(self.0.iter().cloned())
    }
}

#[rstest]
#[case::string_field(<String as FromRaw>::TYPE_TAG)]
#[case::integer_field(<i32 as FromRaw>::TYPE_TAG)]
fn non_unicode_environment_value_is_type_mismatch(#[case] value_type: TypeTag) {
    let env = OsEnv(vec![("RAW_BYTES".to_owned(), os::non_unicode("12"))]);
    let lookup = RawLookup::snapshot(CommandLine::default(), &env);
    let spec = FieldSpec::env("f", "RAW_BYTES", value_type)
        .required()
        .with_default("7");
    let binder = binder(vec![spec], &lookup);
    let err = binder.value::<String>("f").err();
    let reason = err.as_ref().and_then(|error| error.source()).map(ToString::to_string);
    assert!(
        matches!(
            err,
            Some(ConfigError::TypeMismatch { ref raw, origin: ValueOrigin::Environment, .. })
                if raw.starts_with("12")
        ),
        "{err:?}"
    );
    assert_eq!(reason.as_deref(), Some("value is not valid UTF-8"));
}

#[test]
fn non_unicode_command_line_value_is_type_mismatch() {
    let lookup = RawLookup::new(
        CommandLine::parse_os([os::non_unicode("flag=")]),
        Vec::<(String, String)>::new(),
    );
    let binder = binder(vec![FieldSpec::cli_named("flag", STRING)], &lookup);
    let err = binder.optional::<String>("flag").err();
    assert!(
        matches!(err, Some(ConfigError::TypeMismatch { origin: ValueOrigin::CommandLine, .. })),
        "{err:?}"
    );
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "declares field \"f\" more than once")]
fn duplicate_field_names_are_rejected_in_debug_builds() {
    let lookup = RawLookup::default();
    let _binder = binder(
        vec![
            FieldSpec::cli("f", "first", STRING),
            FieldSpec::env("f", "SECOND", STRING),
        ],
        &lookup,
    );
}
