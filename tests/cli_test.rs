//! Tests for command dispatch, run against an in-memory writer.

use clap::Parser;
use rstest::rstest;

use orgchart::cli::commands::run;
use orgchart::cli::{Cli, CliError};
use orgchart::config::Settings;
use orgchart::domain::{DomainError, RenderStyle};
use orgchart::exitcode;
use orgchart::util::testing;

fn run_args(args: &[&str], settings: &Settings) -> (Result<i32, CliError>, String) {
    testing::init_test_setup();
    let cli = Cli::try_parse_from(std::iter::once("orgchart").chain(args.iter().copied()))
        .expect("parse args");
    let mut out = Vec::new();
    let result = run(&cli, settings, &mut out);
    (result, String::from_utf8(out).expect("utf8 output"))
}

#[rstest]
#[case(&[][..])]
#[case(&["print"][..])]
fn given_print_or_no_command_when_running_then_prints_outline(#[case] args: &[&str]) {
    let (result, out) = run_args(args, &Settings::default());
    assert_eq!(result.unwrap(), exitcode::OK);
    assert_eq!(
        out,
        "- CEO\n - VP_Sales\n  - Rep1\n  - Rep2\n - VP_Eng\n  - Dev1\n"
    );
}

#[rstest]
#[case(&["size"][..], "6\n")]
#[case(&["height"][..], "3\n")]
#[case(&["level", "Rep1"][..], "3\n")]
#[case(&["leaves"][..], "Rep1\nRep2\nDev1\n")]
#[case(&["contains", "Dev1"][..], "true\n")]
fn given_query_command_when_running_then_prints_answer(
    #[case] args: &[&str],
    #[case] expected: &str,
) {
    let (result, out) = run_args(args, &Settings::default());
    assert_eq!(result.unwrap(), exitcode::OK);
    assert_eq!(out, expected);
}

#[rstest]
fn given_absent_name_when_checking_contains_then_exits_absent() {
    let (result, out) = run_args(&["contains", "Intern"], &Settings::default());
    assert_eq!(result.unwrap(), exitcode::ABSENT);
    assert_eq!(out, "false\n");
}

#[rstest]
fn given_unknown_name_when_asking_level_then_fails_with_data_error() {
    let (result, _) = run_args(&["level", "Intern"], &Settings::default());
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        CliError::Domain(DomainError::PersonNotFound(ref name)) if name == "Intern"
    ));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[rstest]
fn given_ceo_flag_when_running_then_overrides_configured_ceo() {
    let settings = Settings {
        ceo: Some("Ada".into()),
        ..Settings::default()
    };

    let (_, from_config) = run_args(&["contains", "Ada"], &settings);
    assert_eq!(from_config, "true\n");

    let (_, from_flag) = run_args(&["--ceo", "Grace", "contains", "Grace"], &settings);
    assert_eq!(from_flag, "true\n");
}

#[rstest]
fn given_blank_ceo_when_running_then_fails_with_usage_error() {
    let (result, _) = run_args(&["--ceo", " ", "size"], &Settings::default());
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[rstest]
fn given_tree_style_flag_when_printing_then_overrides_configured_style() {
    let (result, out) = run_args(&["print", "--style", "tree"], &Settings::default());
    assert_eq!(result.unwrap(), exitcode::OK);
    assert!(out.starts_with("CEO\n"));
    assert!(out.contains("VP_Sales"));
    assert!(!out.contains("- CEO"));
}

#[rstest]
fn given_configured_indent_when_printing_then_uses_it() {
    let mut settings = Settings::default();
    settings.render.indent = 2;
    settings.render.style = RenderStyle::Indent;
    let (_, out) = run_args(&["print"], &settings);
    assert!(out.contains("\n    - Rep1\n"), "{out}");
}

#[rstest]
fn given_config_template_when_running_then_prints_commented_template() {
    let (result, out) = run_args(&["config", "template"], &Settings::default());
    assert_eq!(result.unwrap(), exitcode::OK);
    assert!(out.contains("[render]"));
}

#[rstest]
fn given_config_show_when_running_then_prints_effective_toml() {
    let (result, out) = run_args(&["config", "show"], &Settings::default());
    assert_eq!(result.unwrap(), exitcode::OK);
    assert!(out.contains("indent = 1"), "{out}");
}

#[rstest]
fn given_completion_command_when_running_then_writes_script() {
    let (result, out) = run_args(&["completion", "bash"], &Settings::default());
    assert_eq!(result.unwrap(), exitcode::OK);
    assert!(out.contains("orgchart"));
}
