//! Unit tests for CLI module
//!
//! Tests tree assembly, dispatch ordering, error paths and the version
//! report. Commands write into in-memory buffers; nothing touches the
//! process environment.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::{cell::RefCell, io, rc::Rc};

use crate::{
    cli::{
        CliError, CommandNode, DispatchState, Dispatcher,
        formatting::{format_error, format_toml_value},
        report::write_error,
        root_command,
        version::{render_version, version_command},
    },
    config::{ConfigError, Options, SettingsOverrides},
    identity::AppIdentity,
};

type Log = Rc<RefCell<Vec<String>>>;

fn recording(log: &Log, name: &str, result: Result<&str, &str>) -> CommandNode {
    let log = Rc::clone(log);
    let name_owned = name.to_string();
    let result = result.map(str::to_string).map_err(str::to_string);

    CommandNode::new(name, format!("{name} command")).run(move |ctx| {
        log.borrow_mut().push(format!(
            "run {name_owned} initialized={}",
            ctx.options.is_initialized()
        ));
        result.clone().map_err(CliError::ExecutionError)
    })
}

fn dispatcher_with_hook(log: &Log) -> Dispatcher {
    let mut dispatcher = Dispatcher::new(root_command(), Options::new());
    let hook_log = Rc::clone(log);

    dispatcher.on_initialize(move |options| {
        hook_log.borrow_mut().push("init".to_string());
        options.set_overrides(SettingsOverrides {
            port: Some(4000),
            ..Default::default()
        });
        let home = std::env::temp_dir();
        let env = [("HOME", home.display().to_string())].into_iter().collect();
        options.init_config_with("immuadmin-test", &env)
    });

    dispatcher
}

fn run(dispatcher: &mut Dispatcher, args: &[&str]) -> (Result<(), CliError>, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();

    let argv = std::iter::once("immuadmin").chain(args.iter().copied());
    let result = dispatcher.execute_from(argv, &mut out, &mut err);

    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn hook_runs_once_before_selected_command() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    dispatcher.add_command(recording(&log, "status", Ok("up")));

    let (result, out, err) = run(&mut dispatcher, &["status"]);

    assert!(result.is_ok());
    assert_eq!(out, "up\n");
    assert!(err.is_empty());
    assert_eq!(
        *log.borrow(),
        vec!["init".to_string(), "run status initialized=true".to_string()]
    );
    assert_eq!(dispatcher.state(), DispatchState::Succeeded);
    assert_eq!(dispatcher.options().settings().unwrap().port, 4000);
}

#[test]
fn hook_runs_for_nested_commands() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    let mut group = CommandNode::new("user", "User management");
    group.add_command(recording(&log, "list", Ok("")));
    dispatcher.add_command(group);

    let (result, out, _) = run(&mut dispatcher, &["user", "list"]);

    assert!(result.is_ok());
    assert!(out.is_empty());
    assert_eq!(
        *log.borrow(),
        vec!["init".to_string(), "run list initialized=true".to_string()]
    );
}

#[test]
fn hooks_run_in_registration_order() {
    let log: Log = Rc::default();
    let mut dispatcher = Dispatcher::new(root_command(), Options::new());
    for name in ["first", "second"] {
        let log = Rc::clone(&log);
        dispatcher.on_initialize(move |_| {
            log.borrow_mut().push(name.to_string());
            Ok(())
        });
    }
    dispatcher.add_command(recording(&log, "status", Ok("")));

    run(&mut dispatcher, &["status"]).0.unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "first".to_string(),
            "second".to_string(),
            "run status initialized=false".to_string()
        ]
    );
}

#[test]
fn command_error_is_returned_not_printed() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    dispatcher.add_command(recording(&log, "backup", Err("backup failed: disk full")));

    let (result, out, err) = run(&mut dispatcher, &["backup"]);

    let e = result.unwrap_err();
    assert_eq!(e.to_string(), "backup failed: disk full");
    assert!(out.is_empty());
    assert!(err.is_empty(), "root silences errors, got {err:?}");
    assert_eq!(dispatcher.state(), DispatchState::Failed);
}

#[test]
fn unsilenced_root_prints_error_itself() {
    let log: Log = Rc::default();
    let mut dispatcher = Dispatcher::new(CommandNode::new("tool", "A tool"), Options::new());
    dispatcher.add_command(recording(&log, "fail", Err("boom")));

    let (result, _, err) = run(&mut dispatcher, &["fail"]);

    assert!(result.is_err());
    assert_eq!(err, "Error: boom\n");
}

struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn failed_error_write_keeps_command_error() {
    let log: Log = Rc::default();
    let mut dispatcher = Dispatcher::new(CommandNode::new("tool", "A tool"), Options::new());
    dispatcher.add_command(recording(&log, "fail", Err("boom")));

    let mut out = Vec::new();
    let result = dispatcher.execute_from(["tool", "fail"], &mut out, &mut BrokenPipe);

    let e = result.unwrap_err();
    assert!(matches!(e, CliError::ExecutionError(_)), "{e:?}");
    assert_eq!(e.to_string(), "boom");
}

#[test]
fn hook_failure_stops_before_command() {
    let log: Log = Rc::default();
    let mut dispatcher = Dispatcher::new(root_command(), Options::new());
    dispatcher.on_initialize(|_| Err(ConfigError::NotInitialized));
    dispatcher.add_command(recording(&log, "status", Ok("up")));

    let (result, out, _) = run(&mut dispatcher, &["status"]);

    assert!(matches!(result, Err(CliError::Config(ConfigError::NotInitialized))));
    assert!(out.is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn root_without_subcommand_prints_help_and_skips_hook() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    dispatcher.add_command(recording(&log, "status", Ok("up")));

    let (result, out, err) = run(&mut dispatcher, &[]);

    assert!(result.is_ok());
    assert!(out.contains("Usage:"), "{out}");
    assert!(out.contains("status"), "{out}");
    assert!(err.is_empty());
    assert!(log.borrow().is_empty());
    assert!(!dispatcher.options().is_initialized());
}

#[test]
fn help_flag_prints_long_description() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);

    let (result, out, _) = run(&mut dispatcher, &["--help"]);

    assert!(result.is_ok());
    assert!(out.contains("IMMUADMIN_ADDRESS=127.0.0.1"), "{out}");
    assert!(out.contains("IMMUADMIN_PORT=3322"), "{out}");
    assert!(out.contains("IMMUADMIN_MTLS=true"), "{out}");
    assert!(log.borrow().is_empty());
}

#[test]
fn group_without_subcommand_prints_its_help() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    let mut group = CommandNode::new("user", "User management");
    group.add_command(recording(&log, "list", Ok("")));
    dispatcher.add_command(group);

    let (result, out, _) = run(&mut dispatcher, &["user"]);

    assert!(result.is_ok());
    assert!(out.contains("list"), "{out}");
    assert!(log.borrow().is_empty());
}

#[test]
fn unknown_subcommand_is_an_error_without_usage() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    dispatcher.add_command(recording(&log, "status", Ok("up")));

    let (result, out, _) = run(&mut dispatcher, &["nope"]);

    let e = result.unwrap_err();
    assert!(matches!(e, CliError::InvalidArguments(_)));
    let message = e.to_string();
    assert!(message.contains("nope"), "{message}");
    assert!(!message.contains("Usage:"), "{message}");
    assert!(out.is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn missing_required_argument_names_it() {
    let mut dispatcher = crate::cli::build(&AppIdentity::default());

    let (result, out, _) = run(&mut dispatcher, &["config", "get"]);

    let e = result.unwrap_err();
    assert!(matches!(e, CliError::InvalidArguments(_)));
    let message = e.to_string();
    assert!(message.contains("not provided"), "{message}");
    assert!(message.contains("<KEY>"), "{message}");
    assert!(!message.contains('\n'), "{message}");
    assert!(!message.contains("Usage:"), "{message}");
    assert!(out.is_empty());
    assert_eq!(dispatcher.state(), DispatchState::Failed);
}

#[test]
fn dispatcher_executes_only_once() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    dispatcher.add_command(recording(&log, "status", Ok("up")));

    run(&mut dispatcher, &["status"]).0.unwrap();
    let (second, _, _) = run(&mut dispatcher, &["status"]);

    assert!(matches!(second, Err(CliError::ExecutionError(_))));
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn duplicate_registration_replaces_in_place() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    dispatcher.add_command(recording(&log, "version", Ok("old")));
    dispatcher.add_command(recording(&log, "status", Ok("up")));
    dispatcher.add_command(recording(&log, "version", Ok("new")));

    let names: Vec<&str> = dispatcher.root().children().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["version", "status"]);

    let (result, out, _) = run(&mut dispatcher, &["version"]);

    assert!(result.is_ok());
    assert_eq!(out, "new\n");
    assert_eq!(
        log.borrow()
            .iter()
            .filter(|entry| entry.starts_with("run version"))
            .count(),
        1
    );
}

#[test]
fn root_flags_are_set() {
    let root = root_command();

    assert_eq!(root.name(), "immuadmin");
    assert!(root.is_usage_silenced());
    assert!(root.is_errors_silenced());
    assert!(root.is_auto_gen_tag_disabled());
    assert!(!root.is_runnable());
    assert!(root.long().unwrap().contains("Environment variables:"));
}

#[test]
fn built_tree_has_config_and_version() {
    let dispatcher = crate::cli::build(&AppIdentity::default());
    let root = dispatcher.root();

    assert!(root.find("version").is_some_and(CommandNode::is_runnable));
    let config = root.find("config").unwrap();
    assert!(!config.is_runnable());
    for name in ["show", "get", "path", "schema"] {
        assert!(config.find(name).is_some(), "missing config {name}");
    }
    assert!(root.find_path(&["config", "get"]).is_some());
    assert!(root.find_path(&["config", "missing"]).is_none());
}

#[test]
fn version_report_contains_all_fields() {
    let identity = AppIdentity::new("immuadmin", "1.2.3", "abc123", "ci", "2020-01-01");

    let report = render_version(&identity);

    assert_eq!(
        report,
        "immuadmin 1.2.3\nCommit  : abc123\nBuilt by: ci\nBuilt at: 2020-01-01"
    );
}

#[test]
fn version_report_with_empty_fields() {
    let identity = AppIdentity::new("immuadmin", "", "", "", "");

    let report = render_version(&identity);

    assert!(report.starts_with("immuadmin\n"));
    assert!(report.contains("Commit  : -"));
    assert!(report.contains("Built at: -"));
}

#[test]
fn version_report_formats_unix_timestamp() {
    let identity = AppIdentity::new("immuadmin", "1.0.0", "", "", "1577836800");

    let report = render_version(&identity);

    assert!(report.contains("1 Jan 2020 00:00:00"), "{report}");
}

#[test]
fn version_command_runs_through_dispatcher() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    let identity = AppIdentity::new("immuadmin", "1.2.3", "abc123", "ci", "2020-01-01");
    dispatcher.add_command(version_command(&identity));

    let (result, out, err) = run(&mut dispatcher, &["version"]);

    assert!(result.is_ok());
    for value in ["immuadmin", "1.2.3", "abc123", "ci", "2020-01-01"] {
        assert!(out.contains(value), "missing {value} in {out}");
    }
    assert!(err.is_empty());
    assert_eq!(*log.borrow(), vec!["init".to_string()]);
}

#[test]
fn version_rejects_positional_arguments() {
    let log: Log = Rc::default();
    let mut dispatcher = dispatcher_with_hook(&log);
    dispatcher.add_command(version_command(&AppIdentity::default()));

    let (result, _, _) = run(&mut dispatcher, &["version", "extra"]);

    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[test]
fn format_toml_value_scalars() {
    assert_eq!(format_toml_value(&toml::Value::String("x".to_string())), "x");
    assert_eq!(format_toml_value(&toml::Value::Integer(-3)), "-3");
    assert_eq!(format_toml_value(&toml::Value::Boolean(true)), "true");
    assert_eq!(format_toml_value(&toml::Value::Array(vec![])), "[0]");
}

#[test]
fn error_report_is_styled_only_on_request() {
    let mut styled = Vec::new();
    write_error(&mut styled, &"boom", true).unwrap();
    assert_eq!(String::from_utf8(styled).unwrap(), "\x1b[1m\x1b[31mboom\x1b[0m\n");

    let mut plain = Vec::new();
    write_error(&mut plain, &"boom", false).unwrap();
    assert_eq!(String::from_utf8(plain).unwrap(), "boom\n");
}

#[test]
fn format_error_wraps_in_bold_red() {
    assert_eq!(format_error("boom"), "\x1b[1m\x1b[31mboom\x1b[0m");
}
