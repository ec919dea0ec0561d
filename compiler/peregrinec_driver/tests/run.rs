use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use peregrinec_driver::{run, unit::DeclarationDump, Arguments};
use peregrinec_route::declaration::{
    MethodDeclaration, Parameter, RoutingAttribute, Scope, TypeDescriptor,
};
use peregrinec_route_table::{RouteTable, FILE_NAME};
use peregrinec_source_file::{LocalSpan, SourceID, Span};

fn find(source: &str, needle: &str) -> LocalSpan {
    let start = source.find(needle).unwrap();
    Span::new(start, start + needle.len(), SourceID::default())
}

/// Writes `source` next to a declaration dump describing its single
/// `doHome:` handler and returns the path of the dump.
fn write_unit(
    directory: &Path,
    file_name: &str,
    source: &str,
    path: &str,
) -> PathBuf {
    std::fs::write(directory.join(file_name), source).unwrap();

    let declaration = MethodDeclaration {
        name: "doHome".to_owned(),
        name_span: find(source, "doHome"),
        scope: if source.starts_with('+') {
            Scope::Type
        } else {
            Scope::Instance
        },
        scope_span: Span::new(0, 1, SourceID::default()),
        return_type: TypeDescriptor {
            spelling: "void".to_owned(),
            span: find(source, "void"),
        },
        parameters: vec![Parameter {
            label: None,
            ty: TypeDescriptor {
                spelling: "PGRouterContext *".to_owned(),
                span: find(source, "PGRouterContext *"),
            },
            name: "context".to_owned(),
            name_span: find(source, "context"),
        }],
        has_body: true,
        owner_type: "Foo".to_owned(),
        attribute: Some(RoutingAttribute {
            name: "peregrine_target".to_owned(),
            path: path.to_owned(),
            span: find(source, "__attribute__"),
        }),
    };

    let dump = DeclarationDump {
        source: PathBuf::from(file_name),
        declarations: vec![declaration],
    };

    let dump_path = directory.join(format!("{file_name}.json"));
    std::fs::write(&dump_path, serde_json::to_string(&dump).unwrap()).unwrap();

    dump_path
}

const VALID: &str = "+ (void)doHome:(PGRouterContext *)context \
                     __attribute__((peregrine_target(\"/home\"))) {}\n";

const INSTANCE: &str = "- (void)doHome:(PGRouterContext *)context \
                        __attribute__((peregrine_target(\"/home\"))) {}\n";

fn invoke(arguments: &[&str]) -> (ExitCode, String) {
    colored::control::set_override(false);

    let arguments = Arguments::parse_from(
        std::iter::once("peregrinec").chain(arguments.iter().copied()),
    );

    let mut output = Vec::new();
    let exit_code = run(&arguments, &mut output);

    (exit_code, String::from_utf8(output).unwrap())
}

fn read_table(directory: &Path) -> RouteTable {
    RouteTable::parse(
        &std::fs::read_to_string(directory.join(FILE_NAME)).unwrap(),
    )
}

#[test]
fn valid_handler_is_written_to_the_table() {
    let sources = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let dump = write_unit(sources.path(), "Foo.m", VALID, "/home");

    let (exit_code, reported) = invoke(&[
        dump.to_str().unwrap(),
        "-p",
        output.path().to_str().unwrap(),
    ]);

    assert_eq!(exit_code, ExitCode::SUCCESS);
    assert_eq!(reported.trim_end(), "[info]: route count: 1");

    let table = read_table(output.path());
    assert_eq!(table.entries().len(), 1);
    assert_eq!(table.entries()[0].url, "/home");
    assert_eq!(table.entries()[0].class, "Foo");
    assert_eq!(table.entries()[0].selector, "doHome:");
}

#[test]
fn violations_are_reported_with_their_location() {
    let sources = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let dump = write_unit(sources.path(), "Foo.m", INSTANCE, "/home");

    let output_argument = format!("-p={}", output.path().display());
    let (exit_code, reported) =
        invoke(&[dump.to_str().unwrap(), &output_argument]);

    assert_eq!(exit_code, ExitCode::SUCCESS);
    assert!(reported.contains("[error]: Should not be instance method."));
    assert!(reported.contains("Foo.m:1:1"), "{reported}");
    assert!(reported.contains("fix-it: replace with `+`"), "{reported}");

    // nothing to persist
    assert!(!output.path().join(FILE_NAME).exists());
}

#[test]
fn fail_on_error_turns_violations_into_failure() {
    let sources = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let dump = write_unit(sources.path(), "Foo.m", INSTANCE, "/home");

    let (exit_code, _) = invoke(&[
        dump.to_str().unwrap(),
        "-p",
        output.path().to_str().unwrap(),
        "--fail-on-error",
    ]);

    assert_eq!(exit_code, ExitCode::FAILURE);
}

#[test]
fn later_runs_replace_routes_with_the_same_path() {
    let sources = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let first = write_unit(sources.path(), "Foo.m", VALID, "/home");
    let second = write_unit(sources.path(), "Bar.m", VALID, "/other");

    let output_path = output.path().to_str().unwrap();
    invoke(&[
        first.to_str().unwrap(),
        second.to_str().unwrap(),
        "-p",
        output_path,
    ]);
    assert_eq!(read_table(output.path()).entries().len(), 2);

    invoke(&[first.to_str().unwrap(), "-p", output_path]);

    let table = read_table(output.path());
    let urls = table
        .entries()
        .iter()
        .map(|entry| entry.url.as_str())
        .collect::<Vec<_>>();

    assert_eq!(urls, ["/other", "/home"]);
}

#[test]
fn excluded_sources_are_skipped() {
    let sources = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let dump = write_unit(sources.path(), "Foo.m", INSTANCE, "/home");

    let config = sources.path().join("peregrinec.toml");
    std::fs::write(&config, "exclude = [\"Foo.m\"]\n").unwrap();

    let (exit_code, reported) = invoke(&[
        dump.to_str().unwrap(),
        "-p",
        output.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, ExitCode::SUCCESS);
    assert_eq!(reported.trim_end(), "[info]: route count: 0");
}

#[test]
fn unreadable_inputs_fail_without_stopping_the_others() {
    let sources = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let dump = write_unit(sources.path(), "Foo.m", VALID, "/home");
    let missing = sources.path().join("missing.json");

    let (exit_code, reported) = invoke(&[
        missing.to_str().unwrap(),
        dump.to_str().unwrap(),
        "-p",
        output.path().to_str().unwrap(),
    ]);

    assert_eq!(exit_code, ExitCode::FAILURE);
    assert!(reported.contains("[error]: failed to read"), "{reported}");
    assert_eq!(read_table(output.path()).entries().len(), 1);
}

#[test]
fn routable_contract_requires_the_context_parameter() {
    let sources = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let source = "+ (void)doHome __attribute__((routable(\"/home\"))) {}\n";
    std::fs::write(sources.path().join("Foo.m"), source).unwrap();

    let dump = DeclarationDump {
        source: PathBuf::from("Foo.m"),
        declarations: vec![MethodDeclaration {
            name: "doHome".to_owned(),
            name_span: find(source, "doHome"),
            scope: Scope::Type,
            scope_span: Span::new(0, 1, SourceID::default()),
            return_type: TypeDescriptor {
                spelling: "void".to_owned(),
                span: find(source, "void"),
            },
            parameters: Vec::new(),
            has_body: true,
            owner_type: "Foo".to_owned(),
            attribute: Some(RoutingAttribute {
                name: "routable".to_owned(),
                path: "/home".to_owned(),
                span: find(source, "__attribute__"),
            }),
        }],
    };
    let dump_path = sources.path().join("Foo.json");
    std::fs::write(&dump_path, serde_json::to_string(&dump).unwrap()).unwrap();

    let (exit_code, reported) = invoke(&[
        dump_path.to_str().unwrap(),
        "-p",
        output.path().to_str().unwrap(),
        "--contract",
        "routable",
        "--fail-on-error",
    ]);

    assert_eq!(exit_code, ExitCode::FAILURE);
    assert!(
        reported.contains(
            "[error]: At least one parameter of type `RouteContext *` is needed"
        ),
        "{reported}"
    );
    assert!(reported.contains("fix-it: insert `:(RouteContext *)context`"));
    assert!(reported.contains("[info]: route count: 0"), "{reported}");
    assert!(!output.path().join(FILE_NAME).exists());
}

#[test]
fn persistence_failures_do_not_fail_the_run() {
    let sources = tempfile::tempdir().unwrap();
    let dump = write_unit(sources.path(), "Foo.m", VALID, "/home");

    // the output directory can't be created over a regular file
    let blocked = sources.path().join("blocked");
    std::fs::write(&blocked, "").unwrap();

    let (exit_code, reported) = invoke(&[
        dump.to_str().unwrap(),
        "-p",
        blocked.join("out").to_str().unwrap(),
        "--fail-on-error",
    ]);

    assert_eq!(exit_code, ExitCode::SUCCESS);
    assert!(reported.contains("[info]: route count: 1"), "{reported}");
    assert!(reported.contains("[error]:"), "{reported}");
}
