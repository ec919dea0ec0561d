use peregrinec_source_file::SourceFile;

use super::{Message, Severity, SourceCodeDisplay};

const SOURCE: &str = "@implementation Foo\n+ (int)doHome:(PGRouterContext *)c \
                      {}\n@end\n";

fn source_file() -> SourceFile {
    SourceFile::new(SOURCE.to_owned(), "Foo.m".into())
}

#[test]
fn message_has_severity_header() {
    colored::control::set_override(false);

    let message = Message::new(Severity::Warning, "Should not return a value");

    assert_eq!(message.to_string(), "[warning]: Should not return a value");
}

#[test]
fn highlights_the_range() {
    colored::control::set_override(false);

    let source = source_file();
    let start = SOURCE.find("int").unwrap();

    let rendered =
        SourceCodeDisplay::new(&source, start, start + 3, Some("here"))
            .to_string();

    assert!(rendered.contains("--> Foo.m:2:4"), "{rendered}");
    assert!(rendered.contains("2 ┃ + (int)doHome:"), "{rendered}");
    assert!(rendered.ends_with("┃    ^^^ here"), "{rendered}");
}

#[test]
fn zero_width_range_draws_single_caret() {
    colored::control::set_override(false);

    let source = source_file();
    let at = SOURCE.find(":(").unwrap();

    let rendered =
        SourceCodeDisplay::<&str>::new(&source, at, at, None).to_string();

    assert!(rendered.ends_with(&format!(
        "┃ {}^",
        " ".repeat(at - SOURCE.find('+').unwrap())
    )));
}

#[test]
fn out_of_bound_range_fails_to_format() {
    let source = source_file();

    let result = std::fmt::write(
        &mut String::new(),
        format_args!(
            "{}",
            SourceCodeDisplay::<&str>::new(&source, 0, SOURCE.len() + 10, None)
        ),
    );

    assert!(result.is_err());
}
