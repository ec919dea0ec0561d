use std::fs;

use peregrinec_route::record::RouteRecord;
use proptest::{prop_assert_eq, proptest, strategy::Strategy};

use super::{DedupKey, MergeSummary, Merger, RouteTable, Upsert, FILE_NAME};

fn record(path: &str, owner_type: &str, selector: &str) -> RouteRecord {
    RouteRecord::new(path, owner_type, selector).unwrap()
}

fn read_table(merger: &Merger) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(merger.table_path()).unwrap())
        .unwrap()
}

#[test]
fn empty_input_performs_no_io() {
    let directory = tempfile::tempdir().unwrap();
    let output = directory.path().join("missing");

    let merger = Merger::new(output.clone(), DedupKey::Path);

    assert_eq!(merger.merge(&[]).unwrap(), MergeSummary::Skipped);
    assert!(!output.exists(), "the directory must not be created");
}

#[test]
fn empty_input_leaves_existing_table_untouched() {
    let directory = tempfile::tempdir().unwrap();
    let merger = Merger::new(directory.path().to_path_buf(), DedupKey::Path);

    let content = "[{\"url\":\"/a\",\"class\":\"A\",\"selector\":\"run\"}]";
    fs::write(merger.table_path(), content).unwrap();
    let modified = fs::metadata(merger.table_path()).unwrap().modified().unwrap();

    merger.merge(&[]).unwrap();

    assert_eq!(fs::read_to_string(merger.table_path()).unwrap(), content);
    assert_eq!(
        fs::metadata(merger.table_path()).unwrap().modified().unwrap(),
        modified
    );
}

#[test]
fn same_path_is_replaced() {
    let directory = tempfile::tempdir().unwrap();
    let merger = Merger::new(directory.path().to_path_buf(), DedupKey::Path);

    fs::write(
        merger.table_path(),
        r#"[{"url":"/a","class":"A","selector":"run"}]"#,
    )
    .unwrap();

    let summary = merger.merge(&[record("/a", "B", "go")]).unwrap();

    assert_eq!(summary, MergeSummary::Written {
        replaced: 1,
        appended: 0,
        total: 1
    });
    assert_eq!(
        read_table(&merger),
        serde_json::json!([{ "url": "/a", "class": "B", "selector": "go" }])
    );
}

#[test]
fn same_handler_is_replaced() {
    let directory = tempfile::tempdir().unwrap();
    let merger = Merger::new(directory.path().to_path_buf(), DedupKey::Handler);

    merger.merge(&[record("/old", "Foo", "doHome:")]).unwrap();
    merger
        .merge(&[record("/new", "Foo", "doHome:"), record("/old", "Bar", "run:")])
        .unwrap();

    assert_eq!(
        read_table(&merger),
        serde_json::json!([
            { "url": "/new", "class": "Foo", "selector": "doHome:" },
            { "url": "/old", "class": "Bar", "selector": "run:" },
        ])
    );
}

#[test]
fn path_key_keeps_renamed_handlers_apart() {
    let directory = tempfile::tempdir().unwrap();
    let merger = Merger::new(directory.path().to_path_buf(), DedupKey::Path);

    merger.merge(&[record("/old", "Foo", "doHome:")]).unwrap();
    merger.merge(&[record("/new", "Foo", "doHome:")]).unwrap();

    assert_eq!(read_table(&merger).as_array().unwrap().len(), 2);
}

#[test]
fn creates_missing_directories() {
    let directory = tempfile::tempdir().unwrap();
    let output = directory.path().join("nested").join("routes");
    let merger = Merger::new(output.clone(), DedupKey::Path);

    merger.merge(&[record("/home", "Foo", "doHome:")]).unwrap();

    assert!(output.join(FILE_NAME).is_file());
}

#[test]
fn malformed_table_is_discarded() {
    let directory = tempfile::tempdir().unwrap();
    let merger = Merger::new(directory.path().to_path_buf(), DedupKey::Path);

    fs::write(merger.table_path(), "{ this is not json").unwrap();

    merger.merge(&[record("/home", "Foo", "doHome:")]).unwrap();

    assert_eq!(
        read_table(&merger),
        serde_json::json!([{ "url": "/home", "class": "Foo", "selector": "doHome:" }])
    );
}

#[test]
fn output_is_pretty_printed() {
    let directory = tempfile::tempdir().unwrap();
    let merger = Merger::new(directory.path().to_path_buf(), DedupKey::Path);

    merger.merge(&[record("/home", "Foo", "doHome:")]).unwrap();

    let content = fs::read_to_string(merger.table_path()).unwrap();
    assert_eq!(
        content,
        "[\n  {\n    \"url\": \"/home\",\n    \"class\": \"Foo\",\n    \
         \"selector\": \"doHome:\"\n  }\n]\n"
    );
}

#[test]
fn unknown_fields_are_preserved() {
    let table = RouteTable::parse(
        r#"[{"url":"/a","class":"A","selector":"run","owner":"team-a"},{"url":"/b"}]"#,
    );

    assert_eq!(table.entries().len(), 2);
    assert_eq!(table.entries()[0].extra["owner"], "team-a");
    assert_eq!(table.entries()[1].class, "");

    let json: serde_json::Value =
        serde_json::from_str(&table.to_pretty_json().unwrap()).unwrap();
    assert_eq!(json[0]["owner"], "team-a");
}

#[test]
fn empty_and_non_array_content_is_an_empty_table() {
    assert!(RouteTable::parse("").entries().is_empty());
    assert!(RouteTable::parse("  \n").entries().is_empty());
    assert!(RouteTable::parse("{\"url\": \"/a\"}").entries().is_empty());
    assert!(RouteTable::parse("[1, 2]").entries().is_empty());
}

#[test]
fn duplicated_entries_collapse() {
    let mut table = RouteTable::parse(
        r#"[{"url":"/a","class":"A","selector":"x"},{"url":"/a","class":"B","selector":"y"}]"#,
    );

    assert_eq!(
        table.upsert(&record("/a", "C", "z"), DedupKey::Path),
        Upsert::Replaced(2)
    );
    assert_eq!(table.entries().len(), 1);
    assert_eq!(table.entries()[0].class, "C");
}

#[test]
fn records_of_one_run_sharing_a_key_collapse_to_the_last() {
    let directory = tempfile::tempdir().unwrap();
    let merger = Merger::new(directory.path().to_path_buf(), DedupKey::Path);

    let summary = merger
        .merge(&[record("/a", "A", "first"), record("/a", "B", "second")])
        .unwrap();

    assert_eq!(summary, MergeSummary::Written {
        replaced: 1,
        appended: 1,
        total: 1
    });
    assert_eq!(read_table(&merger)[0]["selector"], "second");
}

fn records() -> impl Strategy<Value = Vec<RouteRecord>> {
    proptest::collection::vec(
        ("/[a-c]{1,2}", "[A-C]", "[a-c]{1,2}:?").prop_map(
            |(path, owner_type, selector)| {
                RouteRecord::new(path, owner_type, selector).unwrap()
            },
        ),
        1..8,
    )
}

proptest! {
    #[test]
    fn merging_twice_is_merging_once(
        existing in records(),
        incoming in records(),
        handler_key: bool,
    ) {
        let key = if handler_key { DedupKey::Handler } else { DedupKey::Path };

        let directory = tempfile::tempdir().unwrap();
        let merger = Merger::new(directory.path().to_path_buf(), key);

        merger.merge(&existing).unwrap();
        merger.merge(&incoming).unwrap();
        let once = fs::read_to_string(merger.table_path()).unwrap();

        merger.merge(&incoming).unwrap();
        let twice = fs::read_to_string(merger.table_path()).unwrap();

        prop_assert_eq!(&once, &twice);

        // no two entries share a key
        let table = RouteTable::parse(&once);
        for (index, entry) in table.entries().iter().enumerate() {
            let record =
                RouteRecord::new(&entry.url, &entry.class, &entry.selector)
                    .unwrap();
            let sharing = table.entries()[index + 1..]
                .iter()
                .filter(|other| key.matches(other, &record))
                .count();

            prop_assert_eq!(sharing, 0);
        }
    }
}
