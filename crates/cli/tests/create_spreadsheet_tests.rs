//! End-to-end parses of the `create_spreadsheet` command line.

use std::io::Write;

use command_line_boss_cli::{create_spreadsheet_command_line, CreateSpreadsheet, Sheet};
use command_line_boss_core::CommandLine;
use tempfile::NamedTempFile;

fn parse(args: &[&str]) -> CommandLine<CreateSpreadsheet> {
    create_spreadsheet_command_line()
        .try_parse(args.iter().copied())
        .unwrap()
}

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_title_sheet_and_anyone_permission() {
    let command_line = parse(&["My Sheet", "--sheet=Sheet1", "--permission=anyone:reader"]);

    assert!(command_line.succeeded());
    let options = command_line.options();
    assert_eq!(options.title.as_deref(), Some("My Sheet"));
    assert_eq!(options.sheets, vec![Sheet::titled("Sheet1")]);
    assert_eq!(options.permissions.len(), 1);
    assert_eq!(options.permissions[0].permission_type, "anyone");
    assert_eq!(options.permissions[0].subject, None);
    assert_eq!(options.permissions[0].role, "reader");
}

#[test]
fn test_user_permission_without_subject_fails() {
    let command_line = parse(&["--permission=user:reader"]);

    assert!(command_line.failed());
    assert_eq!(
        command_line.error_messages(),
        ["A user permission must have a subject"]
    );
}

#[test]
fn test_data_files_fill_the_last_named_sheet() {
    let summary = csv_file("Region,Total\nNorth,10\n");
    let details = csv_file("a\nb,c\n");

    let command_line = parse(&[
        "Sales",
        "--sheet=Summary",
        "--data",
        summary.path().to_str().unwrap(),
        "--sheet=Details",
        &format!("--data={}", details.path().display()),
    ]);

    assert!(command_line.succeeded());
    assert_eq!(
        command_line.options().sheets,
        vec![
            Sheet {
                title: Some("Summary".to_string()),
                data: Some(vec![
                    vec!["Region".to_string(), "Total".to_string()],
                    vec!["North".to_string(), "10".to_string()],
                ]),
            },
            Sheet {
                title: Some("Details".to_string()),
                data: Some(vec![
                    vec!["a".to_string()],
                    vec!["b".to_string(), "c".to_string()],
                ]),
            },
        ]
    );
}

#[test]
fn test_data_before_any_sheet_goes_to_an_untitled_sheet() {
    let data = csv_file("1,2,3\n");

    let command_line = parse(&[&format!("--data={}", data.path().display())]);

    assert!(command_line.succeeded());
    let sheets = &command_line.options().sheets;
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].title, None);
    assert_eq!(
        sheets[0].data,
        Some(vec![vec!["1".to_string(), "2".to_string(), "3".to_string()]])
    );
}

#[test]
fn test_second_data_file_for_a_sheet_fails() {
    let first = csv_file("first\n");
    let second = csv_file("second\n");

    let command_line = parse(&[
        "--sheet=Only",
        &format!("--data={}", first.path().display()),
        &format!("--data={}", second.path().display()),
    ]);

    assert_eq!(
        command_line.error_messages(),
        ["Only one data file is allowed per sheet"]
    );
    assert_eq!(
        command_line.options().sheets[0].data,
        Some(vec![vec!["first".to_string()]])
    );
}

#[test]
fn test_all_errors_are_reported_together() {
    let command_line = parse(&[
        "Title",
        "--sheet=A",
        "--sheet=a",
        "--permission=bogus",
        "--folder=1",
        "--folder=2",
        "--permission=group:writer",
        "--verbose",
        "--debug",
        "stray",
    ]);

    assert_eq!(command_line.args(), &["stray"]);

    assert_eq!(
        command_line.error_messages(),
        [
            "The sheet a was given more than once",
            "Invalid permission: bogus",
            "Only one --folder option is allowed",
            "A group permission must have a subject",
            "Can not give both --debug and --verbose",
        ]
    );
}

#[test]
fn test_parsing_is_repeatable() {
    let args = ["T", "--sheet=S", "--permission=domain:example.com:commenter"];

    let first = parse(&args);
    let second = parse(&args);

    assert_eq!(first.options(), second.options());
    assert_eq!(first.error_messages(), second.error_messages());
}

#[test]
fn test_unknown_option_is_a_grammar_error() {
    let error = create_spreadsheet_command_line()
        .try_parse(["--sheets=Summary"])
        .unwrap_err();

    assert_eq!(error.status(), 2);
}
