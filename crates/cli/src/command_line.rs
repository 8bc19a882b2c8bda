//! The `create_spreadsheet` command line.
//!
//! ```text
//! create_spreadsheet [SPREADSHEET_TITLE] \
//!   [--sheet=TITLE [--data=DATA_FILE]]... \
//!   [--folder=FOLDER_ID] \
//!   [--permission=PERMISSION_SPEC]...
//! ```

use std::collections::VecDeque;

use clap::Arg;
use command_line_boss_core::{CommandLine, Context, ErrorMessages, HelpOption, OptionGrammar};
use log::debug;

use crate::data_file::read_data_file;
use crate::spreadsheet::{CreateSpreadsheet, Permission, Sheet};

pub const PROGRAM_NAME: &str = "create_spreadsheet";

pub const BANNER: &str = "\
Create a new Google Spreadsheet

Usage:

create_spreadsheet [SPREADSHEET_TITLE] \\
  [--sheet=TITLE [--data=DATA_FILE]]... \\
  [--folder=FOLDER_ID] \\
  [--permission=PERMISSION_SPEC]...
";

pub const FOOTER: &str = "\
DATA_FILE := A file containing data in CSV format
PERMISSION_SPEC := {user:EMAIL:ROLE | group:EMAIL:ROLE | domain:DOMAIN:ROLE | anyone:ROLE}
ROLE := {organizer | fileOrganizer | writer | commenter | reader}
";

/// Builds the `create_spreadsheet` command line, ready to parse.
///
/// ```
/// use command_line_boss_cli::create_spreadsheet_command_line;
///
/// let command_line = create_spreadsheet_command_line()
///     .try_parse(["Budget", "--sheet=2025", "--permission=domain:example.com:writer"])?;
///
/// assert!(command_line.succeeded());
/// let options = command_line.options();
/// assert_eq!(options.title.as_deref(), Some("Budget"));
/// assert_eq!(options.sheets[0].title.as_deref(), Some("2025"));
/// assert_eq!(options.permissions[0].role, "writer");
/// # Ok::<(), command_line_boss_core::Error>(())
/// ```
pub fn create_spreadsheet_command_line() -> CommandLine<CreateSpreadsheet> {
    CommandLine::<CreateSpreadsheet>::new()
        .with_program_name(PROGRAM_NAME)
        .with_arguments(parse_title)
        .with_option("sheet", define_sheet_option)
        .with_option("data", define_data_option)
        .with_option("permission", define_permission_option)
        .with_option("folder", define_folder_option)
        .with_validation("permission_role", validate_permission_role)
        .with_validation("permission_anyone_subject", validate_permission_anyone_subject)
        .with_validation("permission_other_subject", validate_permission_other_subject)
        .with_validation("permission_type", validate_permission_type)
        .with_logger_options()
        .with_help(HelpOption::new().banner(BANNER).footer(FOOTER))
}

/// Takes the spreadsheet title from the front of the positional arguments. Anything
/// after it stays in [`CommandLine::args`].
fn parse_title(
    options: &mut CreateSpreadsheet,
    args: &mut VecDeque<String>,
    _errors: &mut ErrorMessages,
) {
    options.title = args.pop_front();
}

fn define_sheet_option(grammar: &mut OptionGrammar<CreateSpreadsheet>) {
    grammar.on_value(
        Arg::new("sheet")
            .long("sheet")
            .value_name("TITLE")
            .help("Title of a sheet to create"),
        |ctx, title| {
            if ctx.options.sheets.iter().any(|sheet| sheet.has_title(title)) {
                ctx.errors
                    .add(format!("The sheet {title} was given more than once"));
            }

            ctx.options.sheets.push(Sheet::titled(title));
        },
    );
}

fn define_data_option(grammar: &mut OptionGrammar<CreateSpreadsheet>) {
    grammar.on_value(
        Arg::new("data")
            .long("data")
            .value_name("DATA_FILE")
            .help("Data file for the last named sheet"),
        add_data_file,
    );
}

fn add_data_file(ctx: &mut Context<'_, CreateSpreadsheet>, path: &str) {
    let sheets = &mut ctx.options.sheets;
    if sheets.is_empty() {
        sheets.push(Sheet::untitled());
    }

    let Some(sheet) = sheets.last_mut() else {
        return;
    };

    if sheet.data.is_some() {
        ctx.errors.add("Only one data file is allowed per sheet");
        return;
    }

    match read_data_file(path) {
        Ok(rows) => {
            debug!("Read {} row(s) from `{path}`", rows.len());
            sheet.data = Some(rows);
        }
        Err(e) => ctx.errors.add(e.to_string()),
    }
}

fn define_permission_option(grammar: &mut OptionGrammar<CreateSpreadsheet>) {
    grammar.on_value(
        Arg::new("permission")
            .long("permission")
            .value_name("PERMISSION_SPEC")
            .help("Set permissions on the spreadsheet"),
        |ctx, spec| match Permission::parse(spec) {
            Some(permission) => ctx.options.permissions.push(permission),
            None => ctx.errors.add(format!("Invalid permission: {spec}")),
        },
    );
}

fn define_folder_option(grammar: &mut OptionGrammar<CreateSpreadsheet>) {
    grammar.on_value(
        Arg::new("folder")
            .long("folder")
            .value_name("FOLDER_ID")
            .help("Create the spreadsheet to the given folder"),
        |ctx, folder_id| {
            if ctx.options.folder_id.is_some() {
                ctx.errors.add("Only one --folder option is allowed");
            } else {
                ctx.options.folder_id = Some(folder_id.to_string());
            }
        },
    );
}

fn validate_permission_role(options: &CreateSpreadsheet, errors: &mut ErrorMessages) {
    for permission in &options.permissions {
        if !permission.has_valid_role() {
            errors.add(format!("Invalid permission role: {}", permission.role));
        }
    }
}

fn validate_permission_anyone_subject(options: &CreateSpreadsheet, errors: &mut ErrorMessages) {
    for permission in &options.permissions {
        if permission.is_anyone() && permission.subject.is_some() {
            errors.add("An anyone permission must not have a subject");
        }
    }
}

fn validate_permission_other_subject(options: &CreateSpreadsheet, errors: &mut ErrorMessages) {
    for permission in &options.permissions {
        if !permission.is_anyone() && permission.subject.is_none() {
            errors.add(format!(
                "A {} permission must have a subject",
                permission.permission_type
            ));
        }
    }
}

fn validate_permission_type(options: &CreateSpreadsheet, errors: &mut ErrorMessages) {
    for permission in &options.permissions {
        if !permission.has_valid_type() {
            errors.add(format!(
                "Invalid permission type: {}",
                permission.permission_type
            ));
        }
    }
}
