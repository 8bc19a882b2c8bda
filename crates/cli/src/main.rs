use std::env;
use std::process::ExitCode;

use command_line_boss_cli::{create_spreadsheet_command_line, CreateSpreadsheet};
use log::debug;

fn report(options: &CreateSpreadsheet) {
    let logger = options.logger_options.logger();

    match &options.title {
        Some(title) => logger.info(format!("Creating spreadsheet `{title}`")),
        None => logger.info("Creating an untitled spreadsheet"),
    }

    for sheet in &options.sheets {
        let title = sheet.title.as_deref().unwrap_or("(default)");
        match &sheet.data {
            Some(rows) => logger.info(format!("  sheet {title} with {} row(s)", rows.len())),
            None => logger.info(format!("  sheet {title}")),
        }
    }

    for permission in &options.permissions {
        logger.info(format!("  permission {}", permission.permission_spec));
    }

    if let Some(folder_id) = &options.folder_id {
        logger.info(format!("  in folder {folder_id}"));
    }

    logger.debug(format!("{options:#?}"));
}

fn main() -> ExitCode {
    env_logger::init();

    let command_line = create_spreadsheet_command_line().parse(env::args().skip(1));
    debug!("Parsed options: {:?}", command_line.options());

    report(command_line.options());
    ExitCode::SUCCESS
}
