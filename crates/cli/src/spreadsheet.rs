//! Option state parsed by `create_spreadsheet`.

use command_line_boss_core::LoggerOptions;
use once_cell::sync::Lazy;
use regex::Regex;

/// Permission types that can be granted.
pub const VALID_PERMISSION_TYPES: [&str; 4] = ["user", "group", "domain", "anyone"];

/// Roles a permission can grant.
pub const VALID_PERMISSION_ROLES: [&str; 5] =
    ["organizer", "fileOrganizer", "writer", "commenter", "reader"];

static PERMISSION_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?<type>[^:]+)(?::(?<subject>[^:]+))?:(?<role>[^:]+)$")
        .expect("permission spec pattern is a valid regex")
});

/// A sheet given with `--sheet` and optionally filled with `--data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    /// `None` for a sheet created by `--data` before any `--sheet`.
    pub title: Option<String>,
    pub data: Option<Vec<Vec<String>>>,
}

impl Sheet {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            data: None,
        }
    }

    pub fn untitled() -> Self {
        Self::default()
    }

    /// Case insensitive title comparison. Untitled sheets never match.
    pub fn has_title(&self, title: &str) -> bool {
        self.title
            .as_deref()
            .is_some_and(|own| own.to_lowercase() == title.to_lowercase())
    }
}

/// A permission given with `--permission=TYPE[:SUBJECT]:ROLE`.
///
/// Parsing only splits the spec. Whether the type, subject and role make sense is
/// checked by the validations of the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    /// The spec exactly as given.
    pub permission_spec: String,
    pub permission_type: String,
    pub subject: Option<String>,
    pub role: String,
}

impl Permission {
    /// Splits `spec` into its parts, or returns `None` if it has the wrong shape.
    ///
    /// ```
    /// use command_line_boss_cli::Permission;
    ///
    /// let permission = Permission::parse("user:jdoe@example.com:writer").unwrap();
    /// assert_eq!(permission.permission_type, "user");
    /// assert_eq!(permission.subject.as_deref(), Some("jdoe@example.com"));
    /// assert_eq!(permission.role, "writer");
    ///
    /// assert!(Permission::parse("anyone").is_none());
    /// ```
    pub fn parse(spec: &str) -> Option<Self> {
        let captures = PERMISSION_SPEC.captures(spec)?;

        Some(Self {
            permission_spec: spec.to_string(),
            permission_type: captures["type"].to_string(),
            subject: captures.name("subject").map(|m| m.as_str().to_string()),
            role: captures["role"].to_string(),
        })
    }

    pub fn has_valid_type(&self) -> bool {
        VALID_PERMISSION_TYPES.contains(&self.permission_type.as_str())
    }

    pub fn has_valid_role(&self) -> bool {
        VALID_PERMISSION_ROLES.contains(&self.role.as_str())
    }

    pub fn is_anyone(&self) -> bool {
        self.permission_type == "anyone"
    }
}

/// Everything `create_spreadsheet` reads from its command line.
#[derive(Debug, Default, PartialEq)]
pub struct CreateSpreadsheet {
    /// `None` to let the spreadsheet get a default title.
    pub title: Option<String>,
    pub sheets: Vec<Sheet>,
    pub permissions: Vec<Permission>,
    /// Folder to create the spreadsheet in.
    pub folder_id: Option<String>,
    pub logger_options: LoggerOptions,
}

impl AsRef<LoggerOptions> for CreateSpreadsheet {
    fn as_ref(&self) -> &LoggerOptions {
        &self.logger_options
    }
}

impl AsMut<LoggerOptions> for CreateSpreadsheet {
    fn as_mut(&mut self) -> &mut LoggerOptions {
        &mut self.logger_options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_permission_with_subject() {
        let permission = Permission::parse("group:team@example.com:commenter").unwrap();

        assert_eq!(
            permission,
            Permission {
                permission_spec: "group:team@example.com:commenter".to_string(),
                permission_type: "group".to_string(),
                subject: Some("team@example.com".to_string()),
                role: "commenter".to_string(),
            }
        );
        assert!(permission.has_valid_type());
        assert!(permission.has_valid_role());
    }

    #[test]
    fn test_parse_permission_without_subject() {
        let permission = Permission::parse("anyone:reader").unwrap();

        assert!(permission.is_anyone());
        assert_eq!(permission.subject, None);
        assert_eq!(permission.role, "reader");
    }

    #[test]
    fn test_malformed_permission_specs() {
        for spec in ["", "anyone", "a:b:c:d", ":reader", "user::reader", "user:x:"] {
            assert!(Permission::parse(spec).is_none(), "{spec:?} should not parse");
        }
    }

    #[test]
    fn test_unknown_type_and_role_still_parse() {
        let permission = Permission::parse("robot:r2d2:pilot").unwrap();

        assert!(!permission.has_valid_type());
        assert!(!permission.has_valid_role());
    }

    #[test]
    fn test_sheet_titles_compare_case_insensitively() {
        assert!(Sheet::titled("Summary").has_title("SUMMARY"));
        assert!(!Sheet::titled("Summary").has_title("Details"));
        assert!(!Sheet::untitled().has_title(""));
    }
}
