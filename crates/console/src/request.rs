use clap::error::ErrorKind;
use clap::{ArgMatches, Command};

use crate::navigation::View;
use crate::view::user_list::BulkAction;
use warden_common::error::{AppError, CODE_BAD_REQUEST, CODE_OK};

// Command text
pub const REQUEST_ADD: &str = "add";
pub const REQUEST_ASSIGN_ROLE: &str = "assign-role";
pub const REQUEST_BULK: &str = "bulk";
pub const REQUEST_CANCEL: &str = "cancel";
pub const REQUEST_CHOOSE: &str = "choose";
pub const REQUEST_DELETE: &str = "delete";
pub const REQUEST_EDIT: &str = "edit";
pub const REQUEST_EXIT: &str = "exit";
pub const REQUEST_HELP: &str = "help";
pub const REQUEST_LIST: &str = "list";
pub const REQUEST_PERMISSIONS: &str = "permissions";
pub const REQUEST_QUIT: &str = "quit";
pub const REQUEST_SEARCH: &str = "search";
pub const REQUEST_SELECT: &str = "select";
pub const REQUEST_SELECT_ALL: &str = "select-all";
pub const REQUEST_SET: &str = "set";
pub const REQUEST_SUBMIT: &str = "submit";
pub const REQUEST_THEME: &str = "theme";
pub const REQUEST_TOGGLE: &str = "toggle";
pub const REQUEST_VIEW: &str = "view";

// Help templates
const PARSER_TEMPLATE: &str = "\
        {all-args}
    ";

const COMMAND_TEMPLATE: &str = "\
        {about-with-newline}\n\
        {usage-heading}\n    {usage}\n\
        \n\
        {all-args}{after-help}\
    ";

/// Admin console REPL requests
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Request {
    /// Represents non-supplied request
    #[default]
    None,
    /// Switch active view
    View { view: View },
    /// Redisplay active view (or open dialog)
    List,
    /// Replace search text of active view (empty clears)
    Search { query: String },
    /// Open create dialog for active view's entity type
    Add,
    /// Open edit dialog for an entity of the active view
    Edit { id: String },
    /// Delete entity of the active view (after confirmation)
    Delete { id: String },
    /// Flip user row selection
    Select { id: String },
    /// Flip selection of all visible users
    SelectAll,
    /// Apply action to all selected users
    Bulk { action: BulkAction },
    /// Open role assignment dialog for user
    AssignRole { user_id: String },
    /// Open permissions viewer for user
    Permissions { user_id: String },
    /// Set field of open dialog
    Set { field: String, value: String },
    /// Flip permission choice in open role dialog
    Toggle { permission_id: String },
    /// Pick role in open role assignment dialog
    Choose { role_id: String },
    /// Submit open dialog
    Submit,
    /// Close open dialog, discarding changes
    Cancel,
    /// Flip dark/light theme
    Theme,
    /// Leave the console
    Quit,
}

impl Request {
    /// Whether request may be processed while a dialog is open
    pub fn is_allowed_in_dialog(&self) -> bool {
        matches!(
            self,
            Request::None
                | Request::List
                | Request::Set { .. }
                | Request::Toggle { .. }
                | Request::Choose { .. }
                | Request::Submit
                | Request::Cancel
                | Request::Quit
        )
    }
}

/// REPL shell command line processor
pub struct RequestProcessor {
    /// Clap [`Command`] object used to parse command string
    command_processor: Command,
}

impl RequestProcessor {
    /// RequestProcessor constructor
    ///
    /// # Returns
    ///
    /// A newly contructed [`RequestProcessor`] object.
    ///
    pub fn new() -> Self {
        Self {
            command_processor: Self::create_command(),
        }
    }

    /// Parse request command text
    ///
    /// # Arguments
    ///
    /// * `line` - Command line string, which should represent a valid [`Request`]
    ///
    /// # Returns
    ///
    /// A [`Result`] containing the corresponding [`Request`] for the given command line string.
    /// Help output is returned as an error with code 200.
    ///
    pub fn parse(&self, line: &str) -> Result<Request, AppError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Request::None);
        }
        let line_as_args = shlex::split(line).ok_or(AppError::GenWithCodeAndMsg(
            CODE_BAD_REQUEST,
            format!("Invalid command line: line={}", line),
        ))?;

        let arg_matches = self
            .command_processor
            .clone()
            .try_get_matches_from(line_as_args)
            .map_err(|parse_error| match parse_error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    AppError::GenWithCodeAndMsg(CODE_OK, parse_error.to_string())
                }
                _ => AppError::GenWithCodeAndMsg(CODE_BAD_REQUEST, parse_error.to_string()),
            })?;

        match arg_matches.subcommand() {
            Some((REQUEST_VIEW, matches)) => Ok(Request::View {
                view: *Self::required_arg::<View>(matches, "view", REQUEST_VIEW)?,
            }),
            Some((REQUEST_LIST, _matches)) => Ok(Request::List),
            Some((REQUEST_SEARCH, matches)) => Ok(Request::Search {
                query: Self::joined_arg(matches, "query"),
            }),
            Some((REQUEST_ADD, _matches)) => Ok(Request::Add),
            Some((REQUEST_EDIT, matches)) => Ok(Request::Edit {
                id: Self::required_arg::<String>(matches, "id", REQUEST_EDIT)?.clone(),
            }),
            Some((REQUEST_DELETE, matches)) => Ok(Request::Delete {
                id: Self::required_arg::<String>(matches, "id", REQUEST_DELETE)?.clone(),
            }),
            Some((REQUEST_SELECT, matches)) => Ok(Request::Select {
                id: Self::required_arg::<String>(matches, "id", REQUEST_SELECT)?.clone(),
            }),
            Some((REQUEST_SELECT_ALL, _matches)) => Ok(Request::SelectAll),
            Some((REQUEST_BULK, matches)) => Ok(Request::Bulk {
                action: *Self::required_arg::<BulkAction>(matches, "action", REQUEST_BULK)?,
            }),
            Some((REQUEST_ASSIGN_ROLE, matches)) => Ok(Request::AssignRole {
                user_id: Self::required_arg::<String>(matches, "user_id", REQUEST_ASSIGN_ROLE)?
                    .clone(),
            }),
            Some((REQUEST_PERMISSIONS, matches)) => Ok(Request::Permissions {
                user_id: Self::required_arg::<String>(matches, "user_id", REQUEST_PERMISSIONS)?
                    .clone(),
            }),
            Some((REQUEST_SET, matches)) => Ok(Request::Set {
                field: Self::required_arg::<String>(matches, "field", REQUEST_SET)?.clone(),
                value: Self::joined_arg(matches, "value"),
            }),
            Some((REQUEST_TOGGLE, matches)) => Ok(Request::Toggle {
                permission_id: Self::required_arg::<String>(
                    matches,
                    "permission_id",
                    REQUEST_TOGGLE,
                )?
                .clone(),
            }),
            Some((REQUEST_CHOOSE, matches)) => Ok(Request::Choose {
                role_id: Self::required_arg::<String>(matches, "role_id", REQUEST_CHOOSE)?.clone(),
            }),
            Some((REQUEST_SUBMIT, _matches)) => Ok(Request::Submit),
            Some((REQUEST_CANCEL, _matches)) => Ok(Request::Cancel),
            Some((REQUEST_THEME, _matches)) => Ok(Request::Theme),
            Some((REQUEST_QUIT, _matches)) => Ok(Request::Quit),
            Some((name, _matches)) => Err(AppError::GenWithCodeAndMsg(
                CODE_BAD_REQUEST,
                format!("Unknown command: cmd={}", name),
            )),
            None => Ok(Request::None),
        }
    }

    fn required_arg<'a, T: Clone + Send + Sync + 'static>(
        arg_matches: &'a ArgMatches,
        arg_id: &str,
        command: &str,
    ) -> Result<&'a T, AppError> {
        arg_matches.get_one::<T>(arg_id).ok_or(AppError::GenWithCodeAndMsg(
            CODE_BAD_REQUEST,
            format!(
                "Argument \"{}\" is required for the \"{}\" command",
                arg_id, command
            ),
        ))
    }

    /// Multi-word argument values, joined by single spaces
    fn joined_arg(arg_matches: &ArgMatches, arg_id: &str) -> String {
        arg_matches
            .get_many::<String>(arg_id)
            .map(|values| values.cloned().collect::<Vec<String>>().join(" "))
            .unwrap_or_default()
    }

    /// Create command processor
    fn create_command() -> Command {
        Command::new("repl")
            .multicall(true)
            .arg_required_else_help(true)
            .subcommand_required(true)
            .subcommand_value_name("COMMAND")
            .subcommand_help_heading("COMMANDS")
            .help_template(PARSER_TEMPLATE)
            .subcommand(
                Command::new(REQUEST_VIEW)
                    .about("Switch to the users, roles, permissions or settings view")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(
                        clap::arg!(view: <VIEW> "View to display")
                            .value_parser(clap::value_parser!(View)),
                    ),
            )
            .subcommand(
                Command::new(REQUEST_LIST)
                    .about("Redisplay the active view or open dialog")
                    .help_template(COMMAND_TEMPLATE),
            )
            .subcommand(
                Command::new(REQUEST_SEARCH)
                    .about("Filter the active view's rows (no text clears the search)")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(
                        clap::arg!(query: [QUERY] "Search text")
                            .num_args(0..)
                            .allow_hyphen_values(true),
                    ),
            )
            .subcommand(
                Command::new(REQUEST_ADD)
                    .about("Open the create dialog for the active view")
                    .help_template(COMMAND_TEMPLATE),
            )
            .subcommand(
                Command::new(REQUEST_EDIT)
                    .about("Open the edit dialog for a row of the active view")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(clap::arg!(id: <ID> "Entity ID")),
            )
            .subcommand(
                Command::new(REQUEST_DELETE)
                    .about("Delete a row of the active view (asks for confirmation)")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(clap::arg!(id: <ID> "Entity ID")),
            )
            .subcommand(
                Command::new(REQUEST_SELECT)
                    .about("Select/deselect a visible user")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(clap::arg!(id: <ID> "User ID")),
            )
            .subcommand(
                Command::new(REQUEST_SELECT_ALL)
                    .about("Select/deselect all visible users")
                    .help_template(COMMAND_TEMPLATE),
            )
            .subcommand(
                Command::new(REQUEST_BULK)
                    .about("Apply an action to all selected users")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(
                        clap::arg!(action: <ACTION> "Bulk action")
                            .value_parser(clap::value_parser!(BulkAction)),
                    ),
            )
            .subcommand(
                Command::new(REQUEST_ASSIGN_ROLE)
                    .about("Open the role assignment dialog for a user")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(clap::arg!(user_id: <USER_ID> "User ID")),
            )
            .subcommand(
                Command::new(REQUEST_PERMISSIONS)
                    .about("Show the permissions granted to a user by its role")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(clap::arg!(user_id: <USER_ID> "User ID")),
            )
            .subcommand(
                Command::new(REQUEST_SET)
                    .about("Set a field of the open dialog")
                    .help_template(COMMAND_TEMPLATE)
                    .args(&[
                        clap::arg!(field: <FIELD> "Field name"),
                        clap::arg!(value: [VALUE] "Field value")
                            .num_args(0..)
                            .allow_hyphen_values(true),
                    ]),
            )
            .subcommand(
                Command::new(REQUEST_TOGGLE)
                    .about("Choose/unchoose a permission in the open role dialog")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(clap::arg!(permission_id: <PERMISSION_ID> "Permission ID")),
            )
            .subcommand(
                Command::new(REQUEST_CHOOSE)
                    .about("Pick the role in the open role assignment dialog")
                    .help_template(COMMAND_TEMPLATE)
                    .arg(clap::arg!(role_id: <ROLE_ID> "Role ID")),
            )
            .subcommand(
                Command::new(REQUEST_SUBMIT)
                    .about("Submit the open dialog")
                    .help_template(COMMAND_TEMPLATE),
            )
            .subcommand(
                Command::new(REQUEST_CANCEL)
                    .about("Close the open dialog without saving")
                    .help_template(COMMAND_TEMPLATE),
            )
            .subcommand(
                Command::new(REQUEST_THEME)
                    .about("Toggle between dark and light theme")
                    .help_template(COMMAND_TEMPLATE),
            )
            .subcommand(
                Command::new(REQUEST_QUIT)
                    .alias(REQUEST_EXIT)
                    .about("Quit the admin console")
                    .help_template(COMMAND_TEMPLATE),
            )
    }
}

impl Default for RequestProcessor {
    fn default() -> Self {
        Self::new()
    }
}
