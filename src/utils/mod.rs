mod detect_software;
mod run_command;
mod shell_quote;

pub use detect_software::check_tools;
pub use detect_software::find_in_path;

pub use run_command::utility_name;
pub use run_command::CommandRunner;
pub use run_command::ShellRunner;

pub use shell_quote::quote_path;
pub use shell_quote::quote_word;
