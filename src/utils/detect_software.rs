use log::debug;
use log::warn;
use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Look up an executable by name in the directories listed in `PATH`.
pub fn find_in_path<S: AsRef<OsStr>>(tool: S) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(tool.as_ref()))
        .find(|candidate| candidate.is_file())
}

/// Warn about every tool that cannot be found. Returns the missing ones.
pub fn check_tools(tools: &[&str]) -> Vec<String> {
    let mut missing = Vec::new();
    for tool in tools {
        debug!("Checking for {}", tool);
        match find_in_path(tool) {
            Some(path) => debug!("Found {} at {}", tool, path.display()),
            None => {
                warn!("{} is either not installed or not in PATH", tool);
                missing.push(tool.to_string());
            }
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sh_is_found() {
        assert!(find_in_path("sh").is_some());
    }

    #[test]
    fn test_missing_tool_is_reported() {
        let missing = check_tools(&["sh", "genemaster-no-such-tool"]);
        assert_eq!(missing, vec!["genemaster-no-such-tool".to_string()]);
    }
}
