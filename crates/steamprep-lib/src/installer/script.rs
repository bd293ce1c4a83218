use std::path::Path;

/// Render the steamcmd script that installs or updates one application.
/// Anonymous login is used unless credentials are supplied.
pub fn render_install_script(
    app_id: u32,
    install_path: &Path,
    username: Option<&str>,
    password: Option<&str>,
) -> String {
    let login = match (username, password) {
        (Some(user), Some(pass)) => format!("login {user} {pass}"),
        (Some(user), None) => format!("login {user}"),
        _ => "login anonymous".to_string(),
    };

    format!(
        "@ShutdownOnFailedCommand 1\n\
         @NoPromptForPassword 1\n\
         force_install_dir {}\n\
         {login}\n\
         app_update {app_id} validate\n\
         quit\n",
        install_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_anonymous_script() {
        let script = render_install_script(222860, &PathBuf::from("/home/steam/games/222860/0"), None, None);

        assert!(script.contains("force_install_dir /home/steam/games/222860/0"));
        assert!(script.contains("login anonymous"));
        assert!(script.contains("app_update 222860 validate"));
        assert!(script.ends_with("quit\n"));
    }

    #[test]
    fn test_credentialed_script() {
        let script = render_install_script(
            4020,
            &PathBuf::from("/srv/gmod"),
            Some("deployer"),
            Some("hunter2"),
        );

        assert!(script.contains("login deployer hunter2"));
        assert!(!script.contains("anonymous"));
    }
}
