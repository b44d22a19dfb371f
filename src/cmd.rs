use clap::{Arg, Command, command, value_parser};

pub const SCOPE_CMD: &str = "scope";
pub const SCOPE_ARG: &str = "scope";
pub const USERINFO_CMD: &str = "userinfo";
pub const ACCESS_TOKEN_OPTION: &str = "access-token";
pub const TIMEOUT_OPTION: &str = "timeout-ms";

pub fn cmd() -> Command {
    command!()
        .name("google-login")
        .about("Probe the Google login binder")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(SCOPE_CMD)
                .about("Print the scope requested for the given extra scopes")
                .arg(
                    Arg::new(SCOPE_ARG)
                        .help("Extra scopes, space separated")
                        .required(false),
                ),
        )
        .subcommand(
            Command::new(USERINFO_CMD)
                .about("Enrich an access token with the user's Google profile")
                .arg(
                    Arg::new(ACCESS_TOKEN_OPTION)
                        .long(ACCESS_TOKEN_OPTION)
                        .help("OAuth2 access token")
                        .required(true),
                )
                .arg(
                    Arg::new(TIMEOUT_OPTION)
                        .long(TIMEOUT_OPTION)
                        .help("Profile request timeout in milliseconds")
                        .value_parser(value_parser!(u64)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_is_valid() {
        cmd().debug_assert();
    }

    #[test]
    fn test_userinfo_requires_token() {
        let result = cmd().try_get_matches_from(["google-login", "userinfo"]);
        assert!(result.is_err());

        let matches = cmd()
            .try_get_matches_from(["google-login", "userinfo", "--access-token", "tok", "--timeout-ms", "50"])
            .expect("valid args");
        let (_, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(sub.get_one::<String>(ACCESS_TOKEN_OPTION).map(String::as_str), Some("tok"));
        assert_eq!(sub.get_one::<u64>(TIMEOUT_OPTION), Some(&50));
    }
}
