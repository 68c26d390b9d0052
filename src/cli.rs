//! Command line interface. With no subcommand the HTTP server starts.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ngo-transparency-server")]
#[command(about = "Authentication API and guarded dashboard for NGO transparency reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Print an Argon2 hash for provisioning a user row
    HashPassword {
        /// Plaintext password to hash
        plaintext: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_runs_the_server() {
        let cli = Cli::try_parse_from(["ngo-transparency-server"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn hash_password_takes_plaintext() {
        let args = ["ngo-transparency-server", "hash-password", "s3cret"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(
            cli.command,
            Some(Command::HashPassword {
                plaintext: "s3cret".to_string()
            })
        );
    }

    #[test]
    fn hash_password_without_plaintext_is_a_usage_error() {
        let err = Cli::try_parse_from(["ngo-transparency-server", "hash-password"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["ngo-transparency-server", "serve-forever"]).is_err());
    }
}
