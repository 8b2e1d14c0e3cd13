use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    prelude::*,
    session::{FileStore, Role, SessionStore, Theme, User},
};

#[derive(Parser)]
pub struct SessionArgs {
    /// Where the session (theme, signed-in user and token) is kept.
    #[clap(
        long = "session-file",
        env = "KONNECTX_SESSION_FILE",
        default_value = "konnectx-session.toml"
    )]
    path: PathBuf,
}

impl SessionArgs {
    pub fn open(&self) -> Result<SessionStore<FileStore>> {
        SessionStore::load(FileStore::new(&self.path))
    }
}

#[derive(Parser)]
pub struct SessionCommandArgs {
    #[clap(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: SessionCommand,
}

impl SessionCommandArgs {
    pub fn run(self) -> Result {
        let mut store = self.session.open()?;
        match self.command {
            SessionCommand::Show => {}
            SessionCommand::Theme { theme: Some(theme) } => store.set_theme(theme)?,
            SessionCommand::Theme { theme: None } => {
                store.toggle_theme()?;
            }
            SessionCommand::SignIn(args) => {
                let user =
                    User { id: args.user_id, name: args.name, email: args.email, role: args.role };
                store.sign_in(user, args.token)?;
            }
            SessionCommand::SignOut => store.sign_out()?,
        }

        let session = store.session();
        println!("theme: {}", session.theme);
        match &session.user {
            Some(user) if session.is_signed_in() => {
                print!("user:  {} ({}, {})", user.name, user.id, user.role);
                if let Some(email) = &user.email {
                    print!(" <{email}>");
                }
                println!();
            }
            _ => println!("user:  signed out"),
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Show the current session.
    Show,

    /// Set the theme, or toggle it when none is given.
    Theme { theme: Option<Theme> },

    /// Remember the user and their API token.
    SignIn(SignInArgs),

    /// Forget the user and their API token.
    SignOut,
}

#[derive(Parser)]
struct SignInArgs {
    #[clap(long, env = "KONNECTX_API_TOKEN", hide_env_values = true)]
    token: String,

    #[clap(long)]
    user_id: String,

    #[clap(long)]
    name: String,

    #[clap(long)]
    email: Option<String>,

    #[clap(long, default_value = "user")]
    role: Role,
}
