use crate::cli::LoginArgs;
use crate::commands::prompt;
use crate::state::AppState;
use mockdock_common::diagnostic::Error;
use mockdock_infra_registry::DEFAULT_SERVER;
use std::io::{BufRead, Write};

pub fn handle(
    state: &AppState,
    args: &LoginArgs,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let server = args.server.as_deref().unwrap_or(DEFAULT_SERVER);

    let username = match &args.username {
        Some(u) => u.clone(),
        None => prompt(input, out, &format!("Username for '{server}': "))?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => prompt(input, out, "Password: ")?,
    };

    state
        .credentials
        .login(server, &username, &password)
        .map_err(Error::new)?;
    writeln!(out, "Login Succeeded for user '{username}' on '{server}'")?;
    Ok(())
}
