//! What each subcommand does, and how failures are shown to the user.
//!
//! The client classifies errors; this layer only decides wording. Loading
//! failures get a generic screen message plus a notice, while create and
//! update surface the server's own description so validation messages reach
//! the user.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;
use users_core::{ApiError, NewUser, Transport, UserId, UserPatch, UsersApi};

use crate::commands::{Command, UserFields};
use crate::notify::{Notice, Notifier};
use crate::view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Show(UserId),
    Create(NewUser),
    Update(UserId, UserPatch),
    Delete(UserId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The operation failed and the failure has already been shown.
    Failed,
}

impl Action {
    /// Map a parsed subcommand to an action, reading `--from-json` files.
    pub fn from_command(command: Command) -> Result<Self> {
        Ok(match command {
            Command::List => Action::List,
            Command::Show { id } => Action::Show(id),
            Command::Delete { id } => Action::Delete(id),
            Command::Create { fields, from_json } => match from_json {
                Some(path) => {
                    ensure!(fields.is_empty(), "--from-json cannot be combined with field flags");
                    Action::Create(read_json(&path)?)
                }
                None => Action::Create(new_user(fields)?),
            },
            Command::Update { id, fields, from_json } => {
                let patch: UserPatch = match from_json {
                    Some(path) => {
                        ensure!(fields.is_empty(), "--from-json cannot be combined with field flags");
                        read_json(&path)?
                    }
                    None => patch(fields),
                };
                ensure!(!patch.is_empty(), "nothing to update: pass at least one field");
                Action::Update(id, patch)
            }
        })
    }

    pub fn execute<T: Transport>(
        self,
        api: &UsersApi<T>,
        out: &mut impl Write,
        notifier: &dyn Notifier,
    ) -> Result<Outcome> {
        match self {
            Action::List => match api.list_users() {
                Ok(users) => writeln!(out, "{}", view::user_list(&users))?,
                Err(err) => {
                    return report(
                        out,
                        notifier,
                        "Failed to load users. Please try again later.",
                        Notice::error("Failed to load users"),
                        &err,
                    )
                }
            },
            Action::Show(id) => match api.get_user(id) {
                Ok(user) => writeln!(out, "{}", view::user_detail(&user))?,
                Err(err) => {
                    return report(
                        out,
                        notifier,
                        "Failed to load user details. Please try again later.",
                        Notice::error("Failed to load user details"),
                        &err,
                    )
                }
            },
            Action::Create(input) => match api.create_user(&input) {
                Ok(user) => {
                    writeln!(out, "Created user #{}\n", user.id)?;
                    writeln!(out, "{}", view::user_detail(&user))?;
                }
                Err(err) => {
                    let notice = Notice::error(err.to_string());
                    return report(out, notifier, "Failed to create user.", notice, &err);
                }
            },
            Action::Update(id, patch) => match api.update_user(id, &patch) {
                Ok(user) => {
                    writeln!(out, "Updated user #{}\n", user.id)?;
                    writeln!(out, "{}", view::user_detail(&user))?;
                }
                Err(err) => {
                    let notice = Notice::error(err.to_string());
                    return report(out, notifier, "Failed to update user.", notice, &err);
                }
            },
            Action::Delete(id) => match api.delete_user(id) {
                Ok(()) => writeln!(out, "Deleted user #{id}")?,
                Err(err) => {
                    return report(
                        out,
                        notifier,
                        "Failed to delete user.",
                        Notice::error("Failed to delete user"),
                        &err,
                    )
                }
            },
        }
        Ok(Outcome::Done)
    }
}

fn report(
    out: &mut impl Write,
    notifier: &dyn Notifier,
    screen: &str,
    notice: Notice,
    err: &ApiError,
) -> Result<Outcome> {
    debug!(error = %err, "operation failed");
    writeln!(out, "{screen}")?;
    notifier.notify(notice);
    Ok(Outcome::Failed)
}

fn new_user(fields: UserFields) -> Result<NewUser> {
    let (Some(name), Some(username), Some(email)) = (fields.name, fields.username, fields.email) else {
        bail!("--name, --username and --email are required unless --from-json is given");
    };
    Ok(NewUser {
        phone: fields.phone,
        website: fields.website,
        ..NewUser::new(&name, &username, &email)
    })
}

fn patch(fields: UserFields) -> UserPatch {
    UserPatch {
        name: fields.name,
        username: fields.username,
        email: fields.email,
        phone: fields.phone,
        website: fields.website,
        ..UserPatch::default()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}
