//! The `invite` command: an OAuth link to add the bot to a server.

use crate::commands::definition::CommandDefinition;
use crate::commands::CommandHandler;
use crate::interaction::response::ResponseData;

/// Command schema for registration.
pub fn definition() -> CommandDefinition {
    CommandDefinition::new("invite", "Get an invite link to add the bot to your server")
}

/// Build the invite handler for this application id.
///
/// The invite URL is personal to the invoker, so the reply carries the
/// ephemeral flag.
pub fn handler(application_id: &str) -> CommandHandler {
    let url = format!(
        "https://discord.com/api/oauth2/authorize?client_id={}&scope=applications.commands",
        application_id
    );
    Box::new(move |_options| ResponseData::ephemeral(url.clone()))
}
