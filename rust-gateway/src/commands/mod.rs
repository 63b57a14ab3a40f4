//! Command catalog: schemas, handlers, and the registry that binds them.
//!
//! The registry is built once at startup and never mutated; the dispatcher
//! and the registration call both read from the same catalog, so what users
//! can invoke and what gets registered upstream cannot drift apart.

pub mod definition;
pub mod invite;
pub mod roll;

use std::collections::HashMap;

pub use definition::{CommandDefinition, CommandOptionDefinition, OPTION_TYPE_STRING};

use crate::interaction::response::ResponseData;
use crate::interaction::types::CommandOption;

/// A command's pure handler: options in, reply payload out.
pub type CommandHandler = Box<dyn Fn(&[CommandOption]) -> ResponseData + Send + Sync>;

/// A command definition paired with its handler.
pub struct RegisteredCommand {
    pub definition: CommandDefinition,
    handler: CommandHandler,
}

impl RegisteredCommand {
    /// Invoke the handler with the interaction's options.
    pub fn handle(&self, options: &[CommandOption]) -> ResponseData {
        (self.handler)(options)
    }
}

/// Immutable catalog mapping lowercase command names to their handlers.
pub struct CommandRegistry {
    commands: HashMap<String, RegisteredCommand>,
    // Registration order, for a stable definitions() sequence
    order: Vec<String>,
}

impl CommandRegistry {
    /// Build the static catalog for this application.
    pub fn new(application_id: &str) -> Self {
        let mut registry = Self {
            commands: HashMap::new(),
            order: Vec::new(),
        };

        registry.insert(invite::definition(), invite::handler(application_id));
        registry.insert(roll::definition(), roll::handler());

        registry
    }

    /// Keys are normalized to lowercase exactly once, here.
    fn insert(&mut self, definition: CommandDefinition, handler: CommandHandler) {
        let key = definition.name.to_lowercase();
        self.order.push(key.clone());
        self.commands.insert(
            key,
            RegisteredCommand {
                definition,
                handler,
            },
        );
    }

    /// Look up a command by name, case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(&name.to_lowercase())
    }

    /// All command definitions in registration order, for the bulk
    /// registration call.
    pub fn definitions(&self) -> Vec<&CommandDefinition> {
        self.order
            .iter()
            .filter_map(|key| self.commands.get(key))
            .map(|command| &command.definition)
            .collect()
    }
}
