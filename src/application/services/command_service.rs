use crate::application::errors::CommandError;
use crate::domain::entities::{Command, CommandOutput, CommandRegistry, Content, Message, Reply};

pub const GREETING: &str = "Howdy, how are you doing?";

/// Service for managing and executing commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        self.register(Command::new("start")
            .with_description("Say hello")
            .with_aliases(vec!["hello".to_string()])
            .with_handler(|_| Ok(CommandOutput::Reply(vec![Reply::plain(GREETING)]))));

        self.register(Command::new("horoscope")
            .with_description("Get your daily horoscope")
            .with_handler(|_| Ok(CommandOutput::StartDialogue)));

        self.register(Command::new("cancel")
            .with_description("Cancel the current horoscope request")
            .with_handler(|_| Ok(CommandOutput::CancelDialogue)));

        // Help is registered last so its text covers everything above
        let mut help = self.get_help();
        help.push_str(&format!("  {}help - Show this message\n", self.prefix));
        let help = help.trim_end().to_string();
        self.register(Command::new("help")
            .with_description("Show this message")
            .with_handler(move |_| Ok(CommandOutput::Reply(vec![Reply::plain(help.clone())]))));
    }

    /// Run the command carried by `message`. Non-command messages yield `Ok(None)`.
    pub fn handle(&self, message: &Message) -> Result<Option<CommandOutput>, CommandError> {
        let Content::Command { name, .. } = &message.content else {
            return Ok(None);
        };

        let cmd = self.registry.find(name)
            .ok_or_else(|| CommandError::NotFound(name.clone()))?;

        match &cmd.handler {
            Some(handler) => Ok(Some(handler(message)?)),
            None => Err(CommandError::ExecutionFailed(format!("Command {} has no handler", cmd.name))),
        }
    }

    pub fn get_help(&self) -> String {
        let mut help = "Available commands:\n".to_string();
        for cmd in self.registry.all() {
            help.push_str(&format!("  {}{} - {}\n", self.prefix, cmd.name, cmd.description.as_deref().unwrap_or("")));
        }
        help
    }

    /// `(name, description)` pairs, for registering with the platform
    pub fn descriptions(&self) -> Vec<(String, String)> {
        self.registry.all()
            .flat_map(|cmd| {
                let desc = cmd.description.clone().unwrap_or_default();
                std::iter::once(cmd.name.clone())
                    .chain(cmd.aliases.iter().cloned())
                    .map(move |name| (name, desc.clone()))
            })
            .collect()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
