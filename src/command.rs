//! Command declarations: the nodes of a tool's subcommand tree.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::argument::{ArgumentType, ArgumentValue, ErasedArgumentType};
use crate::dispatch::{self, Context};
use crate::error::Result;
use crate::locale::{Locale, Text};
use crate::messages;
use crate::option::{CommandOption, ErasedOption};
use crate::output::Output;
use crate::parsed::{DirectArguments, Options};

/// What runs once a command's tokens are parsed.
pub type Handler =
    Arc<dyn Fn(&DirectArguments, &Options, &mut Output) -> Result<()> + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Action {
    Run(Handler),
    /// Help for this command itself (commands without a handler).
    ShowHelp,
    /// Help for the command one level up (the implicit `help` child).
    ShowParentHelp,
}

#[derive(Clone)]
pub struct Command {
    name: Text,
    description: Text,
    direct_arguments: Vec<Arc<dyn ErasedArgumentType>>,
    options: Vec<Arc<dyn ErasedOption>>,
    subcommands: Vec<Command>,
    action: Action,
    includes_help: bool,
}

static HELP: Lazy<Command> = Lazy::new(|| Command {
    name: messages::help_name(),
    description: messages::help_description(),
    direct_arguments: Vec::new(),
    options: Vec::new(),
    subcommands: Vec::new(),
    action: Action::ShowParentHelp,
    includes_help: false,
});

impl Command {
    pub fn new(name: impl Into<Text>, description: impl Into<Text>) -> Self {
        Command {
            name: name.into(),
            description: description.into(),
            direct_arguments: Vec::new(),
            options: Vec::new(),
            subcommands: Vec::new(),
            action: Action::ShowHelp,
            includes_help: true,
        }
    }

    /// Declares the next direct (positional) argument.
    pub fn argument<T: ArgumentValue>(mut self, argument_type: ArgumentType<T>) -> Self {
        self.direct_arguments.push(Arc::new(argument_type));
        self
    }

    pub fn option<T: ArgumentValue>(mut self, option: CommandOption<T>) -> Self {
        self.options.push(Arc::new(option));
        self
    }

    pub fn subcommand(mut self, command: Command) -> Self {
        self.subcommands.push(command);
        self
    }

    pub fn handler(
        mut self,
        handler: impl Fn(&DirectArguments, &Options, &mut Output) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.action = Action::Run(Arc::new(handler));
        self
    }

    pub fn name(&self) -> &Text {
        &self.name
    }

    pub fn description(&self) -> &Text {
        &self.description
    }

    /// Every spelling that selects this command as a subcommand.
    pub fn aliases(&self) -> Vec<String> {
        self.name.aliases()
    }

    pub(crate) fn matches(&self, token: &str) -> bool {
        self.aliases().iter().any(|alias| alias == token)
    }

    pub(crate) fn direct_arguments(&self) -> &[Arc<dyn ErasedArgumentType>] {
        &self.direct_arguments
    }

    pub(crate) fn declared_options(&self) -> &[Arc<dyn ErasedOption>] {
        &self.options
    }

    pub(crate) fn action(&self) -> &Action {
        &self.action
    }

    /// Declared children followed by the implicit `help`.
    pub fn subcommands(&self) -> impl Iterator<Item = &Command> {
        self.subcommands
            .iter()
            .chain(self.includes_help.then(|| &*HELP))
    }

    /// Parses `tokens` against this command tree and returns everything the
    /// matched handler printed.
    pub fn execute(&self, tokens: &[String], locale: Locale) -> Result<String> {
        let mut output = Output::capturing(locale);
        self.execute_into(tokens, &mut output)?;
        Ok(output.into_captured())
    }

    /// Like [`Command::execute`] but prints through a caller-provided sink.
    pub fn execute_into(&self, tokens: &[String], output: &mut Output) -> Result<()> {
        let mut context = Context::new(false);
        dispatch::dispatch(self, tokens, &mut context, output)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("direct_arguments", &self.direct_arguments.len())
            .field("options", &self.options.len())
            .field("subcommands", &self.subcommands)
            .finish()
    }
}
