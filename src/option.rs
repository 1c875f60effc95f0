use std::fmt;

use once_cell::sync::Lazy;

use crate::argument::{ArgumentType, ArgumentValue, ErasedArgumentType};
use crate::locale::{Locale, Text};
use crate::messages;
use crate::version::Build;

/// Tokens starting with one of these introduce an option.
pub const OPTION_MARKERS: [&str; 2] = ["•", "--"];

/// A named parameter, typed by the [`ArgumentType`] it wraps.
pub struct CommandOption<T> {
    name: Text,
    description: Text,
    argument_type: ArgumentType<T>,
    hidden: bool,
}

impl<T> Clone for CommandOption<T> {
    fn clone(&self) -> Self {
        CommandOption {
            name: self.name.clone(),
            description: self.description.clone(),
            argument_type: self.argument_type.clone(),
            hidden: self.hidden,
        }
    }
}

impl<T> fmt::Debug for CommandOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandOption")
            .field("key", &self.name.key())
            .field("type", &self.argument_type)
            .field("hidden", &self.hidden)
            .finish()
    }
}

impl<T: ArgumentValue> CommandOption<T> {
    pub fn new(
        name: impl Into<Text>,
        description: impl Into<Text>,
        argument_type: ArgumentType<T>,
    ) -> Self {
        CommandOption {
            name: name.into(),
            description: description.into(),
            argument_type,
            hidden: false,
        }
    }

    /// Accepted on the command line but left out of help.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Parsed values are stored under this, whichever locale's name matched.
    pub fn key(&self) -> String {
        self.name.key()
    }

    pub fn name(&self) -> &Text {
        &self.name
    }

    pub fn argument_type(&self) -> &ArgumentType<T> {
        &self.argument_type
    }
}

impl CommandOption<bool> {
    pub fn flag(name: impl Into<Text>, description: impl Into<Text>) -> Self {
        CommandOption::new(name, description, ArgumentType::boolean())
    }
}

/// The parser's view of a [`CommandOption`].
pub(crate) trait ErasedOption: Send + Sync {
    fn key(&self) -> String;
    fn aliases(&self) -> Vec<String>;
    fn name(&self) -> &Text;
    fn description(&self) -> &Text;
    fn is_hidden(&self) -> bool;
    fn erased_type(&self) -> &dyn ErasedArgumentType;
}

impl<T: ArgumentValue> ErasedOption for CommandOption<T> {
    fn key(&self) -> String {
        self.name.key()
    }

    fn aliases(&self) -> Vec<String> {
        self.name.aliases()
    }

    fn name(&self) -> &Text {
        &self.name
    }

    fn description(&self) -> &Text {
        &self.description
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn erased_type(&self) -> &dyn ErasedArgumentType {
        &self.argument_type
    }
}

/// Strips an option marker, if the token carries one.
pub(crate) fn strip_marker(token: &str) -> Option<&str> {
    OPTION_MARKERS
        .iter()
        .find_map(|marker| token.strip_prefix(marker))
}

pub(crate) static NO_COLOR: Lazy<CommandOption<bool>> = Lazy::new(|| {
    CommandOption::flag(messages::no_color_name(), messages::no_color_description())
});

pub(crate) static LANGUAGE: Lazy<CommandOption<Locale>> = Lazy::new(|| {
    CommandOption::new(
        messages::language_name(),
        messages::language_description(),
        ArgumentType::language(),
    )
});

pub(crate) static USE_VERSION: Lazy<CommandOption<Build>> = Lazy::new(|| {
    CommandOption::new(
        messages::use_version_name(),
        messages::use_version_description(),
        ArgumentType::build(),
    )
});

/// Options injected into every command, after its declared ones.
pub(crate) fn standard_options(version_override: bool) -> Vec<&'static dyn ErasedOption> {
    let mut options: Vec<&'static dyn ErasedOption> = vec![&*NO_COLOR, &*LANGUAGE];
    if version_override {
        options.push(&*USE_VERSION);
    }
    options
}

/// The option every command accepts for suppressing colour.
pub fn no_color() -> CommandOption<bool> {
    NO_COLOR.clone()
}

/// The option every command accepts for overriding the locale.
pub fn language() -> CommandOption<Locale> {
    LANGUAGE.clone()
}

/// The option accepted when the tool knows its own package.
pub fn use_version() -> CommandOption<Build> {
    USE_VERSION.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers() {
        assert_eq!(strip_marker("•string"), Some("string"));
        assert_eq!(strip_marker("--string"), Some("string"));
        assert_eq!(strip_marker("-s"), None);
        assert_eq!(strip_marker("string"), None);
    }

    #[test]
    fn keys_are_fallback_names() {
        let opt = CommandOption::flag(
            Text::table(&[(Locale::English, "verbose"), (Locale::German, "ausführlich")]),
            "",
        );
        assert_eq!(ErasedOption::key(&opt), "verbose");
        assert_eq!(
            ErasedOption::aliases(&opt),
            vec!["verbose", "ausführlich", "ausfuhrlich"]
        );
        assert_eq!(language().key(), "language");
        assert!(ErasedOption::aliases(&*USE_VERSION).contains(&"version-verwenden".to_string()));
    }
}
