//! Walks a command tree, parses tokens and runs the matched command.

use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::argument::Value;
use crate::command::{Action, Command};
use crate::error::{Error, Result, UsageError, UsageFailure};
use crate::help;
use crate::locale::Text;
use crate::option::{standard_options, strip_marker, ErasedOption, LANGUAGE, NO_COLOR};
use crate::output::Output;
use crate::parsed::{DirectArguments, Options};

/// State carried down the recursion: the live command stack and whether
/// `use-version` is on offer.
#[derive(Debug, Default)]
pub(crate) struct Context {
    stack: Vec<Text>,
    version_override: bool,
}

impl Context {
    pub(crate) fn new(version_override: bool) -> Self {
        Context {
            stack: Vec::new(),
            version_override,
        }
    }

    /// Pushes `command`; the returned guard pops it however the scope ends.
    pub(crate) fn enter(&mut self, command: &Command) -> Scope<'_> {
        self.stack.push(command.name().clone());
        Scope { context: self }
    }

    pub(crate) fn path(&self) -> Vec<Text> {
        self.stack.clone()
    }

    pub(crate) fn version_override(&self) -> bool {
        self.version_override
    }

    fn usage(&self, failure: UsageFailure) -> Error {
        Error::from(UsageError::new(failure, self.path()))
    }
}

pub(crate) struct Scope<'a> {
    context: &'a mut Context,
}

impl Deref for Scope<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.context
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.context
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.context.stack.pop();
    }
}

pub(crate) fn dispatch(
    command: &Command,
    tokens: &[String],
    context: &mut Context,
    output: &mut Output,
) -> Result<()> {
    dispatch_within(None, command, tokens, context, output)
}

fn dispatch_within(
    parent: Option<&Command>,
    command: &Command,
    tokens: &[String],
    context: &mut Context,
    output: &mut Output,
) -> Result<()> {
    let mut scope = context.enter(command);

    if let Some((first, rest)) = tokens.split_first() {
        if let Some(child) = command.subcommands().find(|child| child.matches(first)) {
            debug!(subcommand = %child.name().key(), "descending");
            return dispatch_within(Some(command), child, rest, &mut scope, output);
        }
    }

    let (arguments, options) = parse(command, tokens, &scope)?;
    let colored = output.is_colored() && !options.flag(&NO_COLOR);
    let locale = options.value(&*LANGUAGE).unwrap_or(output.locale());
    debug!(
        command = %command.name().key(),
        arguments = arguments.len(),
        options = options.len(),
        %locale,
        colored,
        "parsed"
    );

    output.scoped(locale, colored, |output| match command.action() {
        Action::Run(handler) => handler(&arguments, &options, output),
        Action::ShowHelp => {
            output.write(help::render(
                command,
                &scope.path(),
                scope.version_override(),
                locale,
            ));
            Ok(())
        }
        Action::ShowParentHelp => {
            let path = scope.path();
            let target = parent.unwrap_or(command);
            let target_path = match parent {
                Some(_) => &path[..path.len() - 1],
                None => &path[..],
            };
            output.write(help::render(
                target,
                target_path,
                scope.version_override(),
                locale,
            ));
            Ok(())
        }
    })
}

/// Single left-to-right pass over the tokens below the matched command.
fn parse(
    command: &Command,
    tokens: &[String],
    context: &Context,
) -> Result<(DirectArguments, Options)> {
    let available: Vec<&dyn ErasedOption> = command
        .declared_options()
        .iter()
        .map(|o| &**o)
        .chain(standard_options(context.version_override()))
        .collect();

    let mut arguments = DirectArguments::default();
    let mut options = Options::default();
    let mut remaining = tokens.iter();

    while let Some(token) = remaining.next() {
        if let Some(name) = strip_marker(token) {
            let option = available
                .iter()
                .find(|option| option.aliases().iter().any(|alias| alias == name))
                .ok_or_else(|| {
                    context.usage(UsageFailure::InvalidOption {
                        token: token.clone(),
                    })
                })?;
            let key = option.key();
            if options.contains_key(&key) {
                return Err(context.usage(UsageFailure::UnexpectedOption {
                    option: option.name().clone(),
                }));
            }
            let kind = option.erased_type();
            let value = if kind.is_boolean() {
                Value::Boolean(true)
            } else {
                let argument = remaining.next().ok_or_else(|| {
                    context.usage(UsageFailure::MissingOptionArgument {
                        option: option.name().clone(),
                    })
                })?;
                kind.parse_erased(argument).ok_or_else(|| {
                    context.usage(UsageFailure::InvalidOptionArgument {
                        option: option.name().clone(),
                        argument: argument.clone(),
                    })
                })?
            };
            options.insert(key, value);
        } else {
            let kind = command
                .direct_arguments()
                .get(arguments.len())
                .ok_or_else(|| {
                    context.usage(UsageFailure::UnexpectedArgument {
                        token: token.clone(),
                    })
                })?;
            let value = kind.parse_erased(token).ok_or_else(|| {
                context.usage(UsageFailure::InvalidDirectArgument {
                    argument: token.clone(),
                    expected: kind.name().clone(),
                })
            })?;
            arguments.push(value);
        }
    }

    Ok((arguments, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::ArgumentType;
    use crate::locale::Locale;
    use crate::option::CommandOption;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn tree() -> Command {
        let string = CommandOption::new("string", "A string.", ArgumentType::string());
        let count = CommandOption::new("count", "A count.", ArgumentType::integer());
        Command::new("tool", "").subcommand(
            Command::new("execute", "")
                .argument(ArgumentType::integer())
                .option(string.clone())
                .option(count.clone())
                .handler(move |args, options, output| {
                    if let Some(text) = options.value(&string) {
                        output.write(text);
                    }
                    if let Some(n) = args.argument(0, &ArgumentType::integer()) {
                        output.write(format!("#{n}"));
                    }
                    if let Some(n) = options.value(&count) {
                        output.write(format!("x{n}"));
                    }
                    output.write(output.locale().code());
                    Ok(())
                }),
        )
    }

    fn run(list: &[&str]) -> Result<String> {
        tree().execute(&tokens(list), Locale::English)
    }

    #[test]
    fn options_and_direct_arguments() {
        assert_eq!(run(&["execute", "•string", "hi"]).unwrap(), "hien");
        assert_eq!(run(&["execute", "7", "--count", "2"]).unwrap(), "#7x2en");
        assert_eq!(run(&["execute", "•language", "de"]).unwrap(), "de");
    }

    #[test]
    fn failures() {
        let failure = |list: &[&str]| run(list).unwrap_err().usage_failure().cloned();
        assert!(matches!(
            failure(&["execute", "•string"]),
            Some(UsageFailure::MissingOptionArgument { .. })
        ));
        assert!(matches!(
            failure(&["execute", "•count", "two"]),
            Some(UsageFailure::InvalidOptionArgument { argument, .. }) if argument == "two"
        ));
        assert!(matches!(
            failure(&["execute", "•bogus"]),
            Some(UsageFailure::InvalidOption { token }) if token == "•bogus"
        ));
        assert!(matches!(
            failure(&["execute", "•count", "1", "--count", "2"]),
            Some(UsageFailure::UnexpectedOption { .. })
        ));
        assert!(matches!(
            failure(&["execute", "x"]),
            Some(UsageFailure::InvalidDirectArgument { argument, .. }) if argument == "x"
        ));
        assert!(matches!(
            failure(&["execute", "1", "2"]),
            Some(UsageFailure::UnexpectedArgument { token }) if token == "2"
        ));
        assert!(matches!(
            failure(&["•use-version", "1.0.0"]),
            Some(UsageFailure::InvalidOption { .. })
        ));
    }

    #[test]
    fn errors_capture_the_live_path() {
        let error = run(&["execute", "•string"]).unwrap_err();
        assert!(error
            .describe(Locale::English)
            .ends_with("See also: $ tool execute help"));
        let error = run(&["nonsense"]).unwrap_err();
        assert!(error.describe(Locale::English).ends_with("See also: $ tool help"));
    }

    #[test]
    fn stack_is_restored_after_errors() {
        let root = tree();
        let mut context = Context::new(false);
        let mut output = Output::capturing(Locale::English);
        assert!(dispatch(&root, &tokens(&["execute", "•nope"]), &mut context, &mut output).is_err());
        assert!(context.path().is_empty());
        dispatch(&root, &tokens(&["execute"]), &mut context, &mut output).unwrap();
        assert!(context.path().is_empty());
    }

    #[test]
    fn help_describes_the_parent() {
        let help = run(&["execute", "help"]).unwrap();
        let plain = console::strip_ansi_codes(&help).into_owned();
        assert!(plain.starts_with("$ tool execute [integer]"), "{plain}");
        let root = run(&[]).unwrap();
        assert!(console::strip_ansi_codes(&root).starts_with("$ tool\n"));
        let german = run(&["hilfe", "•sprache", "de"]).unwrap();
        assert!(german.contains("Unterbefehle"));
    }

    #[test]
    fn no_color_strips_formatting() {
        let root = Command::new("tool", "").handler(|_, _, output| {
            output.write(console::style("x").red().force_styling(true).to_string());
            Ok(())
        });
        let colored = root.execute(&[], Locale::English).unwrap();
        assert!(colored.contains('\u{1b}'));
        let plain = root.execute(&tokens(&["--no-color"]), Locale::English).unwrap();
        assert_eq!(plain, "x");
    }

    #[test]
    fn use_version_only_when_overridable() {
        let root = Command::new("tool", "").handler(|_, _, _| Ok(()));
        let mut context = Context::new(true);
        let mut output = Output::capturing(Locale::English);
        dispatch(&root, &tokens(&["•use-version", "1.2.3"]), &mut context, &mut output).unwrap();
    }
}
