//! Usage text for a command, rendered per locale.

use std::collections::HashSet;

use console::style;

use crate::argument::ErasedArgumentType;
use crate::command::Command;
use crate::locale::{Locale, Text};
use crate::messages;
use crate::option::{standard_options, ErasedOption, OPTION_MARKERS};

fn bracketed(types: &[std::sync::Arc<dyn ErasedArgumentType>], locale: Locale) -> String {
    types
        .iter()
        .map(|t| format!(" [{}]", t.name().resolve(locale)))
        .collect()
}

fn sort_key(name: &str) -> String {
    name.to_lowercase()
}

/// `path` is the command chain from the root down to `command`.
pub(crate) fn render(
    command: &Command,
    path: &[Text],
    version_override: bool,
    locale: Locale,
) -> String {
    let mut out = String::new();

    let usage: Vec<String> = path.iter().map(|name| name.resolve(locale)).collect();
    out.push_str(&format!(
        "{}{}\n",
        style(format!("$ {}", usage.join(" "))).bold(),
        bracketed(command.direct_arguments(), locale)
    ));
    let description = command.description().resolve(locale);
    if !description.is_empty() {
        out.push('\n');
        out.push_str(&description);
        out.push('\n');
    }

    let mut subcommands: Vec<(String, String)> = command
        .subcommands()
        .map(|child| {
            let name = child.name().resolve(locale);
            let line = format!(
                "{}{}  {}",
                style(&name).bold(),
                bracketed(child.direct_arguments(), locale),
                child.description().resolve(locale)
            );
            (sort_key(&name), line)
        })
        .collect();
    if !subcommands.is_empty() {
        subcommands.sort();
        out.push('\n');
        out.push_str(&style(messages::subcommands_heading(locale)).underlined().to_string());
        out.push_str("\n\n");
        for (_, line) in &subcommands {
            out.push_str(line);
            out.push('\n');
        }
    }

    let options: Vec<&dyn ErasedOption> = command
        .declared_options()
        .iter()
        .map(|o| &**o)
        .chain(standard_options(version_override))
        .filter(|o| !o.is_hidden())
        .collect();
    let mut option_lines: Vec<(String, String)> = options
        .iter()
        .map(|option| {
            let name = option.name().resolve(locale);
            let kind = option.erased_type();
            let annotation = if kind.is_boolean() {
                String::new()
            } else {
                format!(" [{}]", kind.name().resolve(locale))
            };
            let line = format!(
                "{}{}  {}",
                style(format!("{}{}", OPTION_MARKERS[0], name)).bold(),
                annotation,
                option.description().resolve(locale)
            );
            (sort_key(&name), line)
        })
        .collect();
    if !option_lines.is_empty() {
        option_lines.sort();
        out.push('\n');
        out.push_str(&style(messages::options_heading(locale)).underlined().to_string());
        out.push_str("\n\n");
        for (_, line) in &option_lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    let mut seen = HashSet::new();
    let mut types: Vec<(String, String)> = Vec::new();
    let argument_types = command
        .direct_arguments()
        .iter()
        .map(|t| &**t)
        .chain(
            command
                .subcommands()
                .flat_map(|child| child.direct_arguments().iter().map(|t| &**t)),
        )
        .chain(options.iter().map(|o| o.erased_type()));
    for kind in argument_types {
        if kind.is_boolean() || !seen.insert(kind.identifier().to_string()) {
            continue;
        }
        let name = kind.name().resolve(locale);
        let line = format!(
            "{}  {}",
            style(format!("[{name}]")).bold(),
            kind.syntax().resolve(locale)
        );
        types.push((sort_key(&name), line));
    }
    if !types.is_empty() {
        types.sort();
        out.push('\n');
        out.push_str(&style(messages::argument_types_heading(locale)).underlined().to_string());
        out.push_str("\n\n");
        for (_, line) in &types {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}
