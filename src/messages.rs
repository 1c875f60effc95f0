//! The framework's own user-facing strings in every supported locale.

use std::path::Path;

use crate::locale::{Locale, Text};
use crate::version::Build;

pub fn help_name() -> Text {
    Text::table(&[
        (Locale::English, "help"),
        (Locale::German, "hilfe"),
        (Locale::French, "aide"),
    ])
}

pub fn help_description() -> Text {
    Text::table(&[
        (Locale::English, "displays usage information."),
        (Locale::German, "zeigt Gebrauchsinformationen an."),
        (Locale::French, "affiche les informations d’utilisation."),
    ])
}

pub fn no_color_name() -> Text {
    Text::table(&[
        (Locale::English, "no-color"),
        (Locale::German, "keine-farbe"),
        (Locale::French, "sans-couleur"),
    ])
}

pub fn no_color_description() -> Text {
    Text::table(&[
        (Locale::English, "Removes color from the output."),
        (Locale::German, "Entfernt Farbe aus der Ausgabe."),
        (Locale::French, "Supprime la couleur de la sortie."),
    ])
}

pub fn language_name() -> Text {
    Text::table(&[
        (Locale::English, "language"),
        (Locale::German, "sprache"),
        (Locale::French, "langue"),
    ])
}

pub fn language_description() -> Text {
    Text::table(&[
        (Locale::English, "A language to use instead of the one specified in preferences."),
        (Locale::German, "Eine Sprache, die statt der Voreinstellung verwendet werden soll."),
        (Locale::French, "Une langue à utiliser à la place de celle des préférences."),
    ])
}

pub fn use_version_name() -> Text {
    Text::table(&[
        (Locale::English, "use-version"),
        (Locale::German, "version-verwenden"),
        (Locale::French, "utiliser-version"),
    ])
}

pub fn use_version_description() -> Text {
    Text::table(&[
        (Locale::English, "A version to use instead of the one currently installed."),
        (Locale::German, "Eine Version, die statt der installierten verwendet werden soll."),
        (Locale::French, "Une version à utiliser à la place de celle installée."),
    ])
}

pub fn subcommands_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Subcommands",
        Locale::German => "Unterbefehle",
        Locale::French => "Sous‐commandes",
    }
}

pub fn options_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Options",
        Locale::German => "Optionen",
        Locale::French => "Options",
    }
}

pub fn argument_types_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Argument Types",
        Locale::German => "Argumentarten",
        Locale::French => "Types d’arguments",
    }
}

pub fn see_also(locale: Locale, path: &str) -> String {
    let help = help_name().resolve(locale);
    match locale {
        Locale::English => format!("See also: $ {path} {help}"),
        Locale::German => format!("Siehe auch: $ {path} {help}"),
        Locale::French => format!("Voir aussi : $ {path} {help}"),
    }
}

pub fn unexpected_argument(locale: Locale, token: &str) -> String {
    match locale {
        Locale::English => format!("Unexpected argument: “{token}”"),
        Locale::German => format!("Unerwartetes Argument: „{token}“"),
        Locale::French => format!("Argument inattendu : « {token} »"),
    }
}

pub fn unexpected_option(locale: Locale, option: &str) -> String {
    match locale {
        Locale::English => format!("The option “{option}” was given more than once."),
        Locale::German => format!("Die Option „{option}“ wurde mehrmals angegeben."),
        Locale::French => format!("L’option « {option} » a été donnée plus d’une fois."),
    }
}

pub fn invalid_option(locale: Locale, token: &str) -> String {
    match locale {
        Locale::English => format!("Invalid option: “{token}”"),
        Locale::German => format!("Ungültige Option: „{token}“"),
        Locale::French => format!("Option invalide : « {token} »"),
    }
}

pub fn missing_option_argument(locale: Locale, option: &str) -> String {
    match locale {
        Locale::English => format!("Missing argument for “{option}”."),
        Locale::German => format!("Fehlendes Argument für „{option}“."),
        Locale::French => format!("Argument manquant pour « {option} »."),
    }
}

pub fn invalid_option_argument(locale: Locale, option: &str, argument: &str) -> String {
    match locale {
        Locale::English => format!("Invalid argument for “{option}”: “{argument}”"),
        Locale::German => format!("Ungültiges Argument für „{option}“: „{argument}“"),
        Locale::French => format!("Argument invalide pour « {option} » : « {argument} »"),
    }
}

pub fn invalid_direct_argument(locale: Locale, argument: &str, expected: &str) -> String {
    match locale {
        Locale::English => format!("Invalid argument: “{argument}” (expected [{expected}])"),
        Locale::German => format!("Ungültiges Argument: „{argument}“ (erwartet [{expected}])"),
        Locale::French => format!("Argument invalide : « {argument} » (attendu [{expected}])"),
    }
}

pub fn tool_unavailable(locale: Locale, tool: &str, webpage: &str) -> String {
    match locale {
        Locale::English => format!("{tool} could not be found. It is required for this operation. ({webpage})"),
        Locale::German => format!("{tool} konnte nicht gefunden werden. Es wird für diesen Vorgang benötigt. ({webpage})"),
        Locale::French => format!("{tool} est introuvable. Il est requis pour cette opération. ({webpage})"),
    }
}

pub fn tool_version_mismatch(locale: Locale, tool: &str, expected: &str, found: &str) -> String {
    match locale {
        Locale::English => format!("Warning: {tool} {expected} is recommended, but {found} was found. Continuing anyway."),
        Locale::German => format!("Warnung: {tool} {expected} wird empfohlen, aber {found} wurde gefunden. Es wird trotzdem fortgefahren."),
        Locale::French => format!("Avertissement : {tool} {expected} est recommandé, mais {found} a été trouvé. L’opération continue."),
    }
}

pub fn unknown_tool_version(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "an unknown version",
        Locale::German => "eine unbekannte Version",
        Locale::French => "une version inconnue",
    }
}

pub fn execution_failed(locale: Locale, command: &str, code: i32) -> String {
    match locale {
        Locale::English => format!("“{command}” failed with exit code {code}."),
        Locale::German => format!("„{command}“ ist mit Exit‐Code {code} fehlgeschlagen."),
        Locale::French => format!("« {command} » a échoué avec le code de sortie {code}."),
    }
}

pub fn build_failed(locale: Locale, build: &Build, step: &str) -> String {
    let build = build.describe(locale);
    match locale {
        Locale::English => format!("Version {build} could not be built ({step})."),
        Locale::German => format!("Version {build} konnte nicht gebaut werden ({step})."),
        Locale::French => format!("La version {build} n’a pas pu être compilée ({step})."),
    }
}

pub fn no_matching_executable(locale: Locale, directory: &Path, candidates: &[String]) -> String {
    let directory = directory.display();
    let candidates = candidates.join(", ");
    match locale {
        Locale::English => format!("None of the expected executables ({candidates}) was found in {directory}."),
        Locale::German => format!("Keine der erwarteten ausführbaren Dateien ({candidates}) wurde in {directory} gefunden."),
        Locale::French => format!("Aucun des exécutables attendus ({candidates}) n’a été trouvé dans {directory}."),
    }
}

pub fn configuration_invalid(locale: Locale, path: &Path, reason: &str) -> String {
    let path = path.display();
    match locale {
        Locale::English => format!("The settings in {path} could not be read: {reason}"),
        Locale::German => format!("Die Einstellungen in {path} konnten nicht gelesen werden: {reason}"),
        Locale::French => format!("Les réglages de {path} n’ont pas pu être lus : {reason}"),
    }
}

pub fn building(locale: Locale, build: &Build) -> String {
    let build = build.describe(locale);
    match locale {
        Locale::English => format!("Building {build}..."),
        Locale::German => format!("{build} wird gebaut..."),
        Locale::French => format!("Compilation de {build}..."),
    }
}
