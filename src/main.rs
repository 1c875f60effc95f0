use std::sync::Arc;

use commandant::platform::platform;
use commandant::{
    ArgumentType, Build, Command, CommandOption, Locale, Output, Package, PackageRepository,
    Settings, SystemRunner, Text, Tool, Version,
};
use console::style;
use tracing::debug;

const TOOL: &str = "commandant";
const LOG_ENV: &str = "COMMANDANT_LOG";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn current_build() -> Build {
    Version::parse(env!("CARGO_PKG_VERSION"))
        .map(Build::Version)
        .unwrap_or(Build::Development)
}

fn execute_command() -> Command {
    let string = CommandOption::new(
        Text::table(&[
            (Locale::English, "string"),
            (Locale::German, "zeichenkette"),
            (Locale::French, "chaîne"),
        ]),
        Text::table(&[
            (Locale::English, "A string to print."),
            (Locale::German, "Eine auszugebende Zeichenkette."),
            (Locale::French, "Une chaîne à afficher."),
        ]),
        ArgumentType::string(),
    );
    Command::new(
        Text::table(&[
            (Locale::English, "execute"),
            (Locale::German, "ausführen"),
            (Locale::French, "exécuter"),
        ]),
        Text::table(&[
            (Locale::English, "prints the given string."),
            (Locale::German, "gibt die angegebene Zeichenkette aus."),
            (Locale::French, "affiche la chaîne donnée."),
        ]),
    )
    .option(string.clone())
    .handler(move |_, options, output| {
        if let Some(text) = options.value(&string) {
            output.print(text);
        }
        Ok(())
    })
}

fn greet_command() -> Command {
    Command::new(
        Text::table(&[
            (Locale::English, "greet"),
            (Locale::German, "grüßen"),
            (Locale::French, "saluer"),
        ]),
        Text::table(&[
            (Locale::English, "greets someone by name."),
            (Locale::German, "grüßt jemanden mit Namen."),
            (Locale::French, "salue quelqu’un par son nom."),
        ]),
    )
    .argument(ArgumentType::string())
    .handler(|arguments, _, output| {
        let locale = output.locale();
        let name = arguments
            .argument(0, &ArgumentType::string())
            .unwrap_or_else(|| match locale {
                Locale::English => "world".to_string(),
                Locale::German => "Welt".to_string(),
                Locale::French => "le monde".to_string(),
            });
        let greeting = match locale {
            Locale::English => format!("Hello, {name}!"),
            Locale::German => format!("Hallo, {name}!"),
            Locale::French => format!("Bonjour, {name} !"),
        };
        output.print(style(greeting).green().to_string());
        Ok(())
    })
}

fn version_command() -> Command {
    Command::new(
        "version",
        Text::table(&[
            (Locale::English, "displays the version of this tool."),
            (Locale::German, "zeigt die Version dieses Werkzeugs an."),
            (Locale::French, "affiche la version de cet outil."),
        ]),
    )
    .handler(|_, _, output| {
        let build = current_build().describe(output.locale());
        output.print(format!("{TOOL} {build}"));
        Ok(())
    })
}

fn root_command() -> Command {
    Command::new(
        TOOL,
        Text::table(&[
            (Locale::English, "demonstrates localized subcommands."),
            (Locale::German, "führt lokalisierte Unterbefehle vor."),
            (Locale::French, "présente des sous‐commandes localisées."),
        ]),
    )
    .subcommand(execute_command())
    .subcommand(greet_command())
    .subcommand(version_command())
}

fn package(settings: &Settings) -> Option<Package> {
    let url = settings
        .package_url
        .clone()
        .or_else(|| option_env!("CARGO_PKG_REPOSITORY").map(str::to_string))
        .filter(|url| !url.is_empty())?;
    let cache_root = settings
        .cache
        .clone()
        .or_else(|| platform().cache_root(TOOL))?;
    debug!(%url, cache = %cache_root.display(), "version switching enabled");
    let repository = PackageRepository::new(url, Arc::new(SystemRunner), settings);
    Some(Package::new(repository, cache_root))
}

fn fail(error: commandant::Error, locale: Locale) -> ! {
    eprintln!("{}", style(error.describe(locale)).for_stderr().red());
    std::process::exit(error.exit_code());
}

fn main() {
    init_tracing();

    let settings = match Settings::load(TOOL) {
        Ok(settings) => settings,
        Err(error) => fail(error, Locale::from_environment().unwrap_or_default()),
    };
    let locale = settings
        .locale()
        .or_else(Locale::from_environment)
        .unwrap_or_default();

    let mut tool = Tool::new(root_command(), current_build()).with_locale(locale);
    if let Some(package) = package(&settings) {
        tool = tool.with_package(package, &[TOOL]);
    }

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let mut output = Output::streaming(locale);
    if let Err(error) = tool.execute(&tokens, &mut output) {
        fail(error, locale);
    }
}
