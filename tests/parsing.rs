use commandant::{
    ArgumentType, Build, Command, CommandOption, Error, Locale, Text, UsageFailure, Version,
};

fn tokens(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn tree() -> Command {
    let string = CommandOption::new(
        Text::table(&[(Locale::English, "string"), (Locale::German, "zeichenkette")]),
        "A string to print.",
        ArgumentType::string(),
    );
    let shout = CommandOption::flag("shout", "Prints in capitals.");
    Command::new("tool", "Tests parsing.").subcommand(
        Command::new(
            Text::table(&[(Locale::English, "execute"), (Locale::German, "ausführen")]),
            "Prints its option.",
        )
        .option(string.clone())
        .option(shout.clone())
        .handler(move |_, options, output| {
            let text = options.value(&string).unwrap_or_default();
            if options.flag(&shout) {
                output.write(text.to_uppercase());
            } else {
                output.write(text);
            }
            Ok(())
        }),
    )
}

#[test]
fn option_value_reaches_the_handler() {
    let printed = tree()
        .execute(&tokens(&["execute", "•string", "hi"]), Locale::English)
        .unwrap();
    assert_eq!(printed, "hi");
    let shouted = tree()
        .execute(&tokens(&["execute", "--shout", "--string", "hi"]), Locale::English)
        .unwrap();
    assert_eq!(shouted, "HI");
}

#[test]
fn localized_and_folded_names_are_accepted() {
    for command in ["ausführen", "ausfuhren"] {
        let printed = tree()
            .execute(&tokens(&[command, "•zeichenkette", "hallo"]), Locale::English)
            .unwrap();
        assert_eq!(printed, "hallo");
    }
}

#[test]
fn missing_option_argument_names_the_option() {
    let error = tree()
        .execute(&tokens(&["execute", "•string"]), Locale::English)
        .unwrap_err();
    assert!(matches!(
        error.usage_failure(),
        Some(UsageFailure::MissingOptionArgument { .. })
    ));
    let message = error.describe(Locale::English);
    assert!(message.contains("•string"), "{message}");
    assert!(error.describe(Locale::German).contains("•zeichenkette"));
    assert_eq!(error.exit_code(), commandant::GENERAL_ERROR);
}

#[test]
fn unknown_token_is_an_unexpected_argument() {
    let error = tree()
        .execute(&tokens(&["frobnicate"]), Locale::English)
        .unwrap_err();
    match error {
        Error::Usage(usage) => {
            assert!(matches!(
                usage.failure(),
                UsageFailure::UnexpectedArgument { token } if token == "frobnicate"
            ));
            assert_eq!(usage.command_path(Locale::English), "tool");
            assert!(usage.describe(Locale::English).contains("frobnicate"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn help_annotates_only_typed_options() {
    let help = tree()
        .execute(&tokens(&["execute", "help", "•no-color"]), Locale::English)
        .unwrap();
    assert!(!help.contains('\u{1b}'));
    assert!(help.contains("•string [string]"), "{help}");
    assert!(help.contains("•shout  Prints in capitals."), "{help}");
    assert!(!help.contains("•shout ["), "{help}");
    assert!(help.contains("•no-color  "), "{help}");
}

#[test]
fn language_option_switches_help_locale() {
    let help = tree()
        .execute(&tokens(&["help", "•language", "fr", "•no-color"]), Locale::English)
        .unwrap();
    assert!(help.contains("Sous‐commandes"), "{help}");
    assert!(help.contains("aide"), "{help}");
}

#[test]
fn builds_compare_by_identity() {
    let one = Build::Version(Version::new(1, 2, 3));
    let two = Build::Version(Version::new(1, 2, 4));
    assert_ne!(one, two);
    assert_eq!(one, Build::Version(Version::new(1, 2, 3)));
    assert_eq!(Build::Development, Build::Development);
    assert_ne!(Build::Development, one);
}

#[test]
fn versions_and_compatible_ranges() {
    assert_eq!(Version::parse("1.2.3").unwrap().to_string(), "1.2.3");
    assert_eq!(Version::parse("1.2").unwrap().to_string(), "1.2.0");
    assert_eq!(Version::parse(""), None);
    assert_eq!(Version::parse("1.2.C"), None);
    assert_eq!(
        Version::new(1, 2, 3).compatible_versions(),
        Version::new(1, 2, 3)..Version::new(2, 0, 0)
    );
    assert_eq!(
        Version::new(0, 1, 2).compatible_versions(),
        Version::new(0, 1, 2)..Version::new(0, 2, 0)
    );
}
