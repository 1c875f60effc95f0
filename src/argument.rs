//! Argument types and the type-erased values they parse into.
//!
//! Declarations are statically typed ([`ArgumentType<T>`]); the parser only
//! sees the erased [`ErasedArgumentType`] and stores a [`Value`]. Reading a
//! value back goes through [`ArgumentValue::from_value`], a checked downcast
//! that yields `None` when the stored variant is not the declared one.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::locale::{Locale, Text};
use crate::version::Build;

/// A parsed argument with its static type erased.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    String(String),
    Integer(i64),
    Path(PathBuf),
    Build(Build),
    Locale(Locale),
}

/// Types that can travel through a [`Value`].
pub trait ArgumentValue: Sized + Clone + Send + Sync + 'static {
    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! argument_value {
    ($ty:ty, $variant:ident) => {
        impl ArgumentValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }
    };
}

argument_value!(bool, Boolean);
argument_value!(String, String);
argument_value!(i64, Integer);
argument_value!(PathBuf, Path);
argument_value!(Build, Build);
argument_value!(Locale, Locale);

type Parser<T> = Arc<dyn Fn(&str) -> Option<T> + Send + Sync>;

pub(crate) const BOOLEAN_IDENTIFIER: &str = "boolean";

/// How to turn one token into a `T`.
pub struct ArgumentType<T> {
    identifier: String,
    name: Text,
    syntax: Text,
    parse: Parser<T>,
    boolean: bool,
}

impl<T> Clone for ArgumentType<T> {
    fn clone(&self) -> Self {
        ArgumentType {
            identifier: self.identifier.clone(),
            name: self.name.clone(),
            syntax: self.syntax.clone(),
            parse: Arc::clone(&self.parse),
            boolean: self.boolean,
        }
    }
}

impl<T> fmt::Debug for ArgumentType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentType")
            .field("identifier", &self.identifier)
            .finish()
    }
}

impl<T: ArgumentValue> ArgumentType<T> {
    /// `identifier` must be stable across locales; it deduplicates types in help.
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<Text>,
        syntax: impl Into<Text>,
        parse: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        ArgumentType {
            identifier: identifier.into(),
            name: name.into(),
            syntax: syntax.into(),
            parse: Arc::new(parse),
            boolean: false,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &Text {
        &self.name
    }

    pub fn syntax(&self) -> &Text {
        &self.syntax
    }

    pub fn parse(&self, token: &str) -> Option<T> {
        (self.parse)(token)
    }
}

impl ArgumentType<bool> {
    /// Flags: presence is the value, so no token is ever parsed.
    pub fn boolean() -> Self {
        ArgumentType {
            identifier: BOOLEAN_IDENTIFIER.to_string(),
            name: Text::table(&[
                (Locale::English, "Boolean"),
                (Locale::German, "Wahrheitswert"),
                (Locale::French, "booléen"),
            ]),
            syntax: Text::fixed(""),
            parse: Arc::new(|_: &str| -> Option<bool> {
                unreachable!("boolean options never consume a token")
            }),
            boolean: true,
        }
    }
}

impl ArgumentType<String> {
    pub fn string() -> Self {
        ArgumentType::new(
            "string",
            Text::table(&[
                (Locale::English, "string"),
                (Locale::German, "Zeichenkette"),
                (Locale::French, "chaîne"),
            ]),
            Text::table(&[
                (Locale::English, "An arbitrary string."),
                (Locale::German, "Eine beliebige Zeichenkette."),
                (Locale::French, "Une chaîne quelconque."),
            ]),
            |token| Some(token.to_string()),
        )
    }

    /// A fixed set of words; the parsed value is the matching word's
    /// fallback-locale form, whichever locale the user typed.
    pub fn enumeration(
        identifier: impl Into<String>,
        name: impl Into<Text>,
        cases: Vec<Text>,
    ) -> Self {
        let listing = cases.clone();
        let syntax = Text::new(move |locale| {
            listing
                .iter()
                .map(|c| c.resolve(locale))
                .collect::<Vec<_>>()
                .join(" | ")
        });
        ArgumentType::new(identifier, name, syntax, move |token| {
            cases
                .iter()
                .find(|c| c.aliases().iter().any(|a| a == token))
                .map(Text::key)
        })
    }
}

impl ArgumentType<i64> {
    pub fn integer() -> Self {
        ArgumentType::new(
            "integer",
            Text::table(&[
                (Locale::English, "integer"),
                (Locale::German, "ganze Zahl"),
                (Locale::French, "entier"),
            ]),
            Text::table(&[
                (Locale::English, "A whole number in decimal digits, optionally signed."),
                (Locale::German, "Eine ganze Zahl in Dezimalziffern, optional mit Vorzeichen."),
                (Locale::French, "Un nombre entier en chiffres décimaux, éventuellement signé."),
            ]),
            |token| token.parse().ok(),
        )
    }
}

impl ArgumentType<PathBuf> {
    pub fn path() -> Self {
        ArgumentType::new(
            "path",
            Text::table(&[
                (Locale::English, "path"),
                (Locale::German, "Pfad"),
                (Locale::French, "chemin"),
            ]),
            Text::table(&[
                (Locale::English, "A file system path, absolute or relative to the working directory."),
                (Locale::German, "Ein Dateisystempfad, absolut oder relativ zum Arbeitsverzeichnis."),
                (Locale::French, "Un chemin, absolu ou relatif au répertoire de travail."),
            ]),
            |token| (!token.is_empty()).then(|| PathBuf::from(token)),
        )
    }
}

impl ArgumentType<Build> {
    pub fn build() -> Self {
        let development = Build::development_name();
        ArgumentType::new(
            "version",
            Text::table(&[
                (Locale::English, "version"),
                (Locale::German, "Version"),
                (Locale::French, "version"),
            ]),
            Text::new(move |locale| {
                let dev = development.resolve(locale);
                match locale {
                    Locale::English => format!("A version number in the form “1.2.3”, or “{dev}” for the latest unreleased state."),
                    Locale::German => format!("Eine Versionsnummer der Form „1.2.3“ oder „{dev}“ für den neuesten unveröffentlichten Stand."),
                    Locale::French => format!("Un numéro de version de la forme « 1.2.3 », ou « {dev} » pour l’état non publié le plus récent."),
                }
            }),
            Build::parse,
        )
    }
}

impl ArgumentType<Locale> {
    pub fn language() -> Self {
        ArgumentType::new(
            "language",
            Text::table(&[
                (Locale::English, "language"),
                (Locale::German, "Sprache"),
                (Locale::French, "langue"),
            ]),
            Text::new(|locale| {
                let known = Locale::ALL
                    .iter()
                    .map(|l| format!("{} ({})", l.code(), l.native_name()))
                    .collect::<Vec<_>>()
                    .join(", ");
                match locale {
                    Locale::English => format!("A language code or name: {known}."),
                    Locale::German => format!("Ein Sprachcode oder Sprachname: {known}."),
                    Locale::French => format!("Un code ou nom de langue : {known}."),
                }
            }),
            Locale::from_code,
        )
    }
}

/// The parser's view of an [`ArgumentType`].
pub(crate) trait ErasedArgumentType: Send + Sync {
    fn identifier(&self) -> &str;
    fn name(&self) -> &Text;
    fn syntax(&self) -> &Text;
    fn is_boolean(&self) -> bool;
    fn parse_erased(&self, token: &str) -> Option<Value>;
}

impl<T: ArgumentValue> ErasedArgumentType for ArgumentType<T> {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn name(&self) -> &Text {
        &self.name
    }

    fn syntax(&self) -> &Text {
        &self.syntax
    }

    fn is_boolean(&self) -> bool {
        self.boolean
    }

    fn parse_erased(&self, token: &str) -> Option<Value> {
        self.parse(token).map(ArgumentValue::into_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_downcast() {
        let v = 42i64.into_value();
        assert_eq!(i64::from_value(&v), Some(42));
        assert_eq!(String::from_value(&v), None);
        assert_eq!(bool::from_value(&Value::Boolean(true)), Some(true));
    }

    #[test]
    fn builtin_parsers() {
        assert_eq!(ArgumentType::integer().parse("-12"), Some(-12));
        assert_eq!(ArgumentType::integer().parse("twelve"), None);
        assert_eq!(ArgumentType::path().parse(""), None);
        assert_eq!(ArgumentType::language().parse("fr"), Some(Locale::French));
        assert_eq!(ArgumentType::build().parse("1.2.C"), None);
        assert!(ArgumentType::boolean().is_boolean());
        assert!(!ArgumentType::string().is_boolean());
    }

    #[test]
    #[should_panic(expected = "boolean options never consume a token")]
    fn boolean_parse_is_a_contract_violation() {
        ArgumentType::boolean().parse("true");
    }

    #[test]
    fn enumeration_matches_any_locale() {
        let style = ArgumentType::enumeration(
            "style",
            "style",
            vec![
                Text::table(&[(Locale::English, "formal"), (Locale::German, "förmlich")]),
                Text::table(&[(Locale::English, "casual"), (Locale::German, "locker")]),
            ],
        );
        assert_eq!(style.parse("förmlich").as_deref(), Some("formal"));
        assert_eq!(style.parse("formlich").as_deref(), Some("formal"));
        assert_eq!(style.parse("locker").as_deref(), Some("casual"));
        assert_eq!(style.parse("loud"), None);
        assert_eq!(style.syntax().resolve(Locale::German), "förmlich | locker");
    }
}
