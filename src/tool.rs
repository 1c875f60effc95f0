//! A complete command-line tool: a command tree plus the build it was
//! compiled as, optionally able to run other versions of itself.

use tracing::{debug, info};

use crate::command::Command;
use crate::dispatch::{self, Context};
use crate::error::Result;
use crate::locale::Locale;
use crate::option::{strip_marker, ErasedOption, USE_VERSION};
use crate::output::Output;
use crate::package::Package;
use crate::platform::platform;
use crate::version::Build;

#[derive(Debug)]
pub struct Tool {
    root: Command,
    build: Build,
    package: Option<Package>,
    executables: Vec<String>,
    locale: Locale,
}

impl Tool {
    pub fn new(root: Command, build: Build) -> Self {
        Tool {
            root,
            build,
            package: None,
            executables: Vec::new(),
            locale: Locale::from_environment().unwrap_or_default(),
        }
    }

    /// Enables `use-version`. `executables` are the binary names a build of
    /// the package produces, tried in order.
    pub fn with_package(mut self, package: Package, executables: &[&str]) -> Self {
        self.package = Some(package);
        self.executables = executables.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn root(&self) -> &Command {
        &self.root
    }

    pub fn build(&self) -> Build {
        self.build
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Finds a `use-version` option and its build anywhere in `tokens`,
    /// returning the option's index.
    pub fn requested_build(&self, tokens: &[String]) -> Option<(usize, Build)> {
        self.package.as_ref()?;
        let aliases = ErasedOption::aliases(&*USE_VERSION);
        tokens.windows(2).enumerate().find_map(|(index, pair)| {
            let name = strip_marker(&pair[0])?;
            if !aliases.iter().any(|alias| alias == name) {
                return None;
            }
            Build::parse(&pair[1]).map(|build| (index, build))
        })
    }

    /// Runs the tool with streaming or capturing `output` and returns what
    /// was printed.
    pub fn execute(&self, tokens: &[String], output: &mut Output) -> Result<String> {
        if let (Some(package), Some((index, build))) =
            (self.package.as_ref(), self.requested_build(tokens))
        {
            if build != self.build {
                info!(current = %self.build, requested = %build, "switching version");
                let remaining: Vec<String> = tokens[..index]
                    .iter()
                    .chain(&tokens[index + 2..])
                    .cloned()
                    .collect();
                let candidates: Vec<String> = self
                    .executables
                    .iter()
                    .flat_map(|name| platform().candidate_executable_names(name))
                    .collect();
                return package.execute(&build, &candidates, &remaining, output);
            }
            debug!(%build, "requested build is the current one");
        }

        let start = output.captured().len();
        let mut context = Context::new(self.package.is_some());
        dispatch::dispatch(&self.root, tokens, &mut context, output)?;
        Ok(output.captured()[start..].to_string())
    }

    /// Runs the tool, capturing output in the tool's locale.
    pub fn run(&self, tokens: &[String]) -> Result<String> {
        let mut output = Output::capturing(self.locale);
        self.execute(tokens, &mut output)
    }
}
