//! Compiler and archiver command templates.
//!
//! A template is a program plus an argument vector. Placeholders are
//! substituted inside each argument independently:
//!
//! | Placeholder | Value |
//! |---|---|
//! | `{root}` | installation root, forward slashes |
//! | `{source}` | source file being compiled |
//! | `{object}` | object file being produced |
//! | `{output}` | packed library |
//! | `{objects}` | as a whole argument only: one argument per object file |

use std::path::Path;

use avz_tools::Invocation;
use serde::{Deserialize, Serialize};

const OBJECTS_PLACEHOLDER: &str = "{objects}";

/// Program and argument templates for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTemplate {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandTemplate {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Substitute placeholders and build the invocation.
    pub fn expand(&self, values: &Placeholders) -> Invocation {
        let mut invocation = Invocation::new(values.substitute(&self.program));
        for arg in &self.args {
            if arg == OBJECTS_PLACEHOLDER {
                invocation = invocation.args(values.objects.iter().cloned());
            } else {
                invocation = invocation.arg(values.substitute(arg));
            }
        }
        invocation
    }
}

/// Values substituted into a [`CommandTemplate`].
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    pub root: String,
    pub source: String,
    pub object: String,
    pub output: String,
    pub objects: Vec<String>,
}

impl Placeholders {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn compile(mut self, source: &Path, object: &Path) -> Self {
        self.source = source.to_string_lossy().into_owned();
        self.object = object.to_string_lossy().into_owned();
        self
    }

    pub fn pack<'a>(mut self, output: &Path, objects: impl IntoIterator<Item = &'a Path>) -> Self {
        self.output = output.to_string_lossy().into_owned();
        self.objects = objects
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        self
    }

    fn substitute(&self, template: &str) -> String {
        template
            .replace("{root}", &self.root)
            .replace("{source}", &self.source)
            .replace("{object}", &self.object)
            .replace("{output}", &self.output)
    }
}

/// Compile and pack commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub compile: CommandTemplate,
    pub pack: CommandTemplate,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            compile: CommandTemplate::new(
                "{root}/MinGW/bin/g++",
                [
                    "-m32",
                    "-static",
                    "-std=c++2b",
                    "-fexperimental-library",
                    "-Werror=return-type",
                    "-I",
                    "{root}/inc",
                    "-c",
                    "{source}",
                    "-o",
                    "{object}",
                ],
            ),
            pack: CommandTemplate::new("{root}/MinGW/bin/ar", ["rcs", "{output}", OBJECTS_PLACEHOLDER]),
        }
    }
}
