use crate::error::{EdistError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Something that lets the user edit a file and returns once they're done.
///
/// The production implementation is [`ExternalEditor`]. Closures implement
/// the trait too, which is how tests simulate an edit.
pub trait Editor {
    fn open(&self, path: &Path) -> Result<()>;
}

impl<F> Editor for F
where
    F: Fn(&Path) -> Result<()>,
{
    fn open(&self, path: &Path) -> Result<()> {
        self(path)
    }
}

/// A terminal editor run as a child process that inherits our stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEditor {
    program: String,
    args: Vec<String>,
}

impl ExternalEditor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Parses an editor command line such as `"nvim -u NONE"`. The first word
    /// is the program, resolved through `$PATH`; the rest are passed before
    /// the file path.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Editor for ExternalEditor {
    /// Blocks until the editor exits. The caller must have released the
    /// terminal first, since the editor draws on it directly.
    fn open(&self, path: &Path) -> Result<()> {
        tracing::debug!(editor = %self.program, path = %path.display(), "launching editor");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| EdistError::EditorLaunch {
                editor: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(EdistError::EditorExit {
                editor: self.program.clone(),
                status,
            });
        }

        Ok(())
    }
}
