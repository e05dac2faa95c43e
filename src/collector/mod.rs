//! Answer Collector
//!
//! Runs the fixed, ordered sequence of operator prompts, applies defaults
//! and light validation, and produces the immutable [`ProjectConfig`].
//!
//! Every prompt has a declared default; a malformed answer is never
//! retried. An unrecognized yes/no answer counts as "no", and an empty
//! required field (the project name) is accepted as given — the collector
//! itself has no failure mode beyond I/O on the input stream.

use std::io::BufRead;
use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::constants::defaults;
use crate::types::{ProjectConfig, Result, ServerPath, StateLibrary};

pub mod stack;

pub use stack::{StackSelection, parse_stack};

/// Ask a yes/no question and read one answer. Only a single `y` (either
/// case) counts as yes; anything else, including a blank answer, is no.
pub fn confirm<R: BufRead>(input: &mut R, out: &Output, prompt: &str) -> Result<bool> {
    out.prompt(prompt);
    let answer = read_line(input)?;
    Ok(matches!(answer.as_str(), "y" | "Y"))
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Collects the prompt sequence from a line-based input source.
///
/// Generic over [`BufRead`] so tests can feed scripted answers through a
/// `Cursor` instead of stdin.
pub struct Collector<'a, R: BufRead> {
    input: &'a mut R,
    out: &'a Output,
    workspace_default: PathBuf,
}

impl<'a, R: BufRead> Collector<'a, R> {
    pub fn new(input: &'a mut R, out: &'a Output, workspace_default: PathBuf) -> Self {
        Self {
            input,
            out,
            workspace_default,
        }
    }

    /// Run the full prompt sequence and assemble the configuration record.
    pub fn collect(mut self) -> Result<ProjectConfig> {
        let project_name = self.ask("Project name:")?;
        if project_name.is_empty() {
            self.out
                .warning("No project name given; continuing with an empty name.");
        }

        let server_answer =
            self.ask("FileMaker file path or URL (blank to use the repo default):")?;
        let (server_path, file_name, script_name) = if server_answer.is_empty() {
            // Sentinel: file and script names take their defaults unasked
            (
                ServerPath::UseDefault,
                defaults::FILE_NAME.to_string(),
                defaults::SCRIPT_NAME.to_string(),
            )
        } else {
            let file_name =
                self.ask_with_default("FileMaker file name (.fmp12):", defaults::FILE_NAME)?;
            let script_name =
                self.ask_with_default("Upload script name:", defaults::SCRIPT_NAME)?;
            (ServerPath::Explicit(server_answer), file_name, script_name)
        };

        let widget_intention = self.ask("What is the widget's intended purpose?")?;

        let style_paths = if self.confirm("Do you have style images or example CSS? [y/N]")? {
            let answer = self.ask("Style/example paths (space separated):")?;
            answer.split_whitespace().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        let dir_prompt = format!(
            "Base project directory [{}]:",
            self.workspace_default.display()
        );
        let dir_answer = self.ask(&dir_prompt)?;
        let project_dir = if dir_answer.is_empty() {
            self.workspace_default.clone()
        } else {
            PathBuf::from(dir_answer)
        };

        let stack_answer =
            self.ask("Tech stack (1=CommonJS, 2=React, 3=Next.js, comma separated):")?;
        let selection = parse_stack(&stack_answer);
        for token in &selection.unknown {
            self.out
                .warning(&format!("Ignoring unrecognized tech stack choice '{token}'"));
        }

        let use_typescript = self.confirm("Use TypeScript? [y/N]")?;

        let state_library = if self.confirm("Add a state management library? [y/N]")? {
            let name = self.ask("State library (e.g. Redux, MobX, Zustand):")?;
            if name.is_empty() {
                StateLibrary::None
            } else {
                StateLibrary::Named(name)
            }
        } else {
            StateLibrary::None
        };

        Ok(ProjectConfig {
            project_name,
            server_path,
            file_name,
            script_name,
            widget_intention,
            style_paths,
            project_dir,
            tech_stack: selection.stacks,
            use_typescript,
            state_library,
        })
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.out.prompt(prompt);
        read_line(self.input)
    }

    fn ask_with_default(&mut self, prompt: &str, default: &str) -> Result<String> {
        let answer = self.ask(prompt)?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        confirm(self.input, self.out, prompt)
    }
}
