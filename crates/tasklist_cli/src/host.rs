//! Line-based terminal host.
//!
//! # Responsibility
//! - Translate typed lines into UI triggers (type, click, Enter, remove).
//! - Render the list and any pending alerts after each trigger.

use std::io::{self, BufRead, Write};
use tasklist_core::{MemoryView, TaskListController, TaskStore, Trigger, ENTER_KEY};

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type text into the input, then press Enter.
    Submit(String),
    /// Optionally type text, then click the add control.
    Add(Option<String>),
    /// Click the remove control of the n-th entry (1-based).
    Remove(usize),
    List,
    Help,
    Quit,
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (trimmed, ""),
        };

        match head {
            "quit" | "exit" if rest.is_empty() => Self::Quit,
            "ls" if rest.is_empty() => Self::List,
            "help" if rest.is_empty() => Self::Help,
            "add" if rest.is_empty() => Self::Add(None),
            "add" => Self::Add(Some(rest.to_string())),
            "rm" => match rest.parse::<usize>() {
                Ok(position) if position > 0 => Self::Remove(position),
                _ => Self::Invalid(format!("usage: rm <n> (1-based), got `{rest}`")),
            },
            _ => Self::Submit(line.to_string()),
        }
    }
}

const HELP: &str = "\
<text>      type text and press Enter
add [text]  type text (optional) and click Add
rm <n>      click Remove on entry n
ls          show the list
quit        exit";

/// Terminal host driving a controller over a headless view.
pub struct TerminalHost<S: TaskStore> {
    controller: TaskListController<S, MemoryView>,
}

impl<S: TaskStore> TerminalHost<S> {
    pub fn start(store: S) -> Self {
        Self {
            controller: TaskListController::start(store, MemoryView::new()),
        }
    }

    pub fn controller(&self) -> &TaskListController<S, MemoryView> {
        &self.controller
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Type a task and press Enter. `help` lists commands.")?;
        self.flush_alerts(out)?;
        self.render(out)?;

        for line in input.lines() {
            let line = line?;
            if !self.execute(Command::parse(&line), out)? {
                break;
            }
        }
        Ok(())
    }

    /// Executes one command. Returns `false` when the host should stop.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::List => self.render(out)?,
            Command::Invalid(message) => writeln!(out, "{message}")?,
            Command::Submit(text) => {
                self.controller.view_mut().set_input(text);
                self.dispatch(Trigger::KeyPressed(ENTER_KEY.to_string()), out)?;
            }
            Command::Add(text) => {
                if let Some(text) = text {
                    self.controller.view_mut().set_input(text);
                }
                self.dispatch(Trigger::AddClicked, out)?;
            }
            Command::Remove(position) => match position
                .checked_sub(1)
                .and_then(|index| self.controller.entries().get(index))
            {
                Some(entry) => {
                    let id = entry.id;
                    self.dispatch(Trigger::RemoveClicked(id), out)?;
                }
                None => writeln!(out, "no task at position {position}")?,
            },
        }
        Ok(true)
    }

    fn dispatch(&mut self, trigger: Trigger, out: &mut impl Write) -> io::Result<()> {
        let result = self.controller.handle(trigger);
        self.flush_alerts(out)?;
        if let Err(err) = result {
            log::debug!("event=trigger module=cli status=rejected error={err}");
            return Ok(());
        }
        self.render(out)
    }

    fn flush_alerts(&mut self, out: &mut impl Write) -> io::Result<()> {
        for alert in self.controller.view_mut().take_alerts() {
            writeln!(out, "! {alert}")?;
        }
        Ok(())
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        if self.controller.is_empty() {
            return writeln!(out, "(no tasks)");
        }
        for (index, text) in self.controller.texts().iter().enumerate() {
            writeln!(out, "{:>3}. {text}  [rm {}]", index + 1, index + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, TerminalHost};
    use tasklist_core::{
        KeyValueStore, KeyValueTaskStore, MemoryKeyValueStore, EMPTY_TASK_WARNING,
    };

    #[test]
    fn parse_maps_lines_to_commands() {
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("  ls "), Command::List);
        assert_eq!(Command::parse("add"), Command::Add(None));
        assert_eq!(
            Command::parse("add Buy milk"),
            Command::Add(Some("Buy milk".to_string()))
        );
        assert_eq!(Command::parse("rm 2"), Command::Remove(2));
        assert!(matches!(Command::parse("rm 0"), Command::Invalid(_)));
        assert!(matches!(Command::parse("rm x"), Command::Invalid(_)));
        assert_eq!(
            Command::parse("Walk the dog"),
            Command::Submit("Walk the dog".to_string())
        );
        assert_eq!(Command::parse("lsd"), Command::Submit("lsd".to_string()));
    }

    #[test]
    fn session_adds_removes_and_warns() {
        let kv = MemoryKeyValueStore::new();
        let mut host = TerminalHost::start(KeyValueTaskStore::new(kv.clone(), "tasks"));
        let input = "Buy milk\nadd Call mom\n   \nrm 1\nquit\nnever reached\n";
        let mut out = Vec::new();

        host.run(input.as_bytes(), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains(&format!("! {EMPTY_TASK_WARNING}")));
        assert_eq!(host.controller().texts(), vec!["Call mom"]);
        assert_eq!(
            kv.get_item("tasks").unwrap().as_deref(),
            Some(r#"["Call mom"]"#)
        );
    }

    #[test]
    fn remove_out_of_range_reports_position() {
        let mut host =
            TerminalHost::start(KeyValueTaskStore::new(MemoryKeyValueStore::new(), "tasks"));
        let mut out = Vec::new();

        assert!(host.execute(Command::Remove(3), &mut out).unwrap());
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("no task at position 3"));
    }
}
