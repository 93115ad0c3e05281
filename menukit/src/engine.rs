//! Navigation and dispatch state machine.
//!
//! [`MenuEngine`] drives one interactive session over a [`MenuNode`] tree:
//! it renders the current submenu as a numbered list, reads one line of
//! input per iteration, and either descends into a submenu, pops back up,
//! dispatches a leaf action, or terminates. The session is strictly
//! synchronous; the single blocking point is the line read.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use log::debug;

use crate::{error::MenuError, node::MenuNode, registry::ActionRegistry};

/// Result of classifying one trimmed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    /// 1-based selection of a displayed option.
    Select(usize),
    Back,
    Exit,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Running,
    Terminated,
}

/// Interactive menu session over a read-only menu tree.
///
/// The engine owns a navigation stack of tree nodes (root always at the
/// bottom, top always interior) and a title history of equal depth. Both
/// are pushed and popped together. Input and output are generic so
/// sessions can be scripted; [`MenuEngine::run`] loops until the user
/// issues the exit command.
pub struct MenuEngine<'a, R, W> {
    root: &'a MenuNode,
    stack: Vec<&'a MenuNode>,
    titles: Vec<String>,
    registry: &'a mut ActionRegistry,
    input: R,
    output: W,
    state: EngineState,
}

impl<'a, R: BufRead, W: Write> MenuEngine<'a, R, W> {
    /// Create a session positioned at `root`.
    ///
    /// `title` is the heading shown for the root menu; deeper menus are
    /// titled by the label under which they were reached.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::InvalidNode`] when `root` is an action leaf.
    pub fn new(
        root: &'a MenuNode,
        title: impl Into<String>,
        registry: &'a mut ActionRegistry,
        input: R,
        output: W,
    ) -> Result<Self, MenuError> {
        root.children()?;
        Ok(Self {
            root,
            stack: vec![root],
            titles: vec![title.into()],
            registry,
            input,
            output,
            state: EngineState::Running,
        })
    }

    /// Run the session until the user exits.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures, end of the input stream, and any error
    /// returned by a dispatched action. Recoverable conditions (bad entry,
    /// back at the root, unregistered action) are reported inline and
    /// never end the loop.
    pub fn run(&mut self) -> anyhow::Result<()> {
        while self.state == EngineState::Running {
            self.render()?;
            let line = self.read_line()?;
            self.handle(line.trim())?;
        }
        Ok(())
    }

    /// Current navigation depth; 1 means the root menu.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The menu node currently displayed.
    pub fn current(&self) -> &MenuNode {
        self.top()
    }

    /// Title of the menu currently displayed.
    pub fn title(&self) -> &str {
        self.titles.last().map(String::as_str).unwrap_or_default()
    }

    fn top(&self) -> &'a MenuNode {
        self.stack.last().copied().unwrap_or(self.root)
    }

    fn handle(&mut self, line: &str) -> anyhow::Result<()> {
        let options = self.top().children()?;

        match classify(line, options.len()) {
            Choice::Invalid => {
                writeln!(self.output, "{}", "Bad entry, try again.".red().bold())?;
            }
            Choice::Back => self.go_back()?,
            Choice::Exit => {
                writeln!(self.output, "{}", "Bye.".red().bold())?;
                self.state = EngineState::Terminated;
            }
            Choice::Select(index) => {
                let (label, node) = &options[index - 1];
                match node {
                    MenuNode::Interior(_) => {
                        debug!("entering submenu `{label}`");
                        self.stack.push(node);
                        self.titles.push(label.clone());
                    }
                    MenuNode::Leaf(action_id) => self.dispatch(label, action_id)?,
                }
            }
        }
        Ok(())
    }

    fn go_back(&mut self) -> io::Result<()> {
        if self.stack.len() > 1 {
            self.stack.pop();
            self.titles.pop();
        } else {
            writeln!(self.output, "{}", "You are at the main menu.".green().bold())?;
        }
        Ok(())
    }

    fn dispatch(&mut self, label: &str, action_id: &str) -> anyhow::Result<()> {
        match self.registry.get_mut(action_id) {
            Some(action) => {
                debug!("dispatching action `{action_id}`");
                action()
            }
            None => {
                // Not implemented yet, not an error: the menu may reference
                // actions ahead of their implementation.
                writeln!(
                    self.output,
                    "{} {}",
                    "Performing action:".green().bold(),
                    label.cyan().bold()
                )?;
                Ok(())
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let options = self.top().children().unwrap_or(&[]);
        let title = self.titles.last().map(String::as_str).unwrap_or_default();

        writeln!(self.output)?;
        writeln!(self.output, "{}", format!("──── {title} ────").cyan().bold())?;
        if options.is_empty() {
            writeln!(self.output, "{}", "Menu is empty".yellow().bold())?;
        }
        for (number, (label, _)) in options.iter().enumerate() {
            writeln!(
                self.output,
                "{} {}",
                format!("{}.", number + 1).yellow().bold(),
                label.cyan().bold()
            )?;
        }
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{} | {}",
            "[b] - back".red().bold(),
            "[q] - exit".red().bold()
        )?;
        write!(self.output, "{}", ">>> ".purple().bold())?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            // Mirrors an interactive EOF: the session cannot continue, so
            // the caller decides what to do with it.
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed before exit",
            ));
        }
        Ok(line)
    }
}

/// Classify one trimmed line of input against `option_count` options.
///
/// Reserved commands are letter-coded (`b`/`q`, case-insensitive) and never
/// collide with the numeric range. A number is a selection only when every
/// character is an ASCII digit and the value falls in `1..=option_count`;
/// anything else is invalid.
fn classify(input: &str, option_count: usize) -> Choice {
    match input.to_ascii_lowercase().as_str() {
        "b" => return Choice::Back,
        "q" => return Choice::Exit,
        _ => {}
    }

    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Choice::Invalid;
    }
    match input.parse::<usize>() {
        Ok(index) if (1..=option_count).contains(&index) => Choice::Select(index),
        _ => Choice::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::MenuNode;
    use serde_json::json;
    use std::{
        cell::Cell,
        io::Cursor,
        rc::Rc,
    };

    fn sample_tree() -> MenuNode {
        MenuNode::build(&json!({
            "Work": { "Study": "learn_x" },
            "Rest": "relax",
        }))
        .unwrap()
    }

    fn engine<'a>(
        tree: &'a MenuNode,
        registry: &'a mut ActionRegistry,
        script: &str,
    ) -> MenuEngine<'a, Cursor<String>, Vec<u8>> {
        colored::control::set_override(false);
        MenuEngine::new(
            tree,
            "Main",
            registry,
            Cursor::new(script.to_string()),
            Vec::new(),
        )
        .unwrap()
    }

    fn output(engine: &MenuEngine<'_, Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(engine.output.clone()).unwrap()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("1", 3), Choice::Select(1));
        assert_eq!(classify("3", 3), Choice::Select(3));
        assert_eq!(classify("01", 3), Choice::Select(1));
        assert_eq!(classify("4", 3), Choice::Invalid);
        assert_eq!(classify("0", 3), Choice::Invalid);
        assert_eq!(classify("+1", 3), Choice::Invalid);
        assert_eq!(classify("-1", 3), Choice::Invalid);
        assert_eq!(classify("", 3), Choice::Invalid);
        assert_eq!(classify("abc", 3), Choice::Invalid);
        assert_eq!(classify("1", 0), Choice::Invalid);
        assert_eq!(classify("99999999999999999999999", 3), Choice::Invalid);
        assert_eq!(classify("b", 3), Choice::Back);
        assert_eq!(classify("B", 0), Choice::Back);
        assert_eq!(classify("q", 3), Choice::Exit);
        assert_eq!(classify("Q", 0), Choice::Exit);
    }

    #[test]
    fn test_root_must_be_interior() {
        let leaf = MenuNode::Leaf("relax".into());
        let mut registry = ActionRegistry::new();
        let result = MenuEngine::new(
            &leaf,
            "Main",
            &mut registry,
            Cursor::new(String::new()),
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_scenario_a_leaf_without_action_is_a_stub() {
        let tree = sample_tree();
        let mut registry = ActionRegistry::new();
        let mut engine = engine(&tree, &mut registry, "");

        engine.handle("1").unwrap();
        assert_eq!(engine.depth(), 2);
        assert_eq!(engine.title(), "Work");

        engine.handle("1").unwrap();
        assert_eq!(engine.depth(), 2);
        assert!(output(&engine).contains("Performing action: Study"));
    }

    #[test]
    fn test_scenario_b_back_pops_one_level() {
        let tree = sample_tree();
        let mut registry = ActionRegistry::new();
        let mut engine = engine(&tree, &mut registry, "");

        engine.handle("1").unwrap();
        engine.handle("b").unwrap();
        assert_eq!(engine.depth(), 1);
        assert_eq!(engine.title(), "Main");
        assert_eq!(engine.current(), &tree);
    }

    #[test]
    fn test_scenario_c_empty_menu() {
        let tree = MenuNode::build(&json!({})).unwrap();
        let mut registry = ActionRegistry::new();
        let mut engine = engine(&tree, &mut registry, "1\nq\n");

        engine.run().unwrap();
        let out = output(&engine);
        assert!(out.contains("Menu is empty"));
        assert!(out.contains("Bad entry"));
        assert_eq!(engine.depth(), 1);
    }

    #[test]
    fn test_scenario_d_registered_action_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);

        let tree = sample_tree();
        let mut registry = ActionRegistry::new();
        registry.register("relax", move || {
            counter.set(counter.get() + 1);
            Ok(())
        });
        let mut engine = engine(&tree, &mut registry, "2\nq\n");

        engine.run().unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(engine.depth(), 1);
    }

    #[test]
    fn test_scenario_e_exit_terminates_at_any_depth() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);

        let tree = sample_tree();
        let mut registry = ActionRegistry::new();
        registry.register("relax", move || {
            counter.set(counter.get() + 1);
            Ok(())
        });
        // Descend, then exit; the trailing selections must never run.
        let mut engine = engine(&tree, &mut registry, "1\nq\nb\n2\n");

        engine.run().unwrap();
        assert_eq!(engine.depth(), 2);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_back_at_root_is_idempotent() {
        let tree = sample_tree();
        let mut registry = ActionRegistry::new();
        let mut engine = engine(&tree, &mut registry, "");

        for _ in 0..4 {
            engine.handle("b").unwrap();
            assert_eq!(engine.depth(), 1);
        }
        assert!(output(&engine).contains("You are at the main menu."));
    }

    #[test]
    fn test_invalid_inputs_leave_state_unchanged() {
        let tree = sample_tree();
        let mut registry = ActionRegistry::new();
        let mut engine = engine(&tree, &mut registry, "");

        for bad in ["", "0", "3", "work", "1.5", " "] {
            engine.handle(bad.trim()).unwrap();
            assert_eq!(engine.depth(), 1);
            assert_eq!(engine.title(), "Main");
        }
        assert!(output(&engine).contains("Bad entry, try again."));
    }

    #[test]
    fn test_titles_mirror_the_stack() {
        let tree = MenuNode::build(&json!({
            "Work": { "Deep": { "Deeper": "dig" } },
        }))
        .unwrap();
        let mut registry = ActionRegistry::new();
        let mut engine = engine(&tree, &mut registry, "");

        engine.handle("1").unwrap();
        engine.handle("1").unwrap();
        assert_eq!(engine.depth(), 3);
        assert_eq!(engine.title(), "Deep");
        engine.handle("b").unwrap();
        assert_eq!(engine.title(), "Work");
    }

    #[test]
    fn test_action_failure_propagates() {
        let tree = sample_tree();
        let mut registry = ActionRegistry::new();
        registry.register("relax", || anyhow::bail!("disk on fire"));
        let mut engine = engine(&tree, &mut registry, "2\n");

        let err = engine.run().unwrap_err();
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_eof_before_exit_is_an_error() {
        let tree = sample_tree();
        let mut registry = ActionRegistry::new();
        let mut engine = engine(&tree, &mut registry, "1\n");

        assert!(engine.run().is_err());
    }

    #[test]
    fn test_full_session_renders_numbered_options() {
        let tree = sample_tree();
        let mut registry = ActionRegistry::new();
        let mut engine = engine(&tree, &mut registry, "q\n");

        engine.run().unwrap();
        let out = output(&engine);
        assert!(out.contains("──── Main ────"));
        assert!(out.contains("1. Work"));
        assert!(out.contains("2. Rest"));
        assert!(out.contains("[b] - back"));
        assert!(out.contains("[q] - exit"));
        assert!(out.contains("Bye."));
    }
}
