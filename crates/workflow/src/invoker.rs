//! Command execution with LIFO undo history.

use crate::command::OrderCommand;
use crate::error::Result;
use crate::observer::OrderSubject;
use crate::order_book::OrderBook;

/// Runs commands and keeps the successful ones for undo.
///
/// History is a stack: [`undo_last`](Self::undo_last) reverts the most
/// recently executed command. There is no redo.
#[derive(Default)]
pub struct CommandInvoker {
    history: Vec<Box<dyn OrderCommand>>,
}

impl CommandInvoker {
    /// Creates an invoker with empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `command` against its order and records it.
    ///
    /// A command that fails is not recorded.
    #[tracing::instrument(skip_all, fields(command = command.name(), order_id = %command.order_id()))]
    pub fn execute_command(
        &mut self,
        mut command: Box<dyn OrderCommand>,
        orders: &mut OrderBook,
        subject: &OrderSubject,
    ) -> Result<()> {
        let order = orders.get_mut(command.order_id())?;
        command.execute(order, subject)?;

        metrics::counter!("order_commands_executed_total", "command" => command.name())
            .increment(1);
        self.history.push(command);
        Ok(())
    }

    /// Undoes the most recently executed command.
    ///
    /// Returns the name of the undone command, or `None` when history is
    /// empty.
    #[tracing::instrument(skip_all)]
    pub fn undo_last(
        &mut self,
        orders: &mut OrderBook,
        subject: &OrderSubject,
    ) -> Result<Option<&'static str>> {
        let Some(mut command) = self.history.pop() else {
            tracing::debug!("nothing to undo");
            return Ok(None);
        };

        let order = match orders.get_mut(command.order_id()) {
            Ok(order) => order,
            Err(e) => {
                self.history.push(command);
                return Err(e);
            }
        };
        command.undo(order, subject)?;

        metrics::counter!("order_commands_undone_total", "command" => command.name())
            .increment(1);
        Ok(Some(command.name()))
    }

    /// Returns the number of commands that can be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl std::fmt::Debug for CommandInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.history.iter().map(|c| c.name()).collect();
        f.debug_struct("CommandInvoker")
            .field("history", &names)
            .finish()
    }
}
