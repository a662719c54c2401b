//! Diagnostic rendering of lists.
//!
//! Renders a list as `[v(id) -> v(id) -> ...]`. The printer remembers every
//! node identity it has written; if it reaches one again it stops and
//! reports [`ListError::CycleDetected`] with the text produced so far.

use std::collections::HashSet;
use std::fmt::Display;

use crate::arena::NodeArena;
use crate::error::{ListError, ListResult};
use crate::node::NodeId;

const SEPARATOR: &str = " -> ";

/// How each node is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderStyle {
    /// `value(#id)`.
    #[default]
    WithIdentity,
    /// `value` only.
    ValuesOnly,
}

impl<T: Display> NodeArena<T> {
    /// Render the list at `head` with node identities.
    pub fn render(&self, head: Option<NodeId>) -> ListResult<String> {
        self.render_with(head, RenderStyle::WithIdentity)
    }

    /// Render the list at `head` in the given style.
    ///
    /// An empty list renders as `[]`. A stale link ends the output early
    /// with an error, as does a cycle.
    pub fn render_with(&self, head: Option<NodeId>, style: RenderStyle) -> ListResult<String> {
        let mut out = String::from("[");
        let mut visited = HashSet::new();
        let mut cursor = head;
        let mut first = true;

        while let Some(id) = cursor {
            if !visited.insert(id) {
                out.push(']');
                return Err(ListError::CycleDetected {
                    node: id,
                    partial: out,
                });
            }
            let node = self.get(id)?;
            if !first {
                out.push_str(SEPARATOR);
            }
            first = false;
            let token = match style {
                RenderStyle::WithIdentity => format!("{}({})", node.value, id),
                RenderStyle::ValuesOnly => node.value.to_string(),
            };
            out.push_str(&token);
            cursor = node.next;
        }

        out.push(']');
        Ok(out)
    }
}
