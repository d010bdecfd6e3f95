//! Debug and log metadata carried by a constraint system

use r1cs_fields::FieldV;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::panic::Location;

use super::{LinearExpression, WireShift};

/// A message with `{}` placeholders, filled with the values of expressions at solve time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// `file:line` of the call that created the entry
    pub location: String,
    /// The message
    pub format: String,
    /// One expression per placeholder
    pub to_resolve: Vec<LinearExpression>,
}

impl LogEntry {
    pub(crate) fn new(
        location: &Location<'_>,
        format: &str,
        to_resolve: Vec<LinearExpression>,
    ) -> Self {
        LogEntry {
            location: format!("{}:{}", location.file(), location.line()),
            format: format.into(),
            to_resolve,
        }
    }

    fn shifted(&self, shift: &WireShift) -> Self {
        LogEntry {
            location: self.location.clone(),
            format: self.format.clone(),
            to_resolve: self.to_resolve.iter().map(|e| e.shifted(shift)).collect(),
        }
    }

    /// Fill the placeholders using `eval`; an expression `eval` cannot compute prints as
    /// `<unsolved>`. Placeholders without an expression are left as they are.
    pub fn render(&self, mut eval: impl FnMut(&LinearExpression) -> Option<FieldV>) -> String {
        let mut out = String::with_capacity(self.format.len());
        let mut args = self.to_resolve.iter();
        let mut pieces = self.format.split("{}").peekable();
        while let Some(piece) = pieces.next() {
            out.push_str(piece);
            if pieces.peek().is_some() {
                match args.next() {
                    Some(e) => match eval(e) {
                        Some(v) => out.push_str(&v.i().to_string()),
                        None => out.push_str("<unsolved>"),
                    },
                    None => out.push_str("{}"),
                }
            }
        }
        out
    }
}

/// Index of a debug entry in [DebugData]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DebugInfoId(usize);

/// Log entries, and debug entries attached to constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugData {
    logs: Vec<LogEntry>,
    debug_info: Vec<LogEntry>,
    constraint_debug: BTreeMap<usize, DebugInfoId>,
}

impl DebugData {
    pub(crate) fn add_log(&mut self, e: LogEntry) {
        self.logs.push(e);
    }

    pub(crate) fn add_debug_info(&mut self, e: LogEntry) -> DebugInfoId {
        self.debug_info.push(e);
        DebugInfoId(self.debug_info.len() - 1)
    }

    pub(crate) fn attach(&mut self, constraint: usize, id: DebugInfoId) {
        assert!(id.0 < self.debug_info.len(), "Unknown debug info {:?}", id);
        self.constraint_debug.insert(constraint, id);
    }

    /// Log entries, in creation order
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// A debug entry
    pub fn debug_info(&self, id: DebugInfoId) -> Option<&LogEntry> {
        self.debug_info.get(id.0)
    }

    /// The debug entry attached to a constraint
    pub fn for_constraint(&self, constraint: usize) -> Option<&LogEntry> {
        self.constraint_debug
            .get(&constraint)
            .and_then(|id| self.debug_info(*id))
    }

    pub(crate) fn shifted(&self, shift: &WireShift) -> Self {
        DebugData {
            logs: self.logs.iter().map(|e| e.shifted(shift)).collect(),
            debug_info: self.debug_info.iter().map(|e| e.shifted(shift)).collect(),
            constraint_debug: self.constraint_debug.clone(),
        }
    }
}

/// A point in the construction of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// `name[file:line]`
    pub name: String,
    /// internal wires allocated so far
    pub vid: usize,
    /// constraints emitted so far
    pub cid: usize,
}

/// The cost of the circuit between two [Tag]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// name of the first tag
    pub from: String,
    /// name of the second tag
    pub to: String,
    /// internal wires allocated in between
    pub num_variables: usize,
    /// constraints emitted in between
    pub num_constraints: usize,
}

impl Display for Counter {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} - {} constraints, {} variables",
            self.from, self.to, self.num_constraints, self.num_variables
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::target::r1cs::{CoeffId, Term, Visibility};
    use r1cs_fields::FieldT;

    fn wire(w: usize) -> LinearExpression {
        LinearExpression::new(vec![Term::new(w, CoeffId::ONE, Visibility::Internal)])
    }

    #[test]
    fn render() {
        let e = LogEntry {
            location: "here".into(),
            format: "a = {}, b = {}, c = {}".into(),
            to_resolve: vec![wire(0), wire(1)],
        };
        let s = e.render(|lc| {
            if lc.terms()[0].wire_id() == 0 {
                Some(FieldT::FBn254.new_v(-3))
            } else {
                None
            }
        });
        assert_eq!(
            s,
            format!(
                "a = {}, b = <unsolved>, c = {{}}",
                FieldT::FBn254.modulus().clone() - 3
            )
        );
    }

    #[test]
    fn attach_and_shift() {
        let mut d = DebugData::default();
        let id = d.add_debug_info(LogEntry {
            location: "here".into(),
            format: "{}".into(),
            to_resolve: vec![wire(2)],
        });
        d.attach(7, id);
        let s = d.shifted(&WireShift::new(3, 4));
        let e = s.for_constraint(7).unwrap();
        assert_eq!(e.to_resolve[0].terms()[0].wire_id(), 9);
        assert!(s.for_constraint(6).is_none());
    }
}
