//! Partition of constraints into dependency levels
//!
//! A constraint's level is one more than the level of every earlier constraint that resolves a
//! wire it mentions. Constraints of one level can then be solved concurrently once all earlier
//! levels are done.

use fxhash::FxHashMap as HashMap;

use super::{HintInput, HintRegistry, LinearExpression, R1c};

struct LevelBuilder<'a> {
    hints: &'a HintRegistry,
    num_inputs: usize,
    /// wire -> the constraint that resolves it
    wire_to_node: HashMap<usize, usize>,
    node_levels: Vec<usize>,
    node_level: usize,
}

impl<'a> LevelBuilder<'a> {
    fn process(&mut self, lc: &LinearExpression, cid: usize) {
        for t in lc {
            let w = t.wire_id();
            if w < self.num_inputs {
                continue;
            }
            if let Some(&n) = self.wire_to_node.get(&w) {
                // n == cid happens for hint outputs and repeated wires
                if n != cid && self.node_levels[n] >= self.node_level {
                    self.node_level = self.node_levels[n] + 1;
                }
                continue;
            }
            let hints = self.hints;
            if let Some(h) = hints.get(w) {
                for input in &h.inputs {
                    if let HintInput::Expression(e) = input {
                        self.process(e, cid);
                    }
                }
                for o in &h.wires {
                    self.wire_to_node.insert(*o, cid);
                }
                continue;
            }
            self.wire_to_node.insert(w, cid);
        }
    }
}

/// Group the indices of `constraints` into levels, in emission order within a level. Wires below
/// `num_inputs` are known before solving starts.
pub fn build_levels(
    constraints: &[R1c],
    hints: &HintRegistry,
    num_inputs: usize,
) -> Vec<Vec<usize>> {
    let mut b = LevelBuilder {
        hints,
        num_inputs,
        wire_to_node: Default::default(),
        node_levels: vec![0; constraints.len()],
        node_level: 0,
    };
    let mut levels: Vec<Vec<usize>> = Vec::new();
    for (cid, c) in constraints.iter().enumerate() {
        b.node_level = 0;
        for e in c.exprs() {
            b.process(e, cid);
        }
        b.node_levels[cid] = b.node_level;
        if b.node_level == levels.len() {
            levels.push(vec![cid]);
        } else {
            levels[b.node_level].push(cid);
        }
    }
    levels
}
