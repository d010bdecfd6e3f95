//! # r1cs_compiler
//!
//! Builds rank-1 constraint systems from circuit definitions, finalizes them into a
//! `[public | secret | internal]` wire layout, and partitions them into levels for a parallel
//! witness solver.

#![warn(missing_docs)]

pub mod cfg;
pub mod front;
pub mod target;
