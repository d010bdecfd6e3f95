//! Target constraint systems

pub mod r1cs;
