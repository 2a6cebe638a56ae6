//! Grammar productions, one file per syntactic category.

mod expr;
mod operators;
mod stmt;
