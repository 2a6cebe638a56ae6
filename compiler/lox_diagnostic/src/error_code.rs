//! Error codes for all interpreter diagnostics.
//!
//! The first digit of a code names the pipeline stage that reported it.

use std::fmt;

/// Error codes for all interpreter diagnostics.
///
/// Format: E#### where the first digit indicates the stage:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Resolver errors
/// - E6xxx: Runtime errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unexpected character in source
    E0001,
    /// Unterminated string literal
    E0002,
    /// Unterminated block comment
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token (expected something else)
    E1001,
    /// Expected expression
    E1002,
    /// Invalid assignment target
    E1003,
    /// Too many parameters
    E1004,
    /// Too many arguments
    E1005,

    // Resolver Errors (E2xxx)
    /// Name already declared in this scope
    E2001,
    /// Local variable read in its own initializer
    E2002,
    /// `return` outside a function
    E2003,
    /// `this` outside a class
    E2004,

    // Runtime Errors (E6xxx)
    /// Operand type mismatch
    E6001,
    /// Undefined variable
    E6002,
    /// Undefined property
    E6003,
    /// Wrong number of arguments
    E6004,
    /// Called a value that is not callable
    E6005,
    /// Division by zero
    E6006,
    /// Call depth limit exceeded
    E6007,
    /// Property access on a non-instance
    E6008,
    /// `return` with a value inside an initializer
    E6009,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E6009,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
        }
    }

    /// One-line description of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unexpected character",
            ErrorCode::E0002 => "unterminated string",
            ErrorCode::E0003 => "unterminated block comment",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "invalid assignment target",
            ErrorCode::E1004 => "too many parameters",
            ErrorCode::E1005 => "too many arguments",
            ErrorCode::E2001 => "name already declared in this scope",
            ErrorCode::E2002 => "local variable read in its own initializer",
            ErrorCode::E2003 => "return outside a function",
            ErrorCode::E2004 => "`this` outside a class",
            ErrorCode::E6001 => "operand type mismatch",
            ErrorCode::E6002 => "undefined variable",
            ErrorCode::E6003 => "undefined property",
            ErrorCode::E6004 => "wrong number of arguments",
            ErrorCode::E6005 => "value is not callable",
            ErrorCode::E6006 => "division by zero",
            ErrorCode::E6007 => "call depth limit exceeded",
            ErrorCode::E6008 => "property access on a non-instance",
            ErrorCode::E6009 => "initializer returned a value",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
