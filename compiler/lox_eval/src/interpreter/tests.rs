use std::sync::Arc;

use super::*;
use crate::errors::EvalErrorKind;
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;

struct Harness {
    interner: SharedInterner,
    interpreter: Interpreter,
    output: SharedPrintHandler,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    fn with_config(config: EvalConfig) -> Self {
        let interner = SharedInterner::new();
        let output = buffer_handler();
        let interpreter = Interpreter::builder(interner.clone())
            .print_handler(Arc::clone(&output))
            .config(config)
            .build();
        Harness {
            interner,
            interpreter,
            output,
        }
    }

    fn run(&mut self, source: &str) -> Result<(), EvalError> {
        let lexed = lox_lexer::lex(source, &self.interner);
        assert!(!lexed.has_errors(), "lex errors: {:?}", lexed.errors);
        let parsed = lox_parse::parse(&lexed.tokens);
        assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
        let resolved = lox_resolve::resolve(&parsed.arena, &parsed.statements, &self.interner);
        assert!(!resolved.has_errors(), "resolve errors: {:?}", resolved.errors);
        let program = Rc::new(Program::new(
            parsed.arena,
            parsed.statements,
            resolved.resolutions,
        ));
        self.interpreter.interpret(&program)
    }

    fn take_output(&self) -> String {
        self.output.take_output()
    }
}

/// Run `source`, expecting success, and return what it printed.
fn run_ok(source: &str) -> String {
    let mut harness = Harness::new();
    if let Err(error) = harness.run(source) {
        panic!("unexpected runtime error: {error}");
    }
    harness.take_output()
}

/// Run `source`, expecting a runtime error; return output and the error.
fn run_err(source: &str) -> (String, EvalError) {
    let mut harness = Harness::new();
    match harness.run(source) {
        Ok(()) => panic!("expected a runtime error"),
        Err(error) => (harness.take_output(), error),
    }
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(run_ok("print 1 + 2 * 3; print (1 + 2) * 3;"), "7\n9\n");
}

#[test]
fn test_number_formatting() {
    assert_eq!(run_ok("print 4.0; print 4.5; print 10 / 4; print -0.5;"), "4\n4.5\n2.5\n-0.5\n");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(run_ok("print \"a\" + \"b\";"), "ab\n");

    let (_, error) = run_err("print \"a\" + 1;");
    assert_eq!(error.kind, EvalErrorKind::InvalidAddOperands);
    assert_eq!(error.message, "Operands must be two numbers or two strings.");
}

#[test]
fn test_truthiness() {
    assert_eq!(run_ok("print !nil; print !0; print !\"\";"), "true\nfalse\nfalse\n");
}

#[test]
fn test_equality() {
    assert_eq!(
        run_ok("print nil == nil; print 1 == \"1\"; print \"a\" == \"a\"; print nil != false;"),
        "true\nfalse\ntrue\ntrue\n"
    );
}

#[test]
fn test_logical_operators_return_operands() {
    assert_eq!(
        run_ok("print nil or \"x\"; print 1 and 2; print false and missing; print 1 or missing;"),
        "x\n2\nfalse\n1\n"
    );
}

#[test]
fn test_comma_group_value_is_last() {
    assert_eq!(run_ok("var a; print (a = 1, a + 1); print a;"), "2\n1\n");
}

#[test]
fn test_shadowing() {
    let source = r#"
        var a = "global";
        {
          var a = "outer";
          {
            var a = "inner";
            print a;
          }
          print a;
        }
        print a;
    "#;
    assert_eq!(run_ok(source), "inner\nouter\nglobal\n");
}

#[test]
fn test_closure_counters_are_independent() {
    let source = r"
        fun makeCounter() {
          var count = 0;
          fun increment() {
            count = count + 1;
            return count;
          }
          return increment;
        }
        var a = makeCounter();
        var b = makeCounter();
        print a();
        print a();
        print b();
        print a();
    ";
    assert_eq!(run_ok(source), "1\n2\n1\n3\n");
}

#[test]
fn test_closure_captures_declaration_frame() {
    let source = r#"
        var a = "global";
        {
          fun show() { print a; }
          show();
          var a = "block";
          show();
        }
    "#;
    assert_eq!(run_ok(source), "global\nglobal\n");
}

#[test]
fn test_control_flow() {
    let source = r#"
        for (var i = 0; i < 3; i = i + 1) print i;
        var n = 0;
        while (n < 2) { n = n + 1; }
        print n;
        if (n == 2) print "yes"; else print "no";
    "#;
    assert_eq!(run_ok(source), "0\n1\n2\n2\nyes\n");
}

#[test]
fn test_recursion() {
    let source = r"
        fun fib(n) {
          if (n < 2) return n;
          return fib(n - 1) + fib(n - 2);
        }
        print fib(15);
    ";
    assert_eq!(run_ok(source), "610\n");
}

#[test]
fn test_function_without_return_yields_nil() {
    assert_eq!(run_ok("fun f() {} print f();"), "nil\n");
}

#[test]
fn test_class_round_trip() {
    let source = r"
        class Point {
          init(x) { this.x = x; }
          getX() { return this.x; }
        }
        var p = Point(3);
        print p.getX();
        print p.init(5) == p;
        print p.x;
    ";
    assert_eq!(run_ok(source), "3\ntrue\n5\n");
}

#[test]
fn test_bare_return_in_initializer_yields_this() {
    let source = r"
        class A {
          init() {
            this.x = 1;
            return;
            this.x = 2;
          }
        }
        print A().x;
    ";
    assert_eq!(run_ok(source), "1\n");
}

#[test]
fn test_initializer_returning_value_is_an_error() {
    let (_, error) = run_err("class A {\n  init() {\n    return 1;\n  }\n}\nA();");
    assert_eq!(error.kind, EvalErrorKind::InitializerReturnedValue);
    assert_eq!(error.line, 3);
}

#[test]
fn test_bound_method_remembers_instance() {
    let source = r"
        class Box {
          init(v) { this.v = v; }
          get() { return this.v; }
        }
        var get = Box(7).get;
        print get();
    ";
    assert_eq!(run_ok(source), "7\n");
}

#[test]
fn test_fields_shadow_methods() {
    let source = r"
        class A { m() { return 1; } }
        var a = A();
        print a.m();
        a.m = 2;
        print a.m;
    ";
    assert_eq!(run_ok(source), "1\n2\n");
}

#[test]
fn test_class_without_init_takes_no_arguments() {
    let (_, error) = run_err("class A {} A(1);");
    assert_eq!(error.kind, EvalErrorKind::ArityMismatch { expected: 0, got: 1 });
}

#[test]
fn test_display_forms() {
    let source = "fun f() {} class A {} print f; print clock; print A; print A();";
    assert_eq!(run_ok(source), "<fn f>\n<native fn>\nA\nA instance\n");
}

#[test]
fn test_clock_returns_seconds() {
    assert_eq!(run_ok("var t = clock(); print t >= 0; print clock() >= t;"), "true\ntrue\n");
}

#[test]
fn test_division_by_zero() {
    let (output, error) = run_err("print 1;\nprint 1 / 0;\nprint 2;");
    assert_eq!(output, "1\n");
    assert_eq!(error.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(error.line, 2);
}

#[test]
fn test_arity_mismatch() {
    let (_, error) = run_err("fun f() {}\nf(1);");
    assert_eq!(error.message, "Expected 0 arguments but got 1.");
    assert_eq!(error.line, 2);
}

#[test]
fn test_calling_a_non_callable() {
    let (_, error) = run_err("\"text\"();");
    assert_eq!(error.kind, EvalErrorKind::NotCallable);
}

#[test]
fn test_undefined_variable() {
    let (_, error) = run_err("print missing;");
    assert_eq!(error.message, "Undefined variable 'missing'.");

    let (_, error) = run_err("missing = 1;");
    assert_eq!(error.message, "Undefined variable 'missing'.");
}

#[test]
fn test_property_errors() {
    let (_, error) = run_err("var x = 1; print x.y;");
    assert_eq!(error.message, "Only instances have properties.");

    let (_, error) = run_err("var x = 1; x.y = 2;");
    assert_eq!(error.message, "Only instances have fields.");

    let (_, error) = run_err("class A {} print A().nope;");
    assert_eq!(error.message, "Undefined property 'nope'.");
}

#[test]
fn test_operand_errors_name_the_operator_line() {
    let (_, error) = run_err("var a = 1;\nvar b = \"x\";\nprint a -\n  b;");
    assert_eq!(error.message, "Operands of '-' must be numbers.");
    assert_eq!(error.line, 3);

    let (_, error) = run_err("print -\"x\";");
    assert_eq!(error.kind, EvalErrorKind::OperandNotNumber);
}

#[test]
fn test_error_inside_callee_keeps_its_line() {
    let (_, error) = run_err("fun f() {\n  return 1 / 0;\n}\nf();");
    assert_eq!(error.line, 2);
}

#[test]
fn test_deep_recursion_within_limit() {
    let source = r"
        fun depth(n) {
          if (n == 0) return 0;
          return depth(n - 1) + 1;
        }
        print depth(1000);
    ";
    assert_eq!(run_ok(source), "1000\n");
}

#[test]
fn test_runaway_recursion_is_a_stack_overflow() {
    let mut harness = Harness::with_config(EvalConfig { max_call_depth: 64 });
    let result = harness.run("fun f() { f(); }\nf();");
    let error = result.err();
    assert_eq!(
        error.as_ref().map(|e| &e.kind),
        Some(&EvalErrorKind::StackOverflow { limit: 64 })
    );
    assert_eq!(error.map(|e| e.message), Some("Stack overflow.".to_string()));

    // The depth is released, so the interpreter stays usable.
    assert!(harness.run("fun g() { return 1; } print g();").is_ok());
    assert_eq!(harness.take_output(), "1\n");
}

#[test]
fn test_globals_persist_across_runs() {
    let mut harness = Harness::new();
    assert!(harness.run("var a = 1;").is_ok());
    assert!(harness.run("a = a + 1;").is_ok());
    assert!(harness.run("print a;").is_ok());
    assert_eq!(harness.take_output(), "2\n");
    assert_eq!(harness.interpreter.global("a"), Some(Value::Number(2.0)));
}

#[test]
fn test_closures_outlive_their_program() {
    let mut harness = Harness::new();
    let setup = r"
        fun make() {
          var n = 0;
          fun inc() { n = n + 1; return n; }
          return inc;
        }
        var counter = make();
    ";
    assert!(harness.run(setup).is_ok());
    assert!(harness.run("print counter();").is_ok());
    assert!(harness.run("print counter();").is_ok());
    assert_eq!(harness.take_output(), "1\n2\n");
}

#[test]
fn test_runtime_error_keeps_earlier_definitions() {
    let mut harness = Harness::new();
    assert!(harness.run("var a = 1; print nope; var b = 2;").is_err());
    assert_eq!(harness.interpreter.global("a"), Some(Value::Number(1.0)));
    assert_eq!(harness.interpreter.global("b"), None);
}
