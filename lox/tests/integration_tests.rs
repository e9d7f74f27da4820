use lox::builtin_functions::default_builtin_vars;
use lox::Error;
use lox_interp::interpreter::Interpreter;

/// Runs `source` and asserts that it prints `expected`, one item per line.
fn interpret(source: &str, expected: &[&str]) {
    match lox::interpret(source) {
        Ok(output) => assert_eq!(output, expected),
        Err(err) => panic!("program failed: {}", err),
    }
}

/// Runs `source` and returns the error it fails with.
fn interpret_err(source: &str) -> Error {
    match lox::interpret(source) {
        Ok(output) => panic!("program succeeded, printed {:?}", output),
        Err(err) => err,
    }
}

#[test]
fn print_literals() {
    interpret(
        r#"
        print 1;
        print 1.5;
        print nil;
        print "hello";
        print true;"#,
        &["1", "1.5", "nil", "hello", "true"],
    );
}

#[test]
fn precedence() {
    interpret(
        r#"
        print 1 + 2 * 3;
        print (1 + 2) * 3;
        print -1 - -1;
        print !(1 < 2) == false;"#,
        &["7", "9", "0", "true"],
    );
}

#[test]
fn variables() {
    interpret(
        r#"
        var x = 1;
        print x;
        var y = x + 1;
        print y;
        x = 10;
        print x;
        var x;
        print x;"#,
        &["1", "2", "10", "nil"],
    );
}

#[test]
fn comments() {
    interpret(
        r#"
        var x = 1; // a comment
        // print 2;
        print x;"#,
        &["1"],
    );
}

#[test]
fn short_circuit() {
    interpret(
        r#"
        print false and (1/0 > 0);
        print true or undefined();
        print "left" or "right";
        print nil and "right";"#,
        &["false", "true", "left", "nil"],
    );
}

mod control_flow {
    use super::*;

    #[test]
    fn if_else() {
        interpret(
            r#"
            if (1 > 2) print "then"; else print "else";
            if (0) print "zero is truthy";
            if (nil) print "never";"#,
            &["else", "zero is truthy"],
        );
    }

    #[test]
    fn while_loop() {
        interpret(
            r#"
            var i = 0;
            var sum = 0;
            while (i < 5) {
                sum = sum + i;
                i = i + 1;
            }
            print sum;"#,
            &["10"],
        );
    }

    #[test]
    fn for_loop() {
        interpret(
            r#"
            var a = 0;
            var temp;
            for (var b = 1; a < 50; b = temp + b) {
                print a;
                temp = a;
                a = b;
            }"#,
            &["0", "1", "1", "2", "3", "5", "8", "13", "21", "34"],
        );
    }

    #[test]
    fn for_loop_variable_is_scoped() {
        let err = interpret_err(
            r#"
            for (var i = 0; i < 1; i = i + 1) {}
            print i;"#,
        );
        assert_eq!(err.to_string(), "Undefined variable 'i'.\n[line 3]");
    }
}

mod functions {
    use super::*;

    #[test]
    fn functions() {
        interpret(
            r#"
            fun foo() {
                return 1;
            }
            print foo();
            print foo;"#,
            &["1", "<fn foo>"],
        );
    }

    #[test]
    fn functions_with_params() {
        interpret(
            r#"
            fun double(x) {
                var result = x * 2;
                return result;
            }
            print double(10);
            print double(-2);"#,
            &["20", "-4"],
        );
    }

    #[test]
    fn functions_implicit_return() {
        interpret(
            r#"
            fun foo() { }
            print foo();"#,
            &["nil"],
        );
    }

    #[test]
    fn higher_order_function() {
        interpret(
            r#"
            fun twice(f, v) {
                return f(f(v));
            }
            fun double(x) {
                return x * 2;
            }

            print twice(double, 10);
            print twice(double, -2);"#,
            &["40", "-8"],
        );
    }

    #[test]
    fn recursion() {
        interpret(
            r#"
            fun fib(n) {
                if (n <= 1) return n;
                return fib(n - 2) + fib(n - 1);
            }
            for (var i = 0; i < 8; i = i + 1) {
                print fib(i);
            }"#,
            &["0", "1", "1", "2", "3", "5", "8", "13"],
        );
    }

    #[test]
    fn closures() {
        interpret(
            r#"
            fun createAdder(x) {
                fun adder(y) {
                    return x + y;
                }
                return adder;
            }
            var addTwo = createAdder(2);
            print addTwo(1);"#,
            &["3"],
        );
        interpret(
            r#"
            fun compose(f, g) {
                fun func(x) {
                    return f(g(x));
                }
                return func;
            }
            fun addOne(x) { return x + 1; }
            fun addTwo(x) { return x + 2; }
            print compose(addOne, addTwo)(2);"#,
            &["5"],
        );
    }

    #[test]
    fn counters_keep_separate_state() {
        interpret(
            r#"
            fun makeCounter() {
                var i = 0;
                fun count() {
                    i = i + 1;
                    print i;
                }
                return count;
            }
            var first = makeCounter();
            var second = makeCounter();
            first();
            first();
            second();"#,
            &["1", "2", "1"],
        );
    }

    #[test]
    fn clock() {
        interpret(
            r#"
            var start = clock();
            print clock() >= start;
            print clock;"#,
            &["true", "<native fn clock>"],
        );
    }
}

mod errors {
    use super::*;

    #[test]
    fn arity_mismatch() {
        let err = interpret_err(
            r#"
            fun add(a, b) { return a + b; }
            add(1);"#,
        );
        assert_eq!(err.exit_code(), 70);
        assert_eq!(err.to_string(), "Expected 2 arguments but got 1.\n[line 3]");
    }

    #[test]
    fn operand_types() {
        let err = interpret_err(r#"print 1 + "a";"#);
        assert_eq!(
            err.to_string(),
            "Operands must be two numbers or two strings.\n[line 1]"
        );
    }

    #[test]
    fn multiple_syntax_errors() {
        let err = interpret_err("var = 1;\nprint 2;\nprint (3;");
        assert_eq!(err.exit_code(), 64);
        match err {
            Error::Syntax(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].line(), 1);
                assert_eq!(errors[1].line(), 3);
            }
            other => panic!("expected syntax errors, got {:?}", other),
        }
    }

    #[test]
    fn syntax_error_prevents_execution() {
        let mut interpreter = Interpreter::new(&default_builtin_vars(), Vec::<String>::new());
        let result = lox::run("print 1;\nprint 2 +;", &mut interpreter);
        assert!(matches!(result, Err(Error::Syntax(_))));
        assert!(interpreter.output().is_empty());
    }

    #[test]
    fn scanner_errors_are_syntax_errors() {
        let err = interpret_err("print 1; @");
        assert_eq!(err.to_string(), "[line 1] Error: Unexpected character.");
        let err = interpret_err("print \"unterminated;");
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn runtime_error_keeps_earlier_output() {
        let mut interpreter = Interpreter::new(&default_builtin_vars(), Vec::<String>::new());
        let result = lox::run("print 1;\nprint -nil;\nprint 3;", &mut interpreter);
        match result {
            Err(Error::Runtime(err)) => {
                assert_eq!(err.message, "Operand must be a number.");
                assert_eq!(err.line, 2);
            }
            other => panic!("expected a runtime error, got {:?}", other),
        }
        assert_eq!(interpreter.output(), &vec!["1".to_string()]);
    }

    #[test]
    fn repl_session_keeps_globals_after_errors() {
        let mut interpreter = Interpreter::new(&default_builtin_vars(), Vec::<String>::new());
        assert!(lox::run("var a = 1;", &mut interpreter).is_ok());
        assert!(lox::run("a = a +;", &mut interpreter).is_err());
        assert!(lox::run("a = a + nil;", &mut interpreter).is_err());
        assert!(lox::run("print a;", &mut interpreter).is_ok());
        assert_eq!(interpreter.output(), &vec!["1".to_string()]);
    }
}
