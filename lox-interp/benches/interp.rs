use criterion::{criterion_group, criterion_main, Criterion};
use lox_interp::interpreter::{InterpretResult, Interpreter};
use lox_parser::parser::Parser;
use lox_value::BuiltinVars;

fn run(source: &str) {
    let source = source.into();
    let program = Parser::from_source(&source).parse_program();
    assert!(source.has_no_errors());

    let mut interpreter = Interpreter::new(&BuiltinVars::new(), Vec::<String>::new());
    assert_eq!(interpreter.interpret(&program), InterpretResult::Ok);
}

fn fib(c: &mut Criterion) {
    let source = r#"
    fun fib(n) {
        if (n < 2) return n;
        return fib(n - 1) + fib(n - 2);
    }
    print fib(15);"#;
    c.bench_function("fib-15", |b| b.iter(|| run(source)));
}

fn closures(c: &mut Criterion) {
    let source = r#"
    fun makeCounter() {
        var i = 0;
        fun count() { i = i + 1; return i; }
        return count;
    }
    var counter = makeCounter();
    for (var i = 0; i < 1000; i = i + 1) counter();
    print counter();"#;
    c.bench_function("closure-counter", |b| b.iter(|| run(source)));
}

criterion_group!(benches, fib, closures);
criterion_main!(benches);
