use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lisp101::{parse, Evaluator, Scanner};

const PROGRAM: &str = r#"
    ; Recursive factorial plus a higher-order pipeline
    (define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))
    (define squares (map (lambda (x) (* x x)) '(1 2 3 4 5 6 7 8 9 10)))
    (fold + (fact 15) (filter (lambda (x) (> x 20)) squares))
"#;

fn lexer_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize program", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(black_box(PROGRAM));
            scanner.scan_tokens().unwrap()
        })
    });
}

fn parser_benchmark(c: &mut Criterion) {
    c.bench_function("parse program", |b| {
        b.iter(|| parse(black_box(PROGRAM)).unwrap())
    });
}

fn eval_benchmark(c: &mut Criterion) {
    let forms = parse(PROGRAM).unwrap();

    c.bench_function("evaluate program", |b| {
        b.iter(|| {
            let mut evaluator = Evaluator::new();
            evaluator.execute(black_box(&forms)).unwrap()
        })
    });

    c.bench_function("recursive fib 15", |b| {
        let mut evaluator = Evaluator::new();
        evaluator
            .run("(define fib (lambda (n) (if (< n 2) n (+ (fib (- n 1)) (fib (- n 2))))))")
            .unwrap();
        let call = parse("(fib 15)").unwrap();
        b.iter(|| evaluator.execute(black_box(&call)).unwrap())
    });
}

criterion_group!(benches, lexer_benchmark, parser_benchmark, eval_benchmark);
criterion_main!(benches);
