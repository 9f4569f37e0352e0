// End-to-end programs driven through the public interpreter API

use funge93::{FungeError, Interpreter, InterpreterConfig};

fn interpreter() -> Interpreter {
    Interpreter::with_config(InterpreterConfig { seed: Some(1) })
}

#[test]
fn test_hello_world() {
    let out = interpreter()
        .run_to_string("\"!dlroW ,olleH\",,,,,,,,,,,,,@")
        .unwrap();
    assert_eq!(out, "Hello, World!");
}

#[test]
fn test_add_counts_instructions() {
    let interp = interpreter();
    assert_eq!(interp.run_to_string("94+.@").unwrap(), "13");
    let stats = interp.stats();
    assert_eq!(stats.instructions, 5);
    assert!(stats.halted);
}

#[test]
fn test_output_int_and_char() {
    let interp = interpreter();
    // 123 = 5*5*5 - 2
    assert_eq!(interp.run_to_string("55*5*2-.@").unwrap(), "123");
    assert_eq!(interp.run_to_string("85*5+5*,@").unwrap(), "\u{e1}");
    assert_eq!(interp.run_to_string("88*1+,@").unwrap(), "A");
}

#[test]
fn test_multiline_flow() {
    // East along the top row, down the right column, west along the bottom.
    let program = "\
1v
@<";
    let interp = interpreter();
    assert_eq!(interp.run_to_string(program).unwrap(), "");
    assert_eq!(interp.stats().instructions, 4);
}

#[test]
fn test_countdown_loop() {
    // Prints 5 4 3 2 1 then halts when the counter reaches zero.
    let program = "\
5>:.1-:v
@^     _";
    let out = interpreter().run_to_string(program).unwrap();
    assert_eq!(out, "54321");
}

#[test]
fn test_bridge_skips_cell() {
    let out = interpreter().run_to_string("#@1.@").unwrap();
    assert_eq!(out, "1");
}

#[test]
fn test_wraparound_reaches_halt() {
    // The pointer starts moving west off the left edge and wraps to `@`.
    let out = interpreter().run_to_string("<2.@").unwrap();
    assert_eq!(out, "");
    let out = interpreter().run_to_string("<@.2").unwrap();
    assert_eq!(out, "2");
}

#[test]
fn test_self_modifying_program() {
    // Write '@' (64 = 8*8) over the cell at (7, 0), which would otherwise print.
    let out = interpreter().run_to_string("88*70p 1.@").unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_get_reads_program_text() {
    let out = interpreter().run_to_string("30g,@Z").unwrap();
    assert_eq!(out, ",");
}

#[test]
fn test_random_direction_is_reproducible() {
    // `?` sends the pointer to one of three printing rows, or back round.
    let program = "\
v>1.@
>?2.@
 >3.@";
    for seed in 0..20 {
        let config = InterpreterConfig { seed: Some(seed) };
        let a = Interpreter::with_config(config.clone()).run_to_string(program).unwrap();
        let b = Interpreter::with_config(config).run_to_string(program).unwrap();
        assert_eq!(a, b);
        assert!(["1", "2", "3"].contains(&a.as_str()), "unexpected output {a:?}");
    }
}

#[test]
fn test_non_rectangular_fails_before_output() {
    let interp = interpreter();
    let err = interp.run("1.@\n2.").err().unwrap();
    assert_eq!(
        err,
        FungeError::NonRectangular {
            line: 2,
            expected: 3,
            found: 2
        }
    );
    assert_eq!(interp.stats().instructions, 0);
}

#[test]
fn test_underflow_and_zero_division_are_permissive() {
    let out = interpreter().run_to_string(".10/.10%.@").unwrap();
    assert_eq!(out, "000");
}

#[test]
fn test_infinite_program_bounded_pull() {
    let interp = interpreter();
    let mut run = interp.run("1.").unwrap();
    let out: String = run.by_ref().take(10).collect();
    assert_eq!(out, "1111111111");
    assert!(!run.halted());
    drop(run);
    assert!(!interp.is_running());
}

#[test]
fn test_second_run_does_not_disturb_first() {
    let interp = interpreter();
    let mut first = interp.run("\"iH\",,@").unwrap();
    assert_eq!(first.next().as_deref(), Some("H"));
    assert_eq!(interp.run("@").err(), Some(FungeError::RunInProgress));
    assert_eq!(first.next().as_deref(), Some("i"));
    assert_eq!(first.next(), None);
}
