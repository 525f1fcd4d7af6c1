//! Shape of the generated Python, exercised through the public driver API.

use minijava::Driver;

fn transpile(source: &str) -> String {
    Driver::new("test.java", source)
        .compile()
        .expect("program should translate")
        .python
}

#[test]
fn empty_program_is_a_guarded_pass() {
    assert_eq!(transpile(""), "if __name__ == \"__main__\":\n    pass\n");
}

#[test]
fn hello_world() {
    let output = transpile("System.out.println(\"Hello, world!\");");
    assert_eq!(
        output,
        "if __name__ == \"__main__\":\n    print(\"Hello, world!\")\n"
    );
}

#[test]
fn top_level_statements_are_indented_once() {
    let output = transpile("int x = 1;\nint y = 2;");
    assert!(output.contains("\n    x = 1\n    y = 2\n"));
}

#[test]
fn uninitialized_declarations_bind_none_per_name() {
    let output = transpile("int a, b, c;");
    assert!(output.contains("    a = None\n    b = None\n    c = None\n"));
}

#[test]
fn print_variants() {
    let output = transpile(
        "int x = 1;\nSystem.out.print(x);\nSystem.out.println(x);",
    );
    assert!(output.contains("print(x, end=\"\")"));
    assert!(output.contains("print(x)\n"));
}

#[test]
fn console_reads_wrap_input() {
    let output = transpile(
        "int i; float f; String s;\n\
         i = scanner.nextInt();\n\
         f = scanner.nextFloat();\n\
         s = scanner.nextLine();",
    );
    assert!(output.contains("i = int(input())"));
    assert!(output.contains("f = float(input())"));
    assert!(output.contains("s = input()"));
}

#[test]
fn if_else_translates_with_indent() {
    let source = r#"
        int a = 1;
        if (a > 0) {
            System.out.println("pos");
        } else {
            System.out.println("neg");
        }
    "#;
    let output = transpile(source);
    let expected = "\
if __name__ == \"__main__\":
    a = 1
    if a > 0:
        print(\"pos\")
    else:
        print(\"neg\")
";
    assert_eq!(output, expected);
}

#[test]
fn empty_branch_gets_a_pass() {
    let output = transpile("int a = 1; if (a > 0) {}");
    assert!(output.contains("    if a > 0:\n        pass\n"));
}

#[test]
fn while_loop_keeps_its_condition() {
    let output = transpile("int i = 0; while (i < 5) { i++; }");
    assert!(output.contains("    while i < 5:\n        i = i + 1\n"));
}

#[test]
fn for_loop_desugars_to_while_with_trailing_update() {
    let source = r#"
        for (int i = 0; i < 10; i++) {
            System.out.println(i);
        }
    "#;
    let expected = "\
if __name__ == \"__main__\":
    i = 0
    while i < 10:
        print(i)
        i = i + 1
";
    assert_eq!(transpile(source), expected);
}

#[test]
fn nested_for_loops_nest_their_whiles() {
    let source = r#"
        for (int i = 0; i < 3; i++) {
            for (int j = 0; j < 3; j++) {
                System.out.println(i * 3 + j);
            }
        }
    "#;
    let expected = "\
if __name__ == \"__main__\":
    i = 0
    while i < 3:
        j = 0
        while j < 3:
            print(i * 3 + j)
            j = j + 1
        i = i + 1
";
    assert_eq!(transpile(source), expected);
}

#[test]
fn decrement_expands_to_subtraction() {
    let output = transpile("int i = 10; i--;");
    assert!(output.contains("i = i - 1"));
}

#[test]
fn array_lifecycle() {
    let source = r#"
        int[] a = new int[5];
        a[0] = 42;
        System.out.println(a[0]);
    "#;
    let output = transpile(source);
    assert!(output.contains("a = [None] * 5"));
    assert!(output.contains("a[0] = 42"));
    assert!(output.contains("print(a[0])"));
}

#[test]
fn array_size_may_be_an_expression() {
    let output = transpile("int n = 4; float[] f = new float[n + 1];");
    assert!(output.contains("f = [None] * (n + 1)"));
}

#[test]
fn logical_operators_become_keywords() {
    let source = "int a = 1; int b = 2;\nif (a < b && b > 0 || a == 0) { a = b; }";
    let output = transpile(source);
    assert!(output.contains("if a < b and b > 0 or a == 0:"));
}

#[test]
fn relational_operators_pass_through_verbatim() {
    let source = r#"
        int a = 1;
        int b = 2;
        if (a == b) { a = 0; }
        if (a != b) { a = 0; }
        if (a <= b) { a = 0; }
        if (a >= b) { a = 0; }
    "#;
    let output = transpile(source);
    assert!(output.contains("if a == b:"));
    assert!(output.contains("if a != b:"));
    assert!(output.contains("if a <= b:"));
    assert!(output.contains("if a >= b:"));
}

#[test]
fn arithmetic_operators_pass_through_verbatim() {
    let output = transpile("int a = 1 + 2 - 3 * 4 / 5;");
    assert!(output.contains("a = 1 + 2 - 3 * 4 / 5"));
}

#[test]
fn parentheses_are_preserved() {
    let output = transpile("int a = (1 + 2) * 3;");
    assert!(output.contains("a = (1 + 2) * 3"));
}

#[test]
fn float_literals_keep_their_point() {
    let output = transpile("float f = 2.0;");
    assert!(output.contains("f = 2.0"));
}

#[test]
fn string_escapes_survive_round_trip() {
    let output = transpile("String s = \"line\\nbreak \\\"quoted\\\"\";");
    assert!(output.contains("s = \"line\\nbreak \\\"quoted\\\"\""));
}

#[test]
fn string_concatenation_uses_plus() {
    let output = transpile("String s = \"a\" + \"b\";");
    assert!(output.contains("s = \"a\" + \"b\""));
}

#[test]
fn blocks_flatten_without_extra_indent() {
    let source = r#"
        int a = 1;
        {
            int b = 2;
            System.out.println(b);
        }
    "#;
    let output = transpile(source);
    assert!(output.contains("\n    b = 2\n    print(b)\n"));
}

#[test]
fn statement_body_without_braces() {
    let output = transpile("int a = 1; if (a > 0) a = 0;");
    assert!(output.contains("    if a > 0:\n        a = 0\n"));
}

#[test]
fn translation_is_deterministic() {
    let source = "int x = 1;\nfor (int i = 0; i < x; i++) { x = x + i; }";
    assert_eq!(transpile(source), transpile(source));
}
