//! Semantic analysis behavior, exercised through the public driver API.

use minijava::{Diagnostic, Driver};

fn compile(source: &str) -> Result<String, Vec<Diagnostic>> {
    Driver::new("test.java", source)
        .compile()
        .map(|artifacts| artifacts.python)
}

fn first_error_code(source: &str) -> String {
    let diagnostics = compile(source).expect_err("expected a compile error");
    diagnostics[0].code.clone()
}

#[test]
fn accepts_a_well_typed_program() {
    let source = r#"
        int n = 10;
        float total = 0.0;
        String label = "sum";
        for (int i = 0; i < n; i++) {
            total = total + i;
        }
        System.out.println(label + ": " + total);
    "#;
    assert!(compile(source).is_ok());
}

#[test]
fn duplicate_declaration_in_same_scope() {
    assert_eq!(first_error_code("int a; float a;"), "E200");
}

#[test]
fn duplicate_within_one_declaration_list() {
    assert_eq!(first_error_code("int a, a;"), "E200");
}

#[test]
fn shadowing_in_an_inner_block_is_allowed() {
    let source = r#"
        int a = 1;
        {
            String a = "inner";
            System.out.println(a);
        }
        a = 2;
    "#;
    assert!(compile(source).is_ok());
}

#[test]
fn block_locals_do_not_escape_their_block() {
    let source = r#"
        {
            int hidden = 1;
        }
        hidden = 2;
    "#;
    assert_eq!(first_error_code(source), "E201");
}

#[test]
fn undeclared_variable_in_expression() {
    assert_eq!(first_error_code("int a = b + 1;"), "E201");
}

#[test]
fn undeclared_read_target() {
    assert_eq!(first_error_code("x = scanner.nextInt();"), "E201");
}

#[test]
fn undeclared_increment_target() {
    assert_eq!(first_error_code("i++;"), "E201");
}

#[test]
fn undeclared_variable_in_condition() {
    assert_eq!(first_error_code("int a = 1; if (a < b) { a = 2; }"), "E201");
}

#[test]
fn initializer_cannot_reference_the_name_it_declares() {
    assert_eq!(first_error_code("int x = x;"), "E201");
}

#[test]
fn indexing_a_scalar_is_rejected() {
    assert_eq!(first_error_code("int a = 1; a[0] = 2;"), "E202");
}

#[test]
fn bare_array_cannot_be_used_as_a_value() {
    let source = "int[] a = new int[3]; int b = a + 1;";
    assert_eq!(first_error_code(source), "E203");
}

#[test]
fn bare_array_cannot_be_printed() {
    let source = "int[] a = new int[3]; System.out.println(a);";
    assert_eq!(first_error_code(source), "E203");
}

#[test]
fn indexed_array_access_yields_element_type() {
    let source = "int[] a = new int[3]; a[0] = 1; int b = a[0] + 1;";
    assert!(compile(source).is_ok());
}

#[test]
fn suffix_bracket_declaration_is_an_array_too() {
    let source = "float a[] = new float[2]; a[1] = 0.5;";
    assert!(compile(source).is_ok());
}

#[test]
fn array_size_must_be_int() {
    assert_eq!(first_error_code("int[] a = new int[2.5];"), "E204");
}

#[test]
fn array_index_must_be_int() {
    let source = "int[] a = new int[3]; a[1.5] = 0;";
    assert_eq!(first_error_code(source), "E204");
}

#[test]
fn int_widens_to_float_in_initialization() {
    assert!(compile("float f = 3;").is_ok());
}

#[test]
fn int_widens_to_float_in_assignment() {
    assert!(compile("float f; f = 3;").is_ok());
}

#[test]
fn float_does_not_narrow_to_int() {
    assert_eq!(first_error_code("int n = 3.5;"), "E204");
}

#[test]
fn string_cannot_initialize_a_number() {
    assert_eq!(first_error_code("int n = \"five\";"), "E204");
}

#[test]
fn mixed_arithmetic_promotes_to_float() {
    assert_eq!(first_error_code("int n = 1 + 2.0;"), "E204");
    assert!(compile("float f = 1 + 2.0;").is_ok());
}

#[test]
fn string_concatenation_with_plus() {
    assert!(compile("String s = \"a\" + \"b\"; String t = s + 1;").is_ok());
}

#[test]
fn string_is_rejected_in_multiplication() {
    assert_eq!(first_error_code("String s = \"a\" * 2;"), "E205");
}

#[test]
fn string_is_rejected_in_division() {
    assert_eq!(first_error_code("String s = \"a\" / 2;"), "E205");
}

#[test]
fn string_is_rejected_in_subtraction() {
    assert_eq!(first_error_code("String s = \"ab\" - \"a\";"), "E205");
}

#[test]
fn analysis_stops_at_the_first_error() {
    // Both statements are bad; only the first is reported
    let diagnostics = compile("x = 1; y = 2;").unwrap_err();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, "E201");
}

#[test]
fn for_initializer_lives_in_the_enclosing_scope() {
    let source = r#"
        for (int i = 0; i < 3; i++) {
            System.out.println(i);
        }
        i = 0;
    "#;
    assert!(compile(source).is_ok());
}

#[test]
fn errors_carry_source_positions() {
    let diagnostics = compile("int a = 1;\nb = 2;").unwrap_err();
    let location = diagnostics[0].location.as_ref().expect("location");
    assert_eq!(location.line, 2);
    assert_eq!(location.column, 1);
}

#[test]
fn analysis_is_repeatable() {
    let source = "int a = 1; a = a + 1;";
    assert!(compile(source).is_ok());
    assert!(compile(source).is_ok());
}
