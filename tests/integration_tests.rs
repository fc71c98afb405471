// Parser robustness tests: malformed input of every stripe must come
// back as a reported error, never a panic.

use pyrite::error::PyriteError;
use pyrite::lexer::Lexer;
use pyrite::parser::Parser;

/// Test result for a single test case
#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail(String),
    Crash(String),
}

/// Individual test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub should_succeed: bool,
    pub expected_error_contains: Option<String>,
}

impl TestCase {
    pub fn should_succeed(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: true,
            expected_error_contains: None,
        }
    }

    pub fn should_fail(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: None,
        }
    }

    pub fn should_fail_with_message(name: &str, input: &str, expected_msg: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: Some(expected_msg.to_string()),
        }
    }
}

/// Test suite containing multiple test cases
#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    pub fn run(&self) -> TestSuiteResults {
        let mut results = TestSuiteResults::new(&self.name);

        println!("Running test suite: {}", self.name);
        println!("{}", "=".repeat(50));

        for test in &self.tests {
            let result = run_single_test(test);
            results.add_result(&test.name, result);
        }

        results.print_summary();
        results
    }
}

/// Results for a test suite run
#[derive(Debug)]
pub struct TestSuiteResults {
    pub suite_name: String,
    pub results: Vec<(String, TestResult)>,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
}

impl TestSuiteResults {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            results: Vec::new(),
            passed: 0,
            failed: 0,
            crashed: 0,
        }
    }

    pub fn add_result(&mut self, test_name: &str, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                println!("  ✓ {}", test_name);
            }
            TestResult::Fail(msg) => {
                self.failed += 1;
                println!("  ✗ {}: {}", test_name, msg);
            }
            TestResult::Crash(msg) => {
                self.crashed += 1;
                println!("  💥 {}: CRASHED - {}", test_name, msg);
            }
        }
        self.results.push((test_name.to_string(), result));
    }

    pub fn print_summary(&self) {
        println!();
        println!("Test Suite: {} - Summary", self.suite_name);
        println!("{}", "-".repeat(30));
        println!("Passed:  {}", self.passed);
        println!("Failed:  {}", self.failed);
        println!("Crashed: {}", self.crashed);
        println!("Total:   {}", self.results.len());
        println!();
    }

    pub fn is_all_passed(&self) -> bool {
        self.crashed == 0 && self.failed == 0
    }
}

fn run_single_test(test: &TestCase) -> TestResult {
    // Catch panics so a parser bug shows up as a crash, not a lost run
    let result = std::panic::catch_unwind(|| parse_input(&test.input));

    match result {
        Ok(parse_result) => match (parse_result, test.should_succeed) {
            (Ok(_), true) => TestResult::Pass,
            (Ok(_), false) => {
                TestResult::Fail("Expected parsing to fail, but it succeeded".to_string())
            }
            (Err(error), false) => {
                if let Some(expected) = &test.expected_error_contains {
                    if error.message.contains(expected) {
                        TestResult::Pass
                    } else {
                        TestResult::Fail(format!(
                            "Error message '{}' doesn't contain expected text '{}'",
                            error.message, expected
                        ))
                    }
                } else {
                    TestResult::Pass // Any error is acceptable
                }
            }
            (Err(error), true) => TestResult::Fail(format!(
                "Expected parsing to succeed, but got error: {}",
                error.message
            )),
        },
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            TestResult::Crash(panic_msg)
        }
    }
}

/// Lex and parse input, reporting the first error
fn parse_input(input: &str) -> Result<pyrite::ast::Program, PyriteError> {
    let mut lexer = Lexer::new(input.to_string());
    let lines = lexer.scan_lines()?;
    let mut parser = Parser::new(lines);
    parser.parse()
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_malformed_expressions_tests() -> TestSuite {
    let mut suite = TestSuite::new("Malformed Expressions");

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren",
        "(1 + 2",
        "Expected ')' after expression",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren_nested",
        "((1 + 2)",
        "Expected ')' after expression",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_closing_paren",
        "1 + 2)",
        "Expected expression, found ')'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "empty_parentheses",
        "()",
        "Empty parentheses are not allowed",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "empty_parentheses_in_expression",
        "1 + ()",
        "Expected expression after '+'",
    ));

    // Braces are lexed but rejected by the grammar
    suite.add_test(TestCase::should_fail_with_message(
        "brace_block",
        "{ x = 1 }",
        "reserved",
    ));

    suite
}

fn create_edge_case_tests() -> TestSuite {
    let mut suite = TestSuite::new("Edge Cases");

    suite.add_test(TestCase::should_succeed("empty_input", ""));
    suite.add_test(TestCase::should_succeed("only_whitespace", "   \n\t  "));
    suite.add_test(TestCase::should_succeed("blank_lines_between", "x = 1\n\n\ny = 2"));

    suite.add_test(TestCase::should_fail("unexpected_eol_after_operator", "1 +"));
    suite.add_test(TestCase::should_fail("unexpected_eol_in_parens", "1 + ("));

    let deep_parens = "(".repeat(100) + "1" + &")".repeat(100);
    suite.add_test(TestCase::should_succeed("deeply_nested_parens", &deep_parens));

    suite
}

fn create_operator_tests() -> TestSuite {
    let mut suite = TestSuite::new("Operator Tests");

    // A leading '+'/'-' gets an implicit zero left operand
    suite.add_test(TestCase::should_succeed("unary_minus", "- 5"));
    suite.add_test(TestCase::should_succeed("leading_plus", "+ 1"));
    suite.add_test(TestCase::should_succeed("double_minus", "1 -- 2")); // 1 - (0 - 2)
    suite.add_test(TestCase::should_succeed("mixed_unary", "1 +- 2"));

    suite.add_test(TestCase::should_fail("missing_right_operand", "1 +"));
    suite.add_test(TestCase::should_fail("lone_operator", "+"));
    suite.add_test(TestCase::should_fail("lone_star", "*"));

    suite.add_test(TestCase::should_succeed("comparison_equal", "1 == 2"));
    suite.add_test(TestCase::should_succeed("comparison_not_equal", "1 != 2"));
    suite.add_test(TestCase::should_succeed("comparison_less_equal", "1 <= 2"));
    suite.add_test(TestCase::should_succeed("comparison_greater_equal", "1 >= 2"));

    suite.add_test(TestCase::should_succeed("logical_keywords", "True and False or not True"));
    // '!' only exists as part of '!='
    suite.add_test(TestCase::should_fail("bare_bang", "! True"));
    suite.add_test(TestCase::should_fail("bang_between", "1 ! 2"));

    suite
}

fn create_indentation_tests() -> TestSuite {
    let mut suite = TestSuite::new("Indentation and Blocks");

    suite.add_test(TestCase::should_succeed("simple_if", "if True:\n    pass"));
    suite.add_test(TestCase::should_succeed("tab_indent", "if True:\n\tpass"));
    suite.add_test(TestCase::should_succeed(
        "if_elif_else",
        "if True:\n    pass\nelif False:\n    pass\nelse:\n    pass",
    ));
    suite.add_test(TestCase::should_succeed(
        "while_else",
        "while False:\n    pass\nelse:\n    pass",
    ));
    suite.add_test(TestCase::should_succeed(
        "nested_blocks",
        "if True:\n    while False:\n        break\nelse:\n    pass",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "missing_body",
        "if True:",
        "Expected an indented block",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "unindented_body",
        "if True:\npass",
        "Expected an indented block",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "inline_body",
        "if True: pass",
        "Expected end of line",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "top_level_indent",
        "    x = 1",
        "Unexpected indent",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "dangling_elif",
        "elif True:\n    pass",
        "'elif' without a matching 'if'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "dangling_else",
        "else:\n    pass",
        "'else' without a matching 'if' or 'while'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "elif_after_while",
        "while True:\n    pass\nelif False:\n    pass",
        "'elif' cannot follow 'while'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "else_after_else",
        "if True:\n    pass\nelse:\n    pass\nelse:\n    pass",
        "'else' cannot follow 'else'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_colon",
        "if True\n    pass",
        "Expected ':'",
    ));

    suite
}

fn create_literal_tests() -> TestSuite {
    let mut suite = TestSuite::new("Literal Tests");

    suite.add_test(TestCase::should_succeed("integer_literal", "42"));
    suite.add_test(TestCase::should_succeed("float_literal", "3.14"));
    suite.add_test(TestCase::should_succeed("double_quoted_string", "\"hello\""));
    suite.add_test(TestCase::should_succeed("single_quoted_string", "'hello'"));
    suite.add_test(TestCase::should_succeed("boolean_true", "True"));
    suite.add_test(TestCase::should_succeed("boolean_false", "False"));
    suite.add_test(TestCase::should_succeed("none_literal", "None"));
    suite.add_test(TestCase::should_succeed("string_escapes", "'a\\n\\t\\'b'"));
    // '42.' and '.5' are well-formed floats here
    suite.add_test(TestCase::should_succeed("trailing_dot_float", "42."));
    suite.add_test(TestCase::should_succeed("leading_dot_float", ".5"));

    suite.add_test(TestCase::should_fail_with_message(
        "multiple_dots",
        "3.14.159",
        "multiple dots",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "lone_dot",
        ".",
        "dot not followed by digit",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "unterminated_string",
        "\"hello",
        "Unterminated string",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "bad_escape",
        "'a\\qb'",
        "Invalid escape sequence",
    ));

    suite
}

fn create_statement_tests() -> TestSuite {
    let mut suite = TestSuite::new("Statement Tests");

    suite.add_test(TestCase::should_succeed("simple_assignment", "x = 1"));
    suite.add_test(TestCase::should_succeed("assignment_with_expression", "x = 1 + 2"));
    suite.add_test(TestCase::should_succeed("semicolon_separated", "x = 5; y = 6"));
    suite.add_test(TestCase::should_succeed("print_parenthesized", "print(5)"));
    suite.add_test(TestCase::should_succeed("print_bare", "print 5"));
    suite.add_test(TestCase::should_succeed("pass_statement", "pass"));
    suite.add_test(TestCase::should_succeed("break_statement", "break"));
    suite.add_test(TestCase::should_succeed("debug_directive", "debug 1"));
    // Without the space it is just an identifier, not a directive
    suite.add_test(TestCase::should_succeed("debug1_is_an_identifier", "debug1 = 5"));

    suite.add_test(TestCase::should_fail("missing_value", "x ="));
    suite.add_test(TestCase::should_fail_with_message(
        "invalid_target",
        "1 = x",
        "Invalid assignment target",
    ));
    suite.add_test(TestCase::should_fail("empty_print", "print()"));
    suite.add_test(TestCase::should_fail_with_message(
        "exit_in_script",
        "exit",
        "interactive",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "bad_debug_directive",
        "debug 2",
        "debug directive",
    ));

    suite
}

fn create_positive_tests() -> TestSuite {
    let mut suite = TestSuite::new("Positive Tests");

    suite.add_test(TestCase::should_succeed("simple_arithmetic", "1 + 2 * 3"));
    suite.add_test(TestCase::should_succeed("parentheses", "(1 + 2) * 3"));
    suite.add_test(TestCase::should_succeed("string_concatenation", "\"hello\" + \" world\""));
    suite.add_test(TestCase::should_succeed("boolean_operations", "True and False"));
    suite.add_test(TestCase::should_succeed("comparison_chain", "1 < 2 and 3 > 2"));
    suite.add_test(TestCase::should_succeed(
        "counting_loop",
        "i = 0\nwhile i < 3:\n    print(i)\n    i = i + 1",
    ));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_parser_tests() {
    let mut all_passed = true;

    let suites = vec![
        create_malformed_expressions_tests(),
        create_edge_case_tests(),
        create_operator_tests(),
        create_indentation_tests(),
        create_literal_tests(),
        create_statement_tests(),
        create_positive_tests(),
    ];

    for suite in suites {
        let results = suite.run();
        if !results.is_all_passed() {
            all_passed = false;
        }
    }

    assert!(all_passed, "Some parser robustness tests failed; see output above");
}
