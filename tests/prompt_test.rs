//! Tests for validated console input

use std::collections::VecDeque;
use std::io;

use rstest::rstest;

use sitetree::application::{ApplicationError, NumberRule, Prompter};
use sitetree::domain::{FloorKind, NodeKind};
use sitetree::infrastructure::traits::Console;

/// Console replaying predetermined input lines and recording all output.
#[derive(Default)]
struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

fn prompter(lines: &[&str]) -> Prompter<ScriptedConsole> {
    let console = ScriptedConsole {
        input: lines.iter().map(|l| l.to_string()).collect(),
        output: Vec::new(),
    };
    Prompter::new(console, "---")
}

#[test]
fn given_padded_input_when_reading_line_then_trimmed() {
    let mut p = prompter(&["  \t", "  hello \r\n"]);

    assert_eq!(p.line().unwrap(), "hello");
    assert_eq!(
        p.into_console().output,
        vec!["Input cannot be empty. Try again!"]
    );
}

#[test]
fn given_single_option_when_choosing_then_asks_for_command() {
    let mut p = prompter(&["go"]);

    assert_eq!(p.choose(&["go"]).unwrap(), 0);
    assert_eq!(p.into_console().output, vec!["Enter command: go"]);
}

#[test]
fn given_kind_options_when_choosing_then_returns_kind_not_position() {
    let mut p = prompter(&["third"]);

    let kind = p
        .choose_kind(&[FloorKind::Third, FloorKind::Undefined])
        .unwrap();

    assert_eq!(kind, FloorKind::Third);
    assert_eq!(kind.name(), "third");
}

#[test]
fn given_yes_when_confirming_then_true() {
    let mut p = prompter(&["yes", "no"]);

    assert!(p.confirm("Proceed?").unwrap());
    assert!(!p.confirm("Again?").unwrap());
}

#[rstest]
#[case(NumberRule::range(1000, 5000), 1000, true)]
#[case(NumberRule::range(1000, 5000), 5000, true)]
#[case(NumberRule::range(1000, 5000), 999, false)]
#[case(NumberRule::one_of(vec![1, 3, 5]), 3, true)]
#[case(NumberRule::one_of(vec![1, 3, 5]), 2, false)]
#[case(NumberRule::range(0, 10).excluding(vec![4]), 4, false)]
#[case(NumberRule::any(), -7, true)]
fn given_rule_when_checking_then_accepts_only_permitted(
    #[case] rule: NumberRule,
    #[case] value: i64,
    #[case] expected: bool,
) {
    assert_eq!(rule.accepts(value), expected);
}

#[test]
fn given_rejected_value_when_reading_number_then_explains_constraints() {
    let rule = NumberRule::one_of(vec![1, 2]).excluding(vec![2]);
    let mut p = prompter(&["2", "1"]);

    assert_eq!(p.number(&rule).unwrap(), 1);
    let output = p.into_console().output;
    assert!(output.contains(&"Try again. The value must be an integer".to_string()));
    assert!(output.contains(&"  and one of (1,2)".to_string()));
    assert!(output.contains(&"  and not one of (2)".to_string()));
}

#[test]
fn given_closed_input_when_reading_then_input_closed_error() {
    let mut p = prompter(&[]);

    assert!(matches!(p.line(), Err(ApplicationError::InputClosed)));
}
