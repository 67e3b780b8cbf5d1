//! Validated user input on top of a [`Console`]
//!
//! Every prompt loops until it gets acceptable input. The only way out of a
//! loop without a value is the end of input, reported as
//! [`ApplicationError::InputClosed`].

use std::ops::RangeInclusive;

use itertools::Itertools;
use tracing::trace;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::NodeKind;
use crate::infrastructure::traits::Console;

const INPUT_MARKER: &str = "Enter:";
const YES_NO: [&str; 2] = ["yes", "no"];

/// Constraint for numeric input: an allowed set and an optional excluded set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberRule {
    allowed: Allowed,
    excluded: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Allowed {
    #[default]
    Any,
    Range(RangeInclusive<i64>),
    OneOf(Vec<i64>),
}

impl NumberRule {
    pub fn any() -> Self {
        Self::default()
    }

    /// Closed interval `min..=max`.
    pub fn range(min: i64, max: i64) -> Self {
        Self {
            allowed: Allowed::Range(min..=max),
            excluded: Vec::new(),
        }
    }

    pub fn one_of(values: impl Into<Vec<i64>>) -> Self {
        Self {
            allowed: Allowed::OneOf(values.into()),
            excluded: Vec::new(),
        }
    }

    pub fn excluding(mut self, values: impl Into<Vec<i64>>) -> Self {
        self.excluded = values.into();
        self
    }

    pub fn accepts(&self, value: i64) -> bool {
        let allowed = match &self.allowed {
            Allowed::Any => true,
            Allowed::Range(range) => range.contains(&value),
            Allowed::OneOf(values) => values.contains(&value),
        };
        allowed && !self.excluded.contains(&value)
    }

    /// Lines explaining the constraint, shown after a rejected value.
    pub fn explain(&self) -> Vec<String> {
        let mut lines = vec!["Try again. The value must be an integer".to_string()];
        match &self.allowed {
            Allowed::Any => {}
            Allowed::Range(range) => {
                lines.push(format!("  and within ({} - {})", range.start(), range.end()))
            }
            Allowed::OneOf(values) => {
                lines.push(format!("  and one of ({})", values.iter().join(",")))
            }
        }
        if !self.excluded.is_empty() {
            lines.push(format!("  and not one of ({})", self.excluded.iter().join(",")));
        }
        lines
    }
}

impl From<&RangeInclusive<u32>> for NumberRule {
    fn from(range: &RangeInclusive<u32>) -> Self {
        Self::range(i64::from(*range.start()), i64::from(*range.end()))
    }
}

/// Prompt helpers over a console.
pub struct Prompter<C> {
    console: C,
    separator: String,
}

impl<C: Console> Prompter<C> {
    pub fn new(console: C, separator: impl Into<String>) -> Self {
        Self {
            console,
            separator: separator.into(),
        }
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Write one line of output.
    pub fn say(&mut self, line: impl AsRef<str>) -> ApplicationResult<()> {
        self.console
            .write_line(line.as_ref())
            .with_context("write to console")
    }

    /// Write a block of lines.
    pub fn say_all<I, S>(&mut self, lines: I) -> ApplicationResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    /// Visual break between editor steps.
    pub fn separator(&mut self) -> ApplicationResult<()> {
        let line = self.separator.clone();
        self.say(line)
    }

    /// Read a trimmed, non-empty line.
    pub fn line(&mut self) -> ApplicationResult<String> {
        loop {
            let raw = self
                .console
                .read_line(INPUT_MARKER)
                .with_context("read from console")?
                .ok_or(ApplicationError::InputClosed)?;

            let trimmed = raw.trim();
            if trimmed.is_empty() {
                self.say("Input cannot be empty. Try again!")?;
                continue;
            }
            trace!("input: {:?}", trimmed);
            return Ok(trimmed.to_string());
        }
    }

    /// Let the user pick one of `options` by typing it; returns its index.
    pub fn choose<S: AsRef<str>>(&mut self, options: &[S]) -> ApplicationResult<usize> {
        let names: Vec<&str> = options.iter().map(AsRef::as_ref).collect();
        let header = if names.len() > 1 {
            format!("Choose one of: {}", names.iter().join("|"))
        } else {
            format!("Enter command: {}", names.concat())
        };

        loop {
            self.say(&header)?;
            let input = self.line()?;
            if let Some(index) = names.iter().position(|name| *name == input) {
                return Ok(index);
            }
            self.say("Invalid choice. Try again!")?;
        }
    }

    /// Ask a yes/no question.
    pub fn confirm(&mut self, question: impl AsRef<str>) -> ApplicationResult<bool> {
        self.say(question)?;
        Ok(self.choose(&YES_NO)? == 0)
    }

    /// Let the user pick one of the offered type values.
    pub fn choose_kind<K: NodeKind>(&mut self, options: &[K]) -> ApplicationResult<K> {
        let names: Vec<&str> = options.iter().map(|k| k.name()).collect();
        let index = self.choose(&names)?;
        Ok(options[index])
    }

    /// Read an integer satisfying `rule`.
    pub fn number(&mut self, rule: &NumberRule) -> ApplicationResult<i64> {
        loop {
            self.say("Enter a number")?;
            let input = self.line()?;
            match input.parse::<i64>() {
                Ok(value) if rule.accepts(value) => return Ok(value),
                Ok(_) => self.say_all(rule.explain())?,
                Err(_) => self.say("Invalid number. Try again!")?,
            }
        }
    }

    /// Read a millimetre value within `range`.
    pub fn millimetres(&mut self, range: &RangeInclusive<u32>) -> ApplicationResult<u32> {
        let value = self.number(&NumberRule::from(range))?;
        u32::try_from(value).map_err(|e| ApplicationError::OperationFailed {
            context: format!("value {} does not fit into millimetres", value),
            source: Box::new(e),
        })
    }

    /// Read a 0-based index into a collection of `len` items.
    pub fn index(&mut self, len: usize, level: &str) -> ApplicationResult<usize> {
        let max = len.saturating_sub(1);
        self.say(format!("Enter the {} index from 0 to {}", level, max))?;
        let value = self.number(&NumberRule::range(0, max as i64))?;
        usize::try_from(value).map_err(|e| ApplicationError::OperationFailed {
            context: format!("index {} is negative", value),
            source: Box::new(e),
        })
    }
}
