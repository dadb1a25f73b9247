//! Recording sink and fixture runner

use std::ops::ControlFlow;

use crate::common::{ExpectedEvent, Gen, TestCase};
use blacknot_config::{parse_with, ErrorKind, Event, ParseError, Position};

/// Owned event for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum E {
    Section(Vec<u8>),
    Entry(Vec<u8>, Vec<u8>, Vec<u8>),
    Error(ErrorKind, Position),
}

impl From<Event<'_>> for E {
    fn from(event: Event<'_>) -> Self {
        match event {
            Event::Section { name, .. } => E::Section(name.to_vec()),
            Event::Entry { section, name, value, .. } => {
                E::Entry(section.to_vec(), name.to_vec(), value.to_vec())
            }
            Event::Error(error) => E::Error(error.kind, error.position),
        }
    }
}

impl From<&ExpectedEvent> for E {
    fn from(event: &ExpectedEvent) -> Self {
        match event {
            ExpectedEvent::Section(name) => E::Section(name.as_bytes().to_vec()),
            ExpectedEvent::Entry(section, name, value) => E::Entry(
                section.as_bytes().to_vec(),
                name.as_bytes().to_vec(),
                value.as_bytes().to_vec(),
            ),
        }
    }
}

/// Events and outcome of one parse
#[derive(Debug)]
pub struct Recorded {
    pub events: Vec<E>,
    pub result: Result<(), ParseError>,
}

impl Recorded {
    /// Events other than the trailing error
    pub fn tokens(&self) -> Vec<E> {
        self.events.iter().filter(|e| !matches!(e, E::Error(..))).cloned().collect()
    }

    pub fn error(&self) -> Option<(ErrorKind, Position)> {
        self.events.iter().find_map(|e| match e {
            E::Error(kind, pos) => Some((*kind, *pos)),
            _ => None,
        })
    }

    pub fn error_count(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, E::Error(..))).count()
    }
}

/// Parse `input`, recording every event
pub fn collect(input: &[u8]) -> Recorded {
    let mut events = Vec::new();
    let result = parse_with(input, |event| {
        events.push(E::from(event));
        ControlFlow::Continue(())
    });
    Recorded { events, result }
}

fn describe(events: &[E]) -> Vec<String> {
    events
        .iter()
        .map(|e| match e {
            E::Section(name) => format!("Section {:?}", String::from_utf8_lossy(name)),
            E::Entry(section, name, value) => format!(
                "Entry {:?} {:?} {:?}",
                String::from_utf8_lossy(section),
                String::from_utf8_lossy(name),
                String::from_utf8_lossy(value)
            ),
            E::Error(kind, pos) => format!("Error {:?} at {}", kind, pos),
        })
        .collect()
}

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: Vec<u8>,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub seed: u64,
    pub errors: Vec<String>,
}

fn check(case: &TestCase, input: Vec<u8>, seed: u64, exact_position: bool) -> TestResult {
    let recorded = collect(&input);
    let expected_tokens: Vec<E> = case.events.iter().map(E::from).collect();
    let actual_tokens = recorded.tokens();

    let mut errors = Vec::new();
    if actual_tokens != expected_tokens {
        errors.push("Token events differ".to_string());
    }

    match (&case.error, recorded.error()) {
        (None, None) => {
            if let Err(e) = &recorded.result {
                errors.push(format!("Unexpected failure: {}", e));
            }
        }
        (None, Some((kind, pos))) => errors.push(format!("Unexpected error {:?} at {}", kind, pos)),
        (Some(exp), None) => errors.push(format!("Missing error {}", exp.kind)),
        (Some(exp), Some((kind, pos))) => {
            if format!("{:?}", kind) != exp.kind {
                errors.push(format!("Expected error {}, got {:?}", exp.kind, kind));
            }
            let exp_pos = Position::new(exp.line, exp.column, exp.byte);
            if exact_position && pos != exp_pos {
                errors.push(format!("Expected error at {}, got {}", exp_pos, pos));
            }
            if recorded.result.as_ref().err().and_then(ParseError::kind) != Some(kind) {
                errors.push("Returned error differs from reported error".to_string());
            }
        }
    }
    if recorded.error_count() > 1 {
        errors.push(format!("{} error events", recorded.error_count()));
    }

    let mut expected = describe(&expected_tokens);
    if let Some(exp) = &case.error {
        expected.push(format!("Error {} at line {}, column {} (byte {})", exp.kind, exp.line, exp.column, exp.byte));
    }

    TestResult {
        passed: errors.is_empty(),
        input,
        expected,
        actual: describe(&recorded.events),
        seed,
        errors,
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    check(case, case.input.as_bytes().to_vec(), 0, true)
}

/// Run test with stochastic variations
///
/// - comments and blank lines above the case
/// - for cases that must pass, trailing whitespace or a comment below
///
/// Error positions shift with the preamble, so only the kind is checked.
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let mut input = gen.preamble();
    input.extend_from_slice(case.input.as_bytes());
    if case.error.is_none() {
        input.extend(gen.trailer());
    }
    check(case, input, gen.seed, false)
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set BLACKNOT_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput:");
        eprintln!("{}", String::from_utf8_lossy(&self.input));
        eprintln!("\nExpected events:");
        for (i, e) in self.expected.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nActual events:");
        for (i, e) in self.actual.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
