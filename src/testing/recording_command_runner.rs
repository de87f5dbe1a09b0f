use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use crate::domain::AppError;
use crate::ports::CommandRunner;

/// Command runner that records invocations and returns canned output.
#[derive(Default)]
pub struct RecordingCommandRunner {
    available: BTreeSet<String>,
    outputs: HashMap<String, String>,
    pub calls: RefCell<Vec<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `program` as installed; its invocations print `stdout`.
    pub fn with_program(mut self, program: &str, stdout: &str) -> Self {
        self.available.insert(program.to_string());
        self.outputs.insert(program.to_string(), stdout.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, argv: &[String]) -> Result<String, AppError> {
        self.calls.borrow_mut().push(argv.to_vec());
        let program = argv.first().ok_or_else(|| AppError::config_error("empty command"))?;
        self.outputs.get(program).cloned().ok_or_else(|| AppError::CommandNotFound(program.clone()))
    }

    fn is_available(&self, program: &str) -> bool {
        self.available.contains(program)
    }
}
