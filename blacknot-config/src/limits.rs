//! Token buffer capacities.

/// Default maximum length of a section name.
pub const DEFAULT_MAX_SECTION_NAME: usize = 64;
/// Default maximum length of an entry name.
pub const DEFAULT_MAX_NAME: usize = 64;
/// Default maximum length of an (unescaped) entry value.
pub const DEFAULT_MAX_VALUE: usize = 1024;

/// Capacities of the parser's token buffers, in bytes.
///
/// A token of exactly the configured length is accepted; one byte more
/// is a `SizeViolation`. Value lengths count unescaped bytes, so `\"`
/// uses one byte of the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub section_name: usize,
    pub name: usize,
    pub value: usize,
}

impl Limits {
    /// The same capacity for all three buffers.
    pub fn uniform(max: usize) -> Self {
        Self {
            section_name: max,
            name: max,
            value: max,
        }
    }

    pub fn with_section_name(mut self, max: usize) -> Self {
        self.section_name = max;
        self
    }

    pub fn with_name(mut self, max: usize) -> Self {
        self.name = max;
        self
    }

    pub fn with_value(mut self, max: usize) -> Self {
        self.value = max;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            section_name: DEFAULT_MAX_SECTION_NAME,
            name: DEFAULT_MAX_NAME,
            value: DEFAULT_MAX_VALUE,
        }
    }
}
