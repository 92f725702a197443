/// A non-fatal diagnostic raised during rewriting.
#[derive(Clone, Debug, PartialEq)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

impl Warning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Warning {
        Warning {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Where rewrite passes report warnings. Takes &self so sinks can be shared
/// read-only across an entire pipeline invocation.
pub trait WarningSink {
    fn warn(&self, warning: Warning);
}

pub struct NoopWarningSink;

impl WarningSink for NoopWarningSink {
    fn warn(&self, _warning: Warning) {}
}
