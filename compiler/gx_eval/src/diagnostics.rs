//! Optional performance counters for `--profile` instrumentation.

/// Evaluation counters.
///
/// Stored as `Option<EvalCounters>` on the evaluator. When `None`, all
/// counter increments are no-ops.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    /// Expressions whose value was requested, cached or not.
    pub expressions_forced: u64,
    /// Builtin bodies run after reaching full arity.
    pub builtin_calls: u64,
    /// Transport round trips.
    pub sends: u64,
}

impl EvalCounters {
    #[inline]
    pub fn count_force(&mut self) {
        self.expressions_forced = self.expressions_forced.wrapping_add(1);
    }

    #[inline]
    pub fn count_builtin_call(&mut self) {
        self.builtin_calls = self.builtin_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_send(&mut self) {
        self.sends = self.sends.wrapping_add(1);
    }

    /// Format a summary report.
    pub fn report(&self) -> String {
        format!(
            "Evaluation profile:\n  \
             Expressions forced: {}\n  \
             Builtin calls:      {}\n  \
             Sends:              {}",
            self.expressions_forced, self.builtin_calls, self.sends,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_every_counter() {
        let mut counters = EvalCounters::default();
        counters.count_force();
        counters.count_builtin_call();
        counters.count_send();
        let report = counters.report();
        assert!(report.contains("Expressions forced: 1"));
        assert!(report.contains("Builtin calls:      1"));
        assert!(report.contains("Sends:              1"));
    }
}
