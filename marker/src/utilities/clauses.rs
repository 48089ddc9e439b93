//! Table-driven template selection.
//!
//! Every sentence (or sentence fragment) the heuristic grader writes comes from a
//! [`Clause`]: an ordered list of `(gate, text)` pairs plus a fallback. The first gate
//! that holds for the [`GradingContext`] picks the text. Keeping the branches in data
//! means each clause can be audited and tested on its own, and the thresholds used by
//! the prose always match the ones used by the scores.

use crate::scorer::GradingContext;

/// Predicate over the grading context.
pub type Gate = fn(&GradingContext) -> bool;

/// One conditional piece of template text.
#[derive(Clone, Copy)]
pub struct Clause {
    pub when: &'static [(Gate, &'static str)],
    /// Used when no gate holds. An empty string drops the clause from [`render`].
    pub otherwise: &'static str,
}

impl Clause {
    /// Unconditional text, for the fixed words between gated fragments.
    pub const fn text(text: &'static str) -> Self {
        Self {
            when: &[],
            otherwise: text,
        }
    }

    pub fn pick(&self, ctx: &GradingContext) -> &'static str {
        self.when
            .iter()
            .find(|(gate, _)| gate(ctx))
            .map(|(_, text)| *text)
            .unwrap_or(self.otherwise)
    }
}

/// Picks every clause in order and joins the non-empty ones with single spaces.
pub fn render(clauses: &[Clause], ctx: &GradingContext) -> String {
    clauses
        .iter()
        .map(|clause| clause.pick(ctx))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_ESSAY: Clause = Clause {
        when: &[
            (|c: &GradingContext| c.features.word_count > 500, "Long."),
            (|c: &GradingContext| c.features.word_count > 300, "Medium."),
        ],
        otherwise: "Short.",
    };

    const ONLY_WITH_EVIDENCE: Clause = Clause {
        when: &[(|c: &GradingContext| c.features.has_evidence, "Evidence.")],
        otherwise: "",
    };

    fn ctx(answer: &str) -> GradingContext {
        GradingContext::new("Write an essay.", answer)
    }

    #[test]
    fn first_matching_gate_wins() {
        let words = vec!["word"; 600].join(" ");
        assert_eq!(LONG_ESSAY.pick(&ctx(&words)), "Long.");
        let words = vec!["word"; 400].join(" ");
        assert_eq!(LONG_ESSAY.pick(&ctx(&words)), "Medium.");
    }

    #[test]
    fn fallback_used_when_no_gate_holds() {
        assert_eq!(LONG_ESSAY.pick(&ctx("tiny")), "Short.");
    }

    #[test]
    fn fixed_text_joins_gated_fragments() {
        let table = [Clause::text("The essay is"), LONG_ESSAY];
        assert_eq!(render(&table, &ctx("tiny")), "The essay is Short.");
    }

    #[test]
    fn render_skips_empty_clauses() {
        let table = [LONG_ESSAY, ONLY_WITH_EVIDENCE];
        assert_eq!(render(&table, &ctx("tiny")), "Short.");
        assert_eq!(render(&table, &ctx("tiny because")), "Short. Evidence.");
    }
}
