//! # Feedback Composer
//!
//! Writes the summary paragraph and the six feedback items (glow, glow, grow, grow,
//! think, think) from a [`GradingContext`].
//!
//! Every item is a sequence of [`Clause`]s: fixed connective text interleaved with
//! fragments whose wording is picked by the same thresholds the scorer uses. The
//! "think" items additionally branch on the essay-type flags, and the summary carries
//! one sentence for the first essay type the prompt matches.

use crate::scorer::GradingContext;
use crate::types::{FeedbackItem, FeedbackKind};
use crate::utilities::clauses::{Clause, Gate, render};

type Ctx = GradingContext;

const SUMMARY_OPENING: &[Clause] = &[Clause {
    when: &[
        (
            |c: &Ctx| c.total() > 35,
            "demonstrates strong understanding of the assignment prompt.",
        ),
        (
            |c: &Ctx| c.total() > 25,
            "shows adequate comprehension of the assignment prompt.",
        ),
    ],
    otherwise: "attempts to address the assignment prompt.",
}];

const ANALYSIS_SUMMARY: &[Clause] = &[
    Clause::text("The analytical approach"),
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_evidence,
            "effectively incorporates supporting evidence and",
        )],
        otherwise: "would benefit from more supporting evidence and",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.paragraph_count > 3,
            "maintains a logical structure.",
        )],
        otherwise: "needs more structured development.",
    },
];

const ARGUMENT_SUMMARY: &[Clause] = &[
    Clause::text("The argumentative stance"),
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_evidence,
            "is well-supported with evidence and",
        )],
        otherwise: "requires stronger supporting evidence and",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_structure,
            "follows a clear logical progression.",
        )],
        otherwise: "would benefit from a more organized approach.",
    },
];

const CREATIVE_SUMMARY: &[Clause] = &[
    Clause::text("The creative elements"),
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_creativity,
            "demonstrate originality and imagination while",
        )],
        otherwise: "could be further developed for greater impact while",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.sentence_count > 10,
            "using varied sentence structures.",
        )],
        otherwise: "relying on somewhat repetitive patterns.",
    },
];

const RESEARCH_SUMMARY: &[Clause] = &[
    Clause::text("The research components"),
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_evidence,
            "incorporate relevant data and citations and",
        )],
        otherwise: "lack sufficient evidence and citations and",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.paragraph_count > 4,
            "are presented in a well-structured format.",
        )],
        otherwise: "would benefit from better organization.",
    },
];

/// Checked in order; only the first matching essay type gets a sentence.
const ESSAY_TYPE_SUMMARIES: &[(Gate, &[Clause])] = &[
    (|c: &Ctx| c.features.is_analysis, ANALYSIS_SUMMARY),
    (|c: &Ctx| c.features.is_argumentative, ARGUMENT_SUMMARY),
    (|c: &Ctx| c.features.is_creative, CREATIVE_SUMMARY),
    (|c: &Ctx| c.features.is_research, RESEARCH_SUMMARY),
];

const SUMMARY_CLOSING: &[Clause] = &[
    Clause::text("Overall, this essay"),
    Clause {
        when: &[
            (
                |c: &Ctx| c.total() > 40,
                "exceeds expectations in multiple areas",
            ),
            (
                |c: &Ctx| c.total() > 30,
                "meets most of the key requirements",
            ),
            (
                |c: &Ctx| c.total() > 20,
                "partially fulfills the assignment requirements",
            ),
        ],
        otherwise: "falls short of meeting several key requirements",
    },
    Clause::text("and demonstrates"),
    Clause {
        when: &[
            (|c: &Ctx| c.total() > 35, "excellent"),
            (|c: &Ctx| c.total() > 25, "good"),
            (|c: &Ctx| c.total() > 15, "developing"),
        ],
        otherwise: "limited",
    },
    Clause::text("understanding of the subject matter. The writing"),
    Clause {
        when: &[(
            |c: &Ctx| c.scores.language > 7,
            "flows well with effective transitions and",
        )],
        otherwise: "would benefit from improved transitions and flow and",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.analysis > 7,
            "shows depth of critical thinking.",
        )],
        otherwise: "needs deeper analytical engagement.",
    },
    Clause::text("The essay"),
    Clause {
        when: &[(
            |c: &Ctx| c.features.word_count > 500,
            "provides substantial content and",
        )],
        otherwise: "would benefit from further development and elaboration and",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_structure,
            "maintains a coherent structure throughout.",
        )],
        otherwise: "requires better organizational framework.",
    },
    Clause::text("With"),
    Clause {
        when: &[
            (|c: &Ctx| c.total() > 35, "minor refinements,"),
            (|c: &Ctx| c.total() > 25, "targeted improvements,"),
        ],
        otherwise: "significant revisions,",
    },
    Clause::text("this essay could more effectively achieve its purpose and engage readers."),
];

const GLOW_ENGAGEMENT: &[Clause] = &[
    Clause::text("Your essay"),
    Clause {
        when: &[(
            |c: &Ctx| c.features.word_count > 400,
            "demonstrates substantial engagement with the topic and",
        )],
        otherwise: "attempts to address the key aspects of the prompt and",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_evidence,
            "effectively incorporates supporting evidence such as examples and explanations.",
        )],
        otherwise: "presents some initial ideas related to the topic.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.paragraph_count > 3,
            "The multi-paragraph structure helps organize your thoughts in a logical manner.",
        )],
        otherwise: "You've made an effort to structure your response with distinct points.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.sentence_count > 15,
            "Your varied sentence structures add rhythm to your writing.",
        )],
        otherwise: "Your writing style is straightforward and accessible.",
    },
];

const GLOW_CRAFT: &[Clause] = &[
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_structure,
            "Your use of transitional phrases and organizational markers helps guide the reader through your argument.",
        )],
        otherwise: "There are moments of clarity where your main points come through effectively.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.language > 7,
            "Your vocabulary choices are generally appropriate for academic writing and demonstrate good command of language.",
        )],
        otherwise: "You've attempted to use appropriate terminology related to the subject matter.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.content > 7,
            "Your engagement with the core concepts shows a solid understanding of the material.",
        )],
        otherwise: "You've identified some relevant concepts related to the topic.",
    },
];

const GROW_SUPPORT: &[Clause] = &[
    Clause::text("To strengthen your essay, consider"),
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_evidence,
            "incorporating more specific and varied evidence to support your claims.",
        )],
        otherwise: "adding concrete examples, data, or expert opinions to support your assertions.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.paragraph_count < 4,
            "Developing a more robust paragraph structure with clear topic sentences and supporting details would enhance the organization.",
        )],
        otherwise: "Ensuring each paragraph focuses on a single main idea with adequate development would improve clarity.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.analysis < 8,
            "Deeper analysis that explores implications, connections, and significance would elevate your critical thinking.",
        )],
        otherwise: "More explicit connections between your evidence and claims would strengthen your argument.",
    },
];

const GROW_DEVELOPMENT: &[Clause] = &[
    Clause::text("Your essay would benefit from"),
    Clause {
        when: &[(
            |c: &Ctx| c.features.word_count < 500,
            "greater development and elaboration of key points.",
        )],
        otherwise: "more focused development of fewer key points with greater depth.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.language < 8,
            "Working on sentence variety and precision in word choice would enhance readability.",
        )],
        otherwise: "Refining your transitions between ideas would improve the overall flow.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_structure,
            "While you have some organizational elements, creating a more deliberate structure with introduction, body, and conclusion would strengthen coherence.",
        )],
        otherwise: "Adding clear organizational markers and a more defined structure would help readers follow your thinking.",
    },
];

const THINK_PERSPECTIVE: &[Clause] = &[
    Clause::text("Consider how"),
    Clause {
        when: &[
            (
                |c: &Ctx| c.features.is_analysis,
                "alternative perspectives or counterarguments might strengthen your analysis.",
            ),
            (
                |c: &Ctx| c.features.is_argumentative,
                "acknowledging opposing viewpoints could strengthen your position.",
            ),
            (
                |c: &Ctx| c.features.is_creative,
                "varying your narrative techniques might enhance reader engagement.",
            ),
        ],
        otherwise: "different theoretical frameworks might offer new insights.",
    },
    Clause::text("What if you"),
    Clause {
        when: &[(
            |c: &Ctx| c.features.word_count < 400,
            "expanded your discussion to include broader implications or real-world applications?",
        )],
        otherwise: "focused more deeply on fewer points with more nuanced analysis?",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_evidence,
            "How might incorporating different types of evidence (statistical, anecdotal, expert testimony) create a more compelling argument?",
        )],
        otherwise: "How would specific examples or data points strengthen your key assertions?",
    },
    Clause::text("Exploring these dimensions could transform your essay from"),
    Clause {
        when: &[
            (|c: &Ctx| c.total() > 35, "excellent to exceptional."),
            (|c: &Ctx| c.total() > 25, "good to excellent."),
        ],
        otherwise: "adequate to compelling.",
    },
];

const THINK_AUDIENCE: &[Clause] = &[
    Clause::text("As you revise, reflect on how your essay"),
    Clause {
        when: &[
            (
                |c: &Ctx| c.features.is_research,
                "contributes to the broader scholarly conversation on this topic.",
            ),
            (
                |c: &Ctx| c.features.is_argumentative,
                "might persuade readers who initially disagree with your position.",
            ),
            (
                |c: &Ctx| c.features.is_analysis,
                "offers unique insights beyond surface-level observations.",
            ),
        ],
        otherwise: "engages readers on both intellectual and emotional levels.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.content < 8,
            "What additional content knowledge might you need to develop your ideas more fully?",
        )],
        otherwise: "How might you reorganize your existing knowledge to create more powerful insights?",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.language < 8,
            "How could more precise language choices and varied sentence structures enhance your expression?",
        )],
        otherwise: "How might you further refine your voice to better connect with your intended audience?",
    },
    Clause::text("These considerations could elevate your writing from"),
    Clause {
        when: &[(
            |c: &Ctx| c.total() > 30,
            "meeting expectations to truly standing out.",
        )],
        otherwise: "developing to accomplished.",
    },
];

const FEEDBACK_ITEMS: [(FeedbackKind, &[Clause]); 6] = [
    (FeedbackKind::Glow, GLOW_ENGAGEMENT),
    (FeedbackKind::Glow, GLOW_CRAFT),
    (FeedbackKind::Grow, GROW_SUPPORT),
    (FeedbackKind::Grow, GROW_DEVELOPMENT),
    (FeedbackKind::Think, THINK_PERSPECTIVE),
    (FeedbackKind::Think, THINK_AUDIENCE),
];

/// The single-paragraph overall assessment.
pub fn compose_summary(ctx: &GradingContext) -> String {
    let mut sentences = vec![format!(
        "This {}-word essay {}",
        ctx.features.word_count,
        render(SUMMARY_OPENING, ctx)
    )];

    if let Some((_, clauses)) = ESSAY_TYPE_SUMMARIES.iter().find(|(gate, _)| gate(ctx)) {
        sentences.push(render(clauses, ctx));
    }

    sentences.push(render(SUMMARY_CLOSING, ctx));
    sentences.join(" ")
}

/// Exactly six items, ordered glow, glow, grow, grow, think, think.
pub fn compose_feedback(ctx: &GradingContext) -> Vec<FeedbackItem> {
    FEEDBACK_ITEMS
        .iter()
        .map(|(kind, clauses)| FeedbackItem::new(*kind, render(clauses, ctx)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(instructions: &str, answer: &str) -> GradingContext {
        GradingContext::new(instructions, answer)
    }

    #[test]
    fn feedback_has_six_items_in_fixed_order() {
        let kinds: Vec<FeedbackKind> = compose_feedback(&ctx("Write.", "Short."))
            .into_iter()
            .map(|item| item.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                FeedbackKind::Glow,
                FeedbackKind::Glow,
                FeedbackKind::Grow,
                FeedbackKind::Grow,
                FeedbackKind::Think,
                FeedbackKind::Think,
            ]
        );
    }

    #[test]
    fn weak_essay_summary() {
        let summary = compose_summary(&ctx("Write.", "Short."));
        assert_eq!(
            summary,
            "This 1-word essay attempts to address the assignment prompt. \
             Overall, this essay falls short of meeting several key requirements and \
             demonstrates limited understanding of the subject matter. The writing would \
             benefit from improved transitions and flow and needs deeper analytical \
             engagement. The essay would benefit from further development and elaboration \
             and requires better organizational framework. With significant revisions, \
             this essay could more effectively achieve its purpose and engage readers."
        );
    }

    #[test]
    fn first_matching_essay_type_gets_the_summary_sentence() {
        // Both analytical and argumentative; analysis wins.
        let summary = compose_summary(&ctx("Discuss and defend your position.", "Short."));
        assert!(summary.contains("The analytical approach would benefit from more supporting evidence"));
        assert!(!summary.contains("The argumentative stance"));

        let summary = compose_summary(&ctx("Research the data.", "Short."));
        assert!(summary.contains("The research components lack sufficient evidence and citations"));
    }

    #[test]
    fn think_items_follow_the_prompt_type() {
        let feedback = compose_feedback(&ctx("Write a story.", "Short."));
        assert!(feedback[4].content.starts_with(
            "Consider how varying your narrative techniques might enhance reader engagement."
        ));
        assert!(feedback[5].content.contains("engages readers on both intellectual"));

        let feedback = compose_feedback(&ctx("Argue a stance.", "Short."));
        assert!(feedback[4].content.contains("acknowledging opposing viewpoints"));
        assert!(feedback[5].content.contains("might persuade readers"));
    }

    #[test]
    fn glow_reflects_evidence_and_length() {
        let feedback = compose_feedback(&ctx("Write.", "Short."));
        assert_eq!(
            feedback[0].content,
            "Your essay attempts to address the key aspects of the prompt and presents some \
             initial ideas related to the topic. You've made an effort to structure your \
             response with distinct points. Your writing style is straightforward and accessible."
        );

        let long = vec!["evidence"; 450].join(" ");
        let feedback = compose_feedback(&ctx("Write.", &long));
        assert!(feedback[0].content.starts_with(
            "Your essay demonstrates substantial engagement with the topic and effectively incorporates"
        ));
    }

    #[test]
    fn composition_is_deterministic() {
        let c = ctx("Analyze the causes.", "First, because of data. In conclusion, novel.");
        assert_eq!(compose_summary(&c), compose_summary(&c));
        assert_eq!(compose_feedback(&c), compose_feedback(&c));
    }
}
