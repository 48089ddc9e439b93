//! # Rubric Assembly
//!
//! Packages the heuristic sub-scores into rubric line items.
//!
//! Two layouts are supported:
//! - [`assemble_fixed`]: the five built-in categories (ids 1..5, 10 marks each), with
//!   the three-tier "Below/Meets/Exceeds expectations" level.
//! - [`assemble_weighted`]: a user-defined [`RubricSpec`]. Each category is mapped to a
//!   heuristic dimension by name, scaled to its declared weight, and labelled with one
//!   of the rubric's own levels. The rubric's matrix text is used as the description
//!   when the editor filled that cell in.
//!
//! Descriptions are written from the clause tables below. Each table gates its
//! sentences on the same thresholds the scorer and level use, so the prose never
//! contradicts the number next to it.

use crate::scorer::{GradingContext, MAX_SCORE, level_index, weighted_score};
use crate::types::{Dimension, Level, RubricLineItem, RubricSpec};
use crate::utilities::clauses::{Clause, render};
use tracing::debug;

type Ctx = GradingContext;

const CONTENT: &[Clause] = &[
    Clause {
        when: &[
            (
                |c: &Ctx| c.scores.content > 7,
                "This essay effectively addresses the assignment prompt.",
            ),
            (
                |c: &Ctx| c.scores.content > 5,
                "This essay adequately addresses the assignment prompt.",
            ),
        ],
        otherwise: "This essay partially addresses the assignment prompt.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_evidence,
            "The use of supporting evidence demonstrates understanding.",
        )],
        otherwise: "The essay would benefit from more supporting evidence.",
    },
    Clause {
        when: &[
            (
                |c: &Ctx| c.features.word_count > 500,
                "The substantial content allows for thorough exploration of ideas.",
            ),
            (
                |c: &Ctx| c.features.word_count > 300,
                "The content covers basic requirements but could be further developed.",
            ),
        ],
        otherwise: "The limited content restricts full exploration of the topic.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.content > 7,
            "Key concepts are accurately explained and applied.",
        )],
        otherwise: "Some key concepts are present but not fully developed.",
    },
    Clause {
        when: &[
            (
                |c: &Ctx| c.features.is_research && c.features.has_evidence,
                "Research elements are incorporated effectively.",
            ),
            (
                |c: &Ctx| c.features.is_research,
                "More research elements should be incorporated.",
            ),
        ],
        otherwise: "",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.content > 7,
            "The essay maintains focus throughout.",
        )],
        otherwise: "The essay occasionally strays from the main focus.",
    },
];

const ORGANIZATION: &[Clause] = &[
    Clause {
        when: &[
            (
                |c: &Ctx| c.scores.organization > 7,
                "The essay's structure effectively guides the reader through a logical progression of ideas.",
            ),
            (
                |c: &Ctx| c.scores.organization > 5,
                "The essay's structure provides a generally clear progression of ideas.",
            ),
        ],
        otherwise: "The essay's structure lacks clear organization and logical flow.",
    },
    Clause {
        when: &[
            (
                |c: &Ctx| c.features.paragraph_count > 4,
                "Multiple paragraphs are used effectively to separate and develop ideas.",
            ),
            (
                |c: &Ctx| c.features.paragraph_count > 2,
                "Basic paragraph structure is present but could be more developed.",
            ),
        ],
        otherwise: "Limited paragraph development hinders organization.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_structure,
            "Transitional phrases help connect ideas between sentences and paragraphs.",
        )],
        otherwise: "The essay would benefit from more transitional elements.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.organization > 7,
            "The introduction effectively establishes the essay's purpose and the conclusion provides meaningful closure.",
        )],
        otherwise: "The introduction and/or conclusion could be strengthened to better frame the essay.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.organization > 7,
            "Ideas flow naturally from one to the next.",
        )],
        otherwise: "Some abrupt transitions between ideas disrupt the flow.",
    },
];

const ANALYSIS: &[Clause] = &[
    Clause {
        when: &[
            (
                |c: &Ctx| c.scores.analysis > 7,
                "The essay demonstrates strong critical thinking skills.",
            ),
            (
                |c: &Ctx| c.scores.analysis > 5,
                "The essay demonstrates adequate critical thinking skills.",
            ),
        ],
        otherwise: "The essay demonstrates limited critical thinking skills.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_evidence,
            "Evidence is used to support claims and develop ideas.",
        )],
        otherwise: "Claims often lack supporting evidence.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.analysis > 7,
            "Complex ideas are explored with nuance and depth.",
        )],
        otherwise: "Ideas remain somewhat surface-level without deeper exploration.",
    },
    Clause {
        when: &[
            (
                |c: &Ctx| c.features.is_analysis && c.scores.analysis > 7,
                "Analytical approaches effectively break down concepts into components.",
            ),
            (
                |c: &Ctx| c.features.is_analysis,
                "Analysis attempts to break down concepts but lacks depth.",
            ),
        ],
        otherwise: "",
    },
    Clause {
        when: &[
            (
                |c: &Ctx| c.features.is_argumentative && c.scores.analysis > 7,
                "Arguments are logical and well-reasoned.",
            ),
            (
                |c: &Ctx| c.features.is_argumentative,
                "Arguments would benefit from stronger logical development.",
            ),
        ],
        otherwise: "",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.analysis > 7,
            "Connections between ideas reveal insightful understanding.",
        )],
        otherwise: "More explicit connections between ideas would strengthen the analysis.",
    },
];

const LANGUAGE: &[Clause] = &[
    Clause {
        when: &[
            (
                |c: &Ctx| c.scores.language > 7,
                "The writing style effectively communicates ideas with clarity and precision.",
            ),
            (
                |c: &Ctx| c.scores.language > 5,
                "The writing style adequately communicates ideas with general clarity.",
            ),
        ],
        otherwise: "The writing style struggles to clearly communicate ideas.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.sentence_count > 15,
            "Sentence structure is varied and generally effective.",
        )],
        otherwise: "Sentence structure tends to be repetitive.",
    },
    Clause {
        when: &[
            (
                |c: &Ctx| c.features.avg_sentence_length > 20.0,
                "Some sentences are overly complex and could be simplified.",
            ),
            (
                |c: &Ctx| c.features.avg_sentence_length < 10.0,
                "Sentences tend to be short and could be combined for better flow.",
            ),
        ],
        otherwise: "Sentence length is generally appropriate.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.language > 7,
            "Vocabulary choices are precise and appropriate for academic writing.",
        )],
        otherwise: "Vocabulary is basic and could be more precise.",
    },
    Clause {
        when: &[
            (
                |c: &Ctx| c.scores.language > 7,
                "Grammar and mechanics are strong with few errors.",
            ),
            (
                |c: &Ctx| c.scores.language > 5,
                "Some grammar and mechanical errors are present but don't significantly impede understanding.",
            ),
        ],
        otherwise: "Numerous grammar and mechanical errors distract from the content.",
    },
];

const CREATIVITY: &[Clause] = &[
    Clause {
        when: &[
            (
                |c: &Ctx| c.scores.creativity > 7,
                "The essay demonstrates original thinking and creative approaches.",
            ),
            (
                |c: &Ctx| c.scores.creativity > 5,
                "The essay shows some originality in approach or ideas.",
            ),
        ],
        otherwise: "The essay relies heavily on conventional approaches and ideas.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.features.has_creativity,
            "Creative elements enhance the effectiveness of the communication.",
        )],
        otherwise: "More creative approaches would strengthen engagement.",
    },
    Clause {
        when: &[
            (
                |c: &Ctx| c.features.is_creative && c.scores.creativity > 7,
                "Narrative techniques and creative elements are used effectively.",
            ),
            (
                |c: &Ctx| c.features.is_creative,
                "Creative elements are present but could be more fully developed.",
            ),
        ],
        otherwise: "",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.creativity > 7,
            "The writer's unique voice comes through clearly.",
        )],
        otherwise: "The writer's voice is still developing.",
    },
    Clause {
        when: &[(
            |c: &Ctx| c.scores.creativity > 7,
            "Innovative connections between ideas demonstrate intellectual curiosity.",
        )],
        otherwise: "More innovative thinking would elevate the essay beyond the conventional.",
    },
];

fn table(dimension: Dimension) -> &'static [Clause] {
    match dimension {
        Dimension::Content => CONTENT,
        Dimension::Organization => ORGANIZATION,
        Dimension::Analysis => ANALYSIS,
        Dimension::Language => LANGUAGE,
        Dimension::Creativity => CREATIVITY,
    }
}

/// The heuristic description of one dimension.
pub fn describe(dimension: Dimension, ctx: &GradingContext) -> String {
    render(table(dimension), ctx)
}

/// The five built-in rubric lines, in id order.
pub fn assemble_fixed(ctx: &GradingContext) -> Vec<RubricLineItem> {
    Dimension::ALL
        .iter()
        .map(|&dimension| {
            let score = ctx.scores.get(dimension);
            RubricLineItem {
                id: dimension.id(),
                title: dimension.title().to_string(),
                description: describe(dimension, ctx),
                level: Level::from_score(score).as_str().to_string(),
                score,
                max_score: MAX_SCORE,
            }
        })
        .collect()
}

/// Rubric lines for a user-defined rubric, which must already be validated.
pub fn assemble_weighted(ctx: &GradingContext, spec: &RubricSpec) -> Vec<RubricLineItem> {
    spec.categories
        .iter()
        .zip(&spec.weights)
        .enumerate()
        .map(|(index, (category, &weight))| {
            let dimension = Dimension::classify(category);
            let base = dimension.map_or_else(|| ctx.scores.mean(), |d| ctx.scores.get(d));
            debug!(category = %category, ?dimension, base, weight, "Scoring rubric category");

            let level = &spec.levels[level_index(base, spec.levels.len())];
            let description = match spec.cell(category, level) {
                Some(text) => text.to_string(),
                None => describe(dimension.unwrap_or(Dimension::Content), ctx),
            };

            RubricLineItem {
                id: index as u32 + 1,
                title: category.clone(),
                description,
                level: level.clone(),
                score: weighted_score(base, weight),
                max_score: weight,
            }
        })
        .collect()
}
