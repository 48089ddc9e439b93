//! Rubric Parsers
//!
//! This module turns the two shapes a custom rubric arrives in into a validated [`RubricSpec`].
//!
//! # Request shape
//!
//! [`JsonRubricParser`] reads the flattened fields the grading form posts:
//!
//! ```json
//! {
//!   "categories": ["Task Fulfilment", "Structures, Lexis & Organisation"],
//!   "levels": ["C1+", "C1", "B2", "B1", "A2"],
//!   "bands": ["5", "4", "3", "2", "1"],
//!   "markRanges": ["55-60", "49-54", "37-48", "25-36", "0-24"],
//!   "categoryWeights": [30, 30],
//!   "criteriaMatrix": { "Task Fulfilment": { "C1+": "Fully achieves the task", "C1": "" } }
//! }
//! ```
//!
//! - `categories`, `levels` and `categoryWeights` are required. `weights` is accepted
//!   as an alias for `categoryWeights` and `matrix` for `criteriaMatrix`.
//! - Weights must be non-negative whole numbers (`30` or `30.0`).
//! - `null` entries in `bands`, `markRanges` and matrix cells are skipped.
//!
//! # Stored criteria rows
//!
//! [`CriteriaRubricParser`] rebuilds the matrix from the per-cell rows the rubric editor
//! stores (`category`, `level`, `band`, `mark_range`, `weight`, `description`, `order`).
//! Rows are read in `order`, and every distinct category, level, band and mark range keeps
//! the position of its first appearance. A category's weight comes from its first row.
//!
//! # Error Handling
//!
//! Shape errors are reported as [`MarkerError::InvalidJson`]; a well-formed rubric that
//! breaks the structural rules is reported by [`RubricSpec::validate`] as
//! [`MarkerError::MalformedRubric`].

use crate::error::MarkerError;
use crate::traits::parser::Parser;
use crate::types::{RubricCriterion, RubricSpec};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Parser for the rubric fields of a grading request.
pub struct JsonRubricParser;

/// Parser for stored rubric-criteria rows.
pub struct CriteriaRubricParser;

fn field<'v>(obj: &'v Map<String, Value>, names: &[&str]) -> Option<&'v Value> {
    names
        .iter()
        .find_map(|name| obj.get(*name))
        .filter(|v| !v.is_null())
}

fn string_list(
    obj: &Map<String, Value>,
    names: &[&str],
    required: bool,
) -> Result<Vec<String>, MarkerError> {
    let Some(value) = field(obj, names) else {
        return if required {
            Err(MarkerError::InvalidJson(format!(
                "Missing required '{}' field",
                names[0]
            )))
        } else {
            Ok(Vec::new())
        };
    };

    let arr = value.as_array().ok_or_else(|| {
        MarkerError::InvalidJson(format!("'{}' must be an array", names[0]))
    })?;

    let mut out = Vec::with_capacity(arr.len());
    for (i, item) in arr.iter().enumerate() {
        match item {
            Value::String(s) => out.push(s.clone()),
            Value::Null if !required => {}
            _ => {
                return Err(MarkerError::InvalidJson(format!(
                    "'{}' entry at index {} must be a string",
                    names[0], i
                )));
            }
        }
    }
    Ok(out)
}

/// Accepts `30` and `30.0`; rejects negatives and fractions.
fn whole_number(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    (f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then_some(f as u32)
}

fn weight_list(obj: &Map<String, Value>) -> Result<Vec<u32>, MarkerError> {
    let arr = field(obj, &["categoryWeights", "weights"])
        .ok_or_else(|| {
            MarkerError::InvalidJson("Missing required 'categoryWeights' field".to_string())
        })?
        .as_array()
        .ok_or_else(|| {
            MarkerError::InvalidJson("'categoryWeights' must be an array".to_string())
        })?;

    arr.iter()
        .enumerate()
        .map(|(i, v)| {
            whole_number(v).ok_or_else(|| {
                MarkerError::InvalidJson(format!(
                    "'categoryWeights' entry at index {} must be a non-negative whole number",
                    i
                ))
            })
        })
        .collect()
}

fn criteria_matrix(
    obj: &Map<String, Value>,
) -> Result<BTreeMap<String, BTreeMap<String, String>>, MarkerError> {
    let Some(value) = field(obj, &["criteriaMatrix", "matrix"]) else {
        return Ok(BTreeMap::new());
    };
    let rows = value.as_object().ok_or_else(|| {
        MarkerError::InvalidJson("'criteriaMatrix' must be an object".to_string())
    })?;

    let mut matrix = BTreeMap::new();
    for (category, row) in rows {
        let cells = row.as_object().ok_or_else(|| {
            MarkerError::InvalidJson(format!(
                "'criteriaMatrix' row '{}' must be an object",
                category
            ))
        })?;

        let mut parsed = BTreeMap::new();
        for (level, cell) in cells {
            match cell {
                Value::String(text) => {
                    parsed.insert(level.clone(), text.clone());
                }
                Value::Null => {}
                _ => {
                    return Err(MarkerError::InvalidJson(format!(
                        "'criteriaMatrix' cell '{}'/'{}' must be a string",
                        category, level
                    )));
                }
            }
        }
        matrix.insert(category.clone(), parsed);
    }
    Ok(matrix)
}

impl<'a> Parser<&'a Value, RubricSpec> for JsonRubricParser {
    /// Parses the rubric fields of a request body into a validated [`RubricSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::InvalidJson`] for shape errors and
    /// [`MarkerError::MalformedRubric`] for structural ones.
    fn parse(&self, raw: &'a Value) -> Result<RubricSpec, MarkerError> {
        let obj = raw.as_object().ok_or_else(|| {
            MarkerError::InvalidJson("Rubric must be a JSON object".to_string())
        })?;

        let spec = RubricSpec {
            categories: string_list(obj, &["categories"], true)?,
            levels: string_list(obj, &["levels"], true)?,
            bands: string_list(obj, &["bands"], false)?,
            mark_ranges: string_list(obj, &["markRanges"], false)?,
            weights: weight_list(obj)?,
            matrix: criteria_matrix(obj)?,
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Pushes `value` unless it is already present, preserving first-appearance order.
fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

impl<'a> Parser<&'a [RubricCriterion], RubricSpec> for CriteriaRubricParser {
    /// Rebuilds a [`RubricSpec`] from rubric-criteria rows.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::InvalidJson`] for a negative or fractional weight and
    /// [`MarkerError::MalformedRubric`] when the rebuilt rubric fails validation
    /// (for example, no rows at all).
    fn parse(&self, rows: &'a [RubricCriterion]) -> Result<RubricSpec, MarkerError> {
        let mut ordered: Vec<&RubricCriterion> = rows.iter().collect();
        // Stable sort: rows without an order keep their relative position at the end.
        ordered.sort_by_key(|row| row.order.unwrap_or(i64::MAX));

        let mut spec = RubricSpec::default();
        for row in &ordered {
            let is_new_category = !spec.categories.contains(&row.category);
            push_unique(&mut spec.categories, &row.category);
            push_unique(&mut spec.levels, &row.level);
            if let Some(band) = &row.band {
                push_unique(&mut spec.bands, band);
            }
            if let Some(range) = &row.mark_range {
                push_unique(&mut spec.mark_ranges, range);
            }

            if is_new_category {
                let weight = match row.weight {
                    None => 0,
                    Some(w) => whole_number(&Value::from(w)).ok_or_else(|| {
                        MarkerError::InvalidJson(format!(
                            "weight for category '{}' must be a non-negative whole number",
                            row.category
                        ))
                    })?,
                };
                spec.weights.push(weight);
            }

            let cells = spec.matrix.entry(row.category.clone()).or_default();
            if let Some(text) = &row.description {
                cells.entry(row.level.clone()).or_insert_with(|| text.clone());
            }
        }

        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_rubric() -> Value {
        json!({
            "rubricId": "r-1",
            "rubricName": "IELTS Writing",
            "categories": ["Task Fulfilment", "Structures, Lexis & Organisation"],
            "levels": ["C1+", "C1", "B2", "B1", "A2"],
            "bands": ["5", "4", "3", "2", "1"],
            "markRanges": ["55-60", "49-54", "37-48", "25-36", "0-24"],
            "categoryWeights": [30, 30.0],
            "criteriaMatrix": {
                "Task Fulfilment": { "C1+": "Fully achieves the task", "C1": "" },
                "Structures, Lexis & Organisation": { "A2": null }
            }
        })
    }

    fn row(category: &str, level: &str, weight: f64, order: i64, text: &str) -> RubricCriterion {
        RubricCriterion {
            category: category.into(),
            level: level.into(),
            band: None,
            mark_range: None,
            weight: Some(weight),
            description: Some(text.into()),
            order: Some(order),
        }
    }

    #[test]
    fn test_parse_request_rubric() {
        let spec = JsonRubricParser.parse(&request_rubric()).unwrap();
        assert_eq!(spec.categories.len(), 2);
        assert_eq!(spec.levels[0], "C1+");
        assert_eq!(spec.weights, vec![30, 30]);
        assert_eq!(spec.mark_ranges[4], "0-24");
        assert_eq!(spec.cell("Task Fulfilment", "C1+"), Some("Fully achieves the task"));
        assert_eq!(spec.cell("Task Fulfilment", "C1"), None);
        assert!(spec.matrix["Structures, Lexis & Organisation"].is_empty());
    }

    #[test]
    fn test_aliases_are_accepted() {
        let raw = json!({
            "categories": ["Content"],
            "levels": ["High", "Low"],
            "weights": [10],
            "matrix": { "Content": { "High": "Great" } }
        });
        let spec = JsonRubricParser.parse(&raw).unwrap();
        assert_eq!(spec.weights, vec![10]);
        assert_eq!(spec.cell("Content", "High"), Some("Great"));
    }

    #[test]
    fn test_missing_categories() {
        let raw = json!({ "levels": ["A"], "categoryWeights": [1] });
        let err = JsonRubricParser.parse(&raw).unwrap_err();
        assert_eq!(
            err,
            MarkerError::InvalidJson("Missing required 'categories' field".to_string())
        );
    }

    #[test]
    fn test_fractional_weight_is_invalid() {
        let mut raw = request_rubric();
        raw["categoryWeights"] = json!([30, 12.5]);
        let err = JsonRubricParser.parse(&raw).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidJson(_)));
    }

    #[test]
    fn test_weight_count_mismatch_is_malformed() {
        let mut raw = request_rubric();
        raw["categoryWeights"] = json!([30]);
        let err = JsonRubricParser.parse(&raw).unwrap_err();
        assert!(matches!(err, MarkerError::MalformedRubric(_)));
    }

    #[test]
    fn test_non_object_is_invalid() {
        let err = JsonRubricParser.parse(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidJson(_)));
    }

    #[test]
    fn test_criteria_rows_keep_first_appearance_order() {
        let rows = vec![
            row("Organisation", "B2", 20.0, 101, "Some paragraphs"),
            row("Task", "C1", 30.0, 0, "Full answer"),
            row("Task", "B2", 30.0, 1, "Mostly answered"),
            row("Organisation", "C1", 20.0, 100, "Clear paragraphs"),
        ];

        let spec = CriteriaRubricParser.parse(rows.as_slice()).unwrap();
        assert_eq!(spec.categories, vec!["Task", "Organisation"]);
        assert_eq!(spec.levels, vec!["C1", "B2"]);
        assert_eq!(spec.weights, vec![30, 20]);
        assert_eq!(spec.cell("Organisation", "C1"), Some("Clear paragraphs"));
        assert_eq!(spec.cell("Task", "B2"), Some("Mostly answered"));
    }

    #[test]
    fn test_category_without_weight_is_malformed() {
        let mut rows = vec![row("Task", "C1", 30.0, 0, "Full answer")];
        rows[0].weight = None;
        let err = CriteriaRubricParser.parse(rows.as_slice()).unwrap_err();
        assert!(matches!(err, MarkerError::MalformedRubric(_)));
    }

    #[test]
    fn test_no_rows_is_malformed() {
        let rows: Vec<RubricCriterion> = Vec::new();
        let err = CriteriaRubricParser.parse(rows.as_slice()).unwrap_err();
        assert!(matches!(err, MarkerError::MalformedRubric(_)));
    }
}
