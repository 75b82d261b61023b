//! C15 — the schema checker: field-matching between a producer's
//! output schema and a consumer's input schema, with a runtime
//! coercion helper the executor (C17) reuses for type-mismatched
//! mappings (§4.14).

use forge_core::RestrictedSchema;
use serde_json::Value;
use std::collections::HashSet;

/// Levenshtein edit distance on bytes-as-chars; small fields only, so
/// no need for the adaptive budget `forge-nlp` uses for free text.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, val) in dp[0].iter_mut().enumerate() {
        *val = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1).min(dp[i][j - 1] + 1).min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}

/// Cross-type coercions the runtime can perform (§4.14):
/// number<->string, boolean<->string, boolean<->number. Identical
/// types are always "compatible" via the exact-match tier, handled by
/// the caller before this is consulted.
fn types_coercible(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let coercible_pair = |a: &str, b: &str| -> bool {
        matches!(
            (a, b),
            ("number", "string")
                | ("boolean", "string")
                | ("boolean", "number")
                | ("integer", "string")
                | ("boolean", "integer")
        )
    };
    coercible_pair(a, b) || coercible_pair(b, a)
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldMatch {
    pub target_field: String,
    pub source_field: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompatibilityReport {
    pub compatible: bool,
    pub score: f64,
    pub matched_fields: Vec<FieldMatch>,
    pub unmatched_required: Vec<String>,
}

/// Match each field of `input_schema` against an unused field of
/// `output_schema`, preferring (a) exact name + exact type (1.0) over
/// (b) compatible type + Levenshtein <= 3 on name (0.8) over (c)
/// compatible type alone (0.5). Every source field can satisfy at most
/// one target field (§4.14).
pub fn check_schema_compatibility(
    output_schema: &RestrictedSchema,
    input_schema: &RestrictedSchema,
) -> CompatibilityReport {
    let mut used_sources: HashSet<String> = HashSet::new();
    let mut matched_fields = Vec::new();
    let mut unmatched_required = Vec::new();

    // Stable order: required fields first (since they drive the score
    // and the `unmatched_required` outcome), then the rest.
    let mut target_names: Vec<&String> = input_schema.properties.keys().collect();
    target_names.sort_by_key(|name| (!input_schema.required.contains(*name), (*name).clone()));

    for target_name in target_names {
        let target_field = &input_schema.properties[target_name];
        let is_required = input_schema.required.contains(target_name);

        let mut best: Option<(f64, String)> = None;
        for (source_name, source_field) in &output_schema.properties {
            if used_sources.contains(source_name) {
                continue;
            }
            let confidence = if source_name == target_name && source_field.field_type == target_field.field_type {
                Some(1.0)
            } else if types_coercible(&source_field.field_type, &target_field.field_type)
                && edit_distance(source_name, target_name) <= 3
            {
                Some(0.8)
            } else if types_coercible(&source_field.field_type, &target_field.field_type) {
                Some(0.5)
            } else {
                None
            };
            if let Some(confidence) = confidence {
                if best.as_ref().map(|(b, _)| confidence > *b).unwrap_or(true) {
                    best = Some((confidence, source_name.clone()));
                }
            }
        }

        match best {
            Some((confidence, source_name)) => {
                used_sources.insert(source_name.clone());
                matched_fields.push(FieldMatch {
                    target_field: target_name.clone(),
                    source_field: source_name,
                    confidence,
                });
            }
            None if is_required => unmatched_required.push(target_name.clone()),
            None => {}
        }
    }

    let total_required = input_schema.required.len();
    let matched_required = input_schema
        .required
        .iter()
        .filter(|r| matched_fields.iter().any(|m| &m.target_field == *r))
        .count();
    let score = if total_required == 0 {
        if matched_fields.is_empty() { 0.0 } else { 1.0 }
    } else {
        matched_required as f64 / total_required as f64
    };

    // Stable ordering: descending confidence (§8 property 8).
    matched_fields.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal));

    CompatibilityReport {
        compatible: score > 0.0 && unmatched_required.is_empty(),
        score,
        matched_fields,
        unmatched_required,
    }
}

/// Runtime coercion of a value from `src_type` to `tgt_type` (§4.14).
/// Numeric targets parse via base-10 (`NaN` folds to `0`); boolean
/// targets apply truthiness; string targets use canonical
/// stringification.
pub fn coerce_value(value: &Value, tgt_type: &str) -> Value {
    match tgt_type {
        "number" | "integer" => {
            let n = match value {
                Value::Number(n) => n.as_f64().unwrap_or(0.0),
                Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
                Value::Bool(b) => {
                    if *b {
                        1.0
                    } else {
                        0.0
                    }
                }
                _ => 0.0,
            };
            serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Number(0.into()))
        }
        "boolean" => Value::Bool(is_truthy(value)),
        "string" => Value::String(canonical_string(value)),
        _ => value.clone(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty() && s != "0" && s.to_lowercase() != "false",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn canonical_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
