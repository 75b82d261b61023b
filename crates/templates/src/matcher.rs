//! C7 — the template matcher: IDF-weighted keyword overlap plus the
//! trigger/capability bonuses and the ambiguity guard (§4.6).

use crate::catalog::{self, CATALOG};
use forge_core::{ParsedIntent, TemplateDefinition, TemplateMatch, TriggerType};

const MIN_SCORE: f64 = 0.30;
const MIN_MARGIN: f64 = 0.05;
const TRIGGER_MATCH_BONUS: f64 = 0.2;
const TRIGGER_MISMATCH_PENALTY: f64 = 0.15;
const DATA_SOURCE_BONUS_PER_HIT: f64 = 0.1;
const DATA_SOURCE_BONUS_CAP: f64 = 0.2;
const ACTION_BONUS_PER_HIT: f64 = 0.05;
const ACTION_BONUS_CAP: f64 = 0.1;
const NEGATION_MULTIPLIER: f64 = 0.4;

/// A template keyword matches an intent keyword iff equal, a prefix of
/// the intent keyword, or the intent keyword is substring-contained
/// within the (possibly multi-word) template keyword. Only the prefix
/// direction is checked template->intent (so `"mint"` never matches
/// `"minute"`); the reverse containment direction is what lets a
/// multi-word template keyword like `"price feed"` match a bare
/// `"price"` intent keyword.
fn keyword_matches(template_kw: &str, intent_kw: &str) -> bool {
    template_kw == intent_kw || intent_kw.starts_with(template_kw) || template_kw.contains(intent_kw)
}

fn matched_keywords(template: &TemplateDefinition, intent_keywords: &[String]) -> Vec<String> {
    template
        .keywords
        .iter()
        .filter(|tk| intent_keywords.iter().any(|ik| keyword_matches(tk, ik)))
        .cloned()
        .collect()
}

fn score_template(template: &TemplateDefinition, intent: &ParsedIntent) -> (f64, Vec<String>) {
    let matched = matched_keywords(template, &intent.keywords);

    let total_idf: f64 = template.keywords.iter().map(|k| catalog::idf(k)).sum();
    let matched_idf: f64 = matched.iter().map(|k| catalog::idf(k)).sum();
    let base = if total_idf > 0.0 { matched_idf / total_idf } else { 0.0 };

    let mut score = base;
    if intent.trigger_type == template.expected_trigger {
        score += TRIGGER_MATCH_BONUS;
    } else if intent.trigger_type != TriggerType::Unknown {
        score -= TRIGGER_MISMATCH_PENALTY;
    }

    let data_source_hits = intent
        .data_sources
        .iter()
        .filter(|s| template.required_capabilities.iter().any(|c| c == *s))
        .count();
    score += (data_source_hits as f64 * DATA_SOURCE_BONUS_PER_HIT).min(DATA_SOURCE_BONUS_CAP);

    let action_hits = intent
        .actions
        .iter()
        .filter(|a| template.required_capabilities.iter().any(|c| c == *a))
        .count();
    score += (action_hits as f64 * ACTION_BONUS_PER_HIT).min(ACTION_BONUS_CAP);

    if intent.negated {
        score *= NEGATION_MULTIPLIER;
    }

    (score.clamp(0.0, 1.0), matched)
}

/// Score every catalog template against `intent` and return the
/// top-scoring one, provided its score clears `MIN_SCORE` and its
/// margin over the runner-up clears `MIN_MARGIN` (§4.6 ambiguity
/// guard). `force_template_id` bypasses scoring entirely, returning
/// confidence 1.0 iff the id exists in the catalog.
pub fn match_template(intent: &ParsedIntent, force_template_id: Option<u32>) -> Option<TemplateMatch> {
    if let Some(id) = force_template_id {
        let template = catalog::by_id(id)?;
        return Some(TemplateMatch {
            template_id: template.id,
            name: template.name.clone(),
            category: template.category.clone(),
            confidence: 1.0,
            matched_keywords: Vec::new(),
        });
    }

    let mut scored: Vec<(f64, Vec<String>, &TemplateDefinition)> = CATALOG
        .iter()
        .map(|t| {
            let (score, matched) = score_template(t, intent);
            (score, matched, t)
        })
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let (best_score, best_matched, best_template) = scored.first()?;
    let runner_up_score = scored.get(1).map(|(s, _, _)| *s).unwrap_or(0.0);

    if *best_score < MIN_SCORE || (best_score - runner_up_score) < MIN_MARGIN {
        return None;
    }

    Some(TemplateMatch {
        template_id: best_template.id,
        name: best_template.name.clone(),
        category: best_template.category.clone(),
        confidence: *best_score,
        matched_keywords: best_matched.clone(),
    })
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
