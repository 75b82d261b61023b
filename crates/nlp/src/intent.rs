//! C6 — the intent parser proper: wires the NLP micro-pipeline
//! (§4.5) into a single `parse` call producing a `ParsedIntent`.

use crate::{actions, chains, conditions, data_sources, entities, keywords, negation, schedule, trigger};
use forge_core::ParsedIntent;

/// Map free text to a `ParsedIntent`. Steps run in the §4.5 order:
/// normalize, keywords, negation, trigger classification, schedule,
/// conditions, chains, data sources (with entity disambiguation),
/// actions.
pub fn parse(prompt: &str) -> ParsedIntent {
    let normalized = keywords::normalize(prompt);
    let kws = keywords::extract_keywords(&normalized);
    let negated = negation::is_negated(&kws);

    let schedule = schedule::extract_schedule(&normalized);
    let (trigger_type, raw_confidence) = trigger::classify(&kws, schedule.is_some());
    let confidence = if negated {
        (raw_confidence * 0.4).clamp(0.0, 1.0)
    } else {
        raw_confidence.clamp(0.0, 1.0)
    };

    let conditions = conditions::extract_conditions(&normalized);
    let chains = chains::extract_chains(&normalized, &kws);
    let entities = entities::extract_entities(&normalized);
    let data_sources = data_sources::extract_data_sources(&normalized, &kws, &entities);
    let actions = actions::extract_actions(&normalized, &kws);

    ParsedIntent {
        trigger_type,
        confidence,
        schedule,
        data_sources,
        actions,
        chains,
        conditions,
        keywords: kws,
        negated,
        entities,
    }
}

#[cfg(test)]
#[path = "intent_tests.rs"]
mod tests;
