//! Workout plans - the parsed form of an uploaded workout document
//!
//! An uploaded document is a JSON object whose `step_<n>` keys describe the
//! routine's steps. Parsing turns it into a strongly-typed ordered mapping
//! validated to cover `1..=N` without gaps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkoutError};

const STEP_KEY_PREFIX: &str = "step_";

/// One unit of a workout routine, addressed by a 1-based contiguous index.
///
/// Immutable once loaded; optional fields absent from the document are
/// carried as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutStep {
    /// 1-based position within the routine.
    pub index: u32,

    /// Short display name of the exercise.
    #[serde(default)]
    pub title: String,

    /// Free-form instructions for the exercise.
    #[serde(default)]
    pub description: String,

    /// Media reference for the step card: an http(s) URL or a transport
    /// file id.
    #[serde(default)]
    pub image: String,
}

/// Fields of a step as they appear in the uploaded document.
#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
}

/// An ordered mapping from step index to step, contiguous from 1.
///
/// Looking up an absent index is the canonical "routine finished" signal,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    steps: BTreeMap<u32, WorkoutStep>,
}

impl WorkoutPlan {
    /// Parse an uploaded workout document.
    ///
    /// Keys without the `step_` prefix are ignored. A payload that is not a
    /// JSON object, a `step_` key with a non-numeric or zero suffix, a step
    /// value that is not an object of strings, or a gap in the index range
    /// all fail parsing; the caller keeps its previous plan in that case.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_slice(raw)?;
        let serde_json::Value::Object(entries) = document else {
            return Err(WorkoutError::NotAnObject);
        };

        let mut steps = BTreeMap::new();
        for (key, value) in entries {
            let Some(suffix) = key.strip_prefix(STEP_KEY_PREFIX) else {
                continue;
            };
            let index: u32 = suffix
                .parse()
                .ok()
                .filter(|index| *index >= 1)
                .ok_or_else(|| WorkoutError::InvalidStepKey(key.clone()))?;
            let raw_step: RawStep = serde_json::from_value(value)?;
            steps.insert(
                index,
                WorkoutStep {
                    index,
                    title: raw_step.title,
                    description: raw_step.description,
                    image: raw_step.image,
                },
            );
        }

        let total = steps.len() as u32;
        for index in 1..=total {
            if !steps.contains_key(&index) {
                return Err(WorkoutError::MissingStep {
                    missing: index,
                    total,
                });
            }
        }

        Ok(Self { steps })
    }

    /// Pure lookup of a step; `None` means the routine is complete.
    pub fn step(&self, index: u32) -> Option<&WorkoutStep> {
        self.steps.get(&index)
    }

    /// Number of steps in the routine.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Vec<u8> {
        json.as_bytes().to_vec()
    }

    #[test]
    fn parse_full_document() {
        let raw = doc(r#"{
            "step_1": {"title": "Warm up", "description": "Five minutes easy", "image": "https://example.com/warmup.jpg"},
            "step_2": {"title": "Squats", "description": "3x10", "image": "https://example.com/squats.jpg"}
        }"#);

        let plan = WorkoutPlan::parse(&raw).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.step(1).unwrap().title, "Warm up");
        assert_eq!(plan.step(2).unwrap().index, 2);
        assert!(plan.step(3).is_none());
    }

    #[test]
    fn absent_fields_become_empty_strings() {
        let raw = doc(r#"{"step_1": {"title": "Plank"}}"#);

        let plan = WorkoutPlan::parse(&raw).unwrap();
        let step = plan.step(1).unwrap();
        assert_eq!(step.title, "Plank");
        assert_eq!(step.description, "");
        assert_eq!(step.image, "");
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let raw = doc(r#"{"step_1": {"title": "Plank"}, "author": "coach"}"#);

        let plan = WorkoutPlan::parse(&raw).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn empty_document_parses_to_empty_plan() {
        let plan = WorkoutPlan::parse(b"{}").unwrap();
        assert!(plan.is_empty());
        assert!(plan.step(1).is_none());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            WorkoutPlan::parse(b"not json"),
            Err(WorkoutError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_non_object_payload() {
        assert!(matches!(
            WorkoutPlan::parse(b"[1, 2, 3]"),
            Err(WorkoutError::NotAnObject)
        ));
    }

    #[test]
    fn rejects_bad_step_keys() {
        assert!(matches!(
            WorkoutPlan::parse(br#"{"step_zero": {"title": "x"}}"#),
            Err(WorkoutError::InvalidStepKey(_))
        ));
        assert!(matches!(
            WorkoutPlan::parse(br#"{"step_0": {"title": "x"}}"#),
            Err(WorkoutError::InvalidStepKey(_))
        ));
    }

    #[test]
    fn rejects_non_object_step_value() {
        assert!(matches!(
            WorkoutPlan::parse(br#"{"step_1": "just a string"}"#),
            Err(WorkoutError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_gap_in_step_indices() {
        let raw = doc(r#"{"step_1": {"title": "a"}, "step_3": {"title": "c"}}"#);

        match WorkoutPlan::parse(&raw) {
            Err(WorkoutError::MissingStep { missing, total }) => {
                assert_eq!(missing, 2);
                assert_eq!(total, 2);
            }
            other => panic!("expected MissingStep, got {other:?}"),
        }
    }

    #[test]
    fn rejects_steps_not_starting_at_one() {
        let raw = doc(r#"{"step_2": {"title": "b"}}"#);

        assert!(matches!(
            WorkoutPlan::parse(&raw),
            Err(WorkoutError::MissingStep { missing: 1, .. })
        ));
    }

    #[test]
    fn serialization_round_trip() {
        let raw = doc(r#"{"step_1": {"title": "a", "description": "d", "image": "i"}}"#);
        let plan = WorkoutPlan::parse(&raw).unwrap();

        let json = serde_json::to_string(&plan).unwrap();
        let restored: WorkoutPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, restored);
    }
}
