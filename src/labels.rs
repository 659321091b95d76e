//! Display labels for dataset columns and category values.
//!
//! The built-in tables translate the English column names used by the
//! annotation pipeline into Spanish display labels.

use std::collections::HashMap;

/// Emotion columns and their display labels, in report order.
pub const EMOTION_LABELS: &[(&str, &str)] = &[
    ("Anger", "Enojo"),
    ("Disgust", "Disgusto"),
    ("Fear", "Miedo"),
    ("Joy", "Felicidad"),
    ("Sadness", "Tristeza"),
    ("Surprise", "Sorpresa"),
    ("Neutral", "Neutral"),
    ("Anticipation", "Anticipación"),
    ("Trust", "Confianza"),
    ("Love", "Amor"),
    ("Submission", "Sumisión"),
    ("Awe", "Asombro"),
    ("Disapproval", "Desaprobación"),
    ("Remorse", "Remordimiento"),
    ("Contempt", "Desdén"),
    ("Agressiveness", "Agresividad"),
    ("Optimism", "Optimismo"),
    ("Guilt", "Culpa"),
    ("Curiosity", "Curiosidad"),
    ("Despair", "Desesperación"),
    ("Unbelief", "Incredulidad"),
    ("Envy", "Envidia"),
    ("Cynicism", "Cinismo"),
    ("Pride", "Orgullo"),
    ("Hope", "Esperanza"),
    ("Delight", "Deleite"),
    ("Sentimentality", "Sentimentalismo"),
    ("Shame", "Vergüenza"),
    ("Outrage", "Escándalo"),
    ("Pessimism", "Pesimismo"),
    ("Morbidness", "Morbosidad"),
    ("Dominance", "Dominio"),
    ("Anxiety", "Ansiedad"),
    ("Stress", "Estrés"),
    ("Stress_intens", "Estrés intenso"),
    ("Cognitive effort", "Esfuerzo Cognitivo"),
    ("Frustration", "Frustración"),
    ("Interest", "Interés"),
    ("Rejection", "Rechazo"),
    ("Commitment", "Compromiso"),
    ("Confusion", "Confusión"),
    ("Comprehension", "Comprensión"),
    ("Performance", "Desempeño"),
    ("Confidence 1", "Confianza 1"),
    ("Confidence 2", "Confianza 2"),
];

/// Valence columns and their display labels, in report order.
pub const VALENCE_LABELS: &[(&str, &str)] = &[
    ("Positive valence", "Valencia positiva"),
    ("Negative valence", "Valencia negativa"),
    ("Intensity", "Intensidad emocional"),
];

/// Default predominant-category column.
pub const PREDOMINANT_COLUMN: &str = "Predominant";

/// Default trend-category column.
pub const TREND_COLUMN: &str = "Trend";

/// Translation table from source names to display labels.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    labels: HashMap<String, String>,
}

impl LabelMap {
    /// Create an empty map; every lookup falls back to the source name.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in emotion and valence tables.
    pub fn builtin() -> Self {
        let mut map = Self::new();
        for (source, label) in EMOTION_LABELS.iter().chain(VALENCE_LABELS) {
            map.insert(*source, *label);
        }
        map
    }

    /// The built-in tables with user overrides applied on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut map = Self::builtin();
        for (source, label) in overrides {
            map.insert(source.as_str(), label.as_str());
        }
        map
    }

    /// Add or replace a label.
    pub fn insert(&mut self, source: &str, label: &str) {
        self.labels.insert(source.to_string(), label.to_string());
    }

    /// Display label for `source`, or `source` itself when unmapped.
    pub fn label<'a>(&'a self, source: &'a str) -> &'a str {
        self.labels.get(source).map(String::as_str).unwrap_or(source)
    }
}

/// Default emotion column order.
pub fn default_emotion_columns() -> Vec<String> {
    EMOTION_LABELS.iter().map(|(c, _)| c.to_string()).collect()
}

/// Default valence column order.
pub fn default_valence_columns() -> Vec<String> {
    VALENCE_LABELS.iter().map(|(c, _)| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_labels() {
        let map = LabelMap::builtin();
        assert_eq!(map.label("Joy"), "Felicidad");
        assert_eq!(map.label("Fear"), "Miedo");
        assert_eq!(map.label("Cognitive effort"), "Esfuerzo Cognitivo");
        assert_eq!(map.label("Intensity"), "Intensidad emocional");
        for (source, label) in EMOTION_LABELS.iter().chain(VALENCE_LABELS) {
            assert_eq!(map.label(source), *label);
        }
    }

    #[test]
    fn test_label_fallback() {
        let map = LabelMap::builtin();
        assert_eq!(map.label("Boredom"), "Boredom");
        assert_eq!(LabelMap::new().label("Joy"), "Joy");
    }

    #[test]
    fn test_overrides() {
        let overrides: HashMap<String, String> = [
            ("Joy".to_string(), "Alegría".to_string()),
            ("Boredom".to_string(), "Aburrimiento".to_string()),
        ]
        .into_iter()
        .collect();

        let map = LabelMap::with_overrides(&overrides);
        assert_eq!(map.label("Joy"), "Alegría");
        assert_eq!(map.label("Boredom"), "Aburrimiento");
        assert_eq!(map.label("Fear"), "Miedo");
    }

    #[test]
    fn test_default_columns_order() {
        let emotions = default_emotion_columns();
        assert_eq!(emotions.first().map(String::as_str), Some("Anger"));
        assert_eq!(emotions.last().map(String::as_str), Some("Confidence 2"));
        assert_eq!(
            default_valence_columns(),
            vec!["Positive valence", "Negative valence", "Intensity"]
        );
    }
}
