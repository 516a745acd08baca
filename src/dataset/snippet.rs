//! Search snippet for dataset hits: which field matched, and with what.

use catalog_types::MatchedField;
use entity_profile::{SearchSnippet, SnippetValue};

/// Search document fields worth surfacing, with their display labels.
const FIELDS_TO_HIGHLIGHT: &[(&str, &str)] = &[
    ("fieldPaths", "column"),
    ("fieldDescriptions", "column description"),
    ("editedFieldDescriptions", "column description"),
    ("fieldTags", "column tag"),
    ("editedFieldTags", "column tag"),
    ("fieldGlossaryTerms", "column term"),
    ("editedFieldGlossaryTerms", "column term"),
    ("fieldLabels", "label"),
    ("description", "description"),
    ("editedDescription", "description"),
    ("tags", "tag"),
    ("glossaryTerms", "term"),
];

pub fn highlight_label(field_name: &str) -> Option<&'static str> {
    FIELDS_TO_HIGHLIGHT
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, label)| *label)
}

/// Snippet for the first highlightable matched field, if any.
pub fn dataset_search_snippet(matched_fields: &[MatchedField]) -> Option<SearchSnippet> {
    matched_fields.iter().find_map(|field| {
        let label = highlight_label(&field.name)?;
        Some(SearchSnippet {
            field_label: label.to_string(),
            value: field.value.clone(),
            value_kind: classify(&field.value),
        })
    })
}

fn classify(value: &str) -> SnippetValue {
    if value.contains("urn:li:tag") {
        SnippetValue::Tag(value.to_string())
    } else if value.contains("urn:li:glossaryTerm") {
        SnippetValue::GlossaryTerm(value.to_string())
    } else {
        SnippetValue::Text
    }
}
