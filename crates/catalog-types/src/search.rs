//! Search-result records.
//!
//! A search hit carries a narrower entity payload than the profile query plus
//! metadata only search produces (matched fields, ranking insights). The
//! search payload also carries the latest profile/operation points, which the
//! profile query does not fetch under those names.

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, DatasetProfile, Operation};

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<E> {
    pub entity: E,
    #[serde(default)]
    pub matched_fields: Vec<MatchedField>,
    #[serde(default)]
    pub insights: Vec<SearchInsight>,
}

/// A document field the query matched, with the matched value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInsight {
    pub text: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Dataset payload of a search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSearchEntity {
    #[serde(flatten)]
    pub dataset: Dataset,
    /// Latest profile first.
    #[serde(default)]
    pub last_profile: Option<Vec<DatasetProfile>>,
    /// Latest operation first.
    #[serde(default)]
    pub last_operation: Option<Vec<Operation>>,
}

impl DatasetSearchEntity {
    pub fn latest_row_count(&self) -> Option<i64> {
        self.last_profile
            .as_ref()
            .and_then(|series| series.first())
            .and_then(|p| p.row_count)
    }

    pub fn latest_update_ms(&self) -> Option<i64> {
        self.last_operation
            .as_ref()
            .and_then(|series| series.first())
            .and_then(|op| op.last_updated_timestamp)
    }
}

impl From<Dataset> for DatasetSearchEntity {
    fn from(dataset: Dataset) -> Self {
        Self {
            dataset,
            last_profile: None,
            last_operation: None,
        }
    }
}
