//! DTOs for decoding Classify XML responses.
//!
//! Documents deserialize into these transport shapes first, then map into
//! domain records in one pass. Attribute fields use quick-xml's `@` prefix.

use serde::Deserialize;

use crate::domain::{ClassificationCode, LookupResult, SearchResult, WorkId};

/// `<response code="..."/>` envelope present in every well-formed answer.
#[derive(Debug, Deserialize)]
pub(super) struct ResponseDto {
    #[serde(rename = "@code", default)]
    pub(super) code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WorkDto {
    #[serde(rename = "@title", default)]
    pub(super) title: Option<String>,
    #[serde(rename = "@author", default)]
    pub(super) author: Option<String>,
    #[serde(rename = "@hyr", default)]
    pub(super) hyr: Option<String>,
    #[serde(rename = "@owi", default)]
    pub(super) owi: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WorksDto {
    #[serde(default)]
    pub(super) work: Vec<WorkDto>,
}

/// Root of a `title=` search answer.
#[derive(Debug, Deserialize)]
pub(super) struct SearchDocumentDto {
    #[serde(default)]
    pub(super) response: Option<ResponseDto>,
    #[serde(default)]
    pub(super) works: Option<WorksDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MostPopularDto {
    #[serde(rename = "@sfa", default)]
    pub(super) sfa: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct DdcDto {
    #[serde(rename = "mostPopular", default)]
    pub(super) most_popular: Vec<MostPopularDto>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RecommendationsDto {
    #[serde(default)]
    pub(super) ddc: Option<DdcDto>,
}

/// Root of an `owi=` lookup answer.
#[derive(Debug, Deserialize)]
pub(super) struct LookupDocumentDto {
    #[serde(default)]
    pub(super) response: Option<ResponseDto>,
    #[serde(default)]
    pub(super) work: Option<WorkDto>,
    #[serde(default)]
    pub(super) recommendations: Option<RecommendationsDto>,
}

fn required(value: Option<String>, attribute: &str) -> Result<String, String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_owned()),
        _ => Err(format!("work is missing its {attribute} attribute")),
    }
}

fn parse_year(hyr: Option<String>) -> Result<Option<i32>, String> {
    let Some(raw) = hyr else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| format!("hyr attribute is not a year: {trimmed}"))
}

impl WorkDto {
    fn work_id(owi: Option<String>) -> Result<WorkId, String> {
        let owi = required(owi, "owi")?;
        WorkId::new(owi).map_err(|err| err.to_string())
    }

    fn into_search_result(self) -> Result<SearchResult, String> {
        Ok(SearchResult {
            title: required(self.title, "title")?,
            author: self.author.unwrap_or_default().trim().to_owned(),
            year: parse_year(self.hyr)?,
            work_id: Self::work_id(self.owi)?,
        })
    }
}

impl SearchDocumentDto {
    pub(super) fn into_search_results(self) -> Result<Vec<SearchResult>, String> {
        if self.response.is_none() {
            return Err("document has no response element".to_owned());
        }
        self.works
            .unwrap_or_default()
            .work
            .into_iter()
            .map(WorkDto::into_search_result)
            .collect()
    }
}

impl LookupDocumentDto {
    pub(super) fn into_lookup_result(self) -> Result<LookupResult, String> {
        if self.response.is_none() {
            return Err("document has no response element".to_owned());
        }
        let work = self
            .work
            .ok_or_else(|| "document has no work element".to_owned())?;
        let sfa = self
            .recommendations
            .and_then(|recommendations| recommendations.ddc)
            .and_then(|ddc| ddc.most_popular.into_iter().next())
            .and_then(|most_popular| most_popular.sfa)
            .ok_or_else(|| "document has no mostPopular classification".to_owned())?;
        let classification = ClassificationCode::new(sfa).map_err(|err| err.to_string())?;

        Ok(LookupResult {
            title: required(work.title, "title")?,
            author: work.author.unwrap_or_default().trim().to_owned(),
            work_id: WorkDto::work_id(work.owi)?,
            classification,
        })
    }
}
