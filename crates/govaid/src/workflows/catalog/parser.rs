use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::schemes::{ApplicantRole, SchemeDraft};

pub(crate) fn parse_drafts<R: Read>(reader: R) -> Result<Vec<SchemeDraft>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut drafts = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        drafts.push(SchemeDraft {
            name: row.name,
            eligibility: row.eligibility.unwrap_or_default(),
            provider: row.provider.unwrap_or_default(),
            benefits: row.benefits.unwrap_or_default(),
            link: row.link.unwrap_or_default(),
            target_group: row.target_group,
        });
    }

    Ok(drafts)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    eligibility: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    provider: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    benefits: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    link: Option<String>,
    #[serde(deserialize_with = "target_group")]
    target_group: ApplicantRole,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn target_group<'de, D>(deserializer: D) -> Result<ApplicantRole, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    ApplicantRole::parse(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "unknown target group '{raw}', expected student or entrepreneur"
        ))
    })
}
