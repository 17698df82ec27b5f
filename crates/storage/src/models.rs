use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One bookmarked target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub open_count: u64,
    /// `None` means the link was never opened.
    #[serde(
        default,
        with = "opened_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_opened: Option<DateTime<Utc>>,
}

impl Link {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: String::new(),
            comment: String::new(),
            tags: Vec::new(),
            labels: BTreeMap::new(),
            open_count: 0,
            last_opened: None,
        }
    }

    pub fn record_open(&mut self, at: DateTime<Utc>) {
        self.open_count = self.open_count.saturating_add(1);
        self.last_opened = Some(at);
    }
}

/// The entire persisted universe of links, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

impl Store {
    pub fn new(links: Vec<Link>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn append(&mut self, link: Link) {
        self.links.push(link);
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.links.iter().any(|l| l.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.id == id)
    }

    /// Bumps usage stats of the link with `id` and returns it, if present.
    pub fn record_open(&mut self, id: &str, at: DateTime<Utc>) -> Option<&Link> {
        let link = self.find_mut(id)?;
        link.record_open(at);
        Some(&*link)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// RFC 3339 timestamps. Absent, `null`, empty, and the year-1 zero time
/// written by older tooling all read as "never opened".
mod opened_at {
    use super::*;
    use chrono::{Datelike, SecondsFormat};
    use serde::de::Error;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Ok(None),
        };
        let ts = DateTime::parse_from_rfc3339(raw.trim())
            .map_err(D::Error::custom)?
            .with_timezone(&Utc);
        if ts.year() <= 1 {
            return Ok(None);
        }
        Ok(Some(ts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reads_documents_with_null_collections_and_zero_time() {
        let raw = r#"{
            "links": [{
                "id": "1700000000000000000",
                "url": "https://go.dev/blog",
                "title": "Go Blog",
                "comment": "",
                "tags": null,
                "labels": null,
                "open_count": 3,
                "last_opened": "0001-01-01T00:00:00Z"
            }]
        }"#;
        let store: Store = serde_json::from_str(raw).unwrap();
        let link = &store.links()[0];
        assert!(link.tags.is_empty());
        assert!(link.labels.is_empty());
        assert_eq!(link.open_count, 3);
        assert_eq!(link.last_opened, None);
    }

    #[test]
    fn offsets_normalize_to_utc() {
        let raw = r#"{"id":"1","url":"u","last_opened":"2025-03-01T10:00:00+02:00"}"#;
        let link: Link = serde_json::from_str(raw).unwrap();
        assert_eq!(
            link.last_opened,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn never_opened_is_omitted_on_write() {
        let json = serde_json::to_string(&Link::new("1", "https://example.com")).unwrap();
        assert!(!json.contains("last_opened"));
        assert!(json.contains(r#""labels":{}"#));
        assert!(json.contains(r#""tags":[]"#));
    }

    #[test]
    fn record_open_updates_only_the_matching_link() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let mut store = Store::new(vec![Link::new("a", "u1"), Link::new("b", "u2")]);
        let updated = store.record_open("b", at).unwrap();
        assert_eq!(updated.id, "b");
        assert_eq!(updated.open_count, 1);
        assert!(store.record_open("missing", at).is_none());
        assert_eq!(store.links()[0].open_count, 0);
        assert_eq!(store.links()[1].open_count, 1);
        assert_eq!(store.links()[1].last_opened, Some(at));
    }
}
