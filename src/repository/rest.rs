//! Supabase PostgREST adapter.
//!
//! Plugins cannot open sockets, so the remote backend is driven through the
//! host's `web_request`. This module is the pure half of that exchange:
//! [`RestClient::build`] turns a [`RepoRequest`] into an [`HttpRequest`] and
//! [`decode`] turns the host's answer back into a [`RepoOutcome`]. The
//! request itself rides along in the web request context so the answer can be
//! decoded without any pending-request bookkeeping.
//!
//! | Operation | Method | Path and query |
//! |-----------|--------|----------------|
//! | list | GET | `characters?select=*&order=tier_code.asc[&name=ilike.*term*]` |
//! | by tier | GET | `characters?select=*&tier_code=eq.CODE&order=id.asc` |
//! | get | GET | `characters?select=*&id=eq.ID` |
//! | tiers | GET | `tiers?select=*&order=tier_order.asc` |
//! | tier | GET | `tiers?select=*&tier_code=eq.CODE` |
//! | create | POST | `characters` |
//! | update | POST | `characters?on_conflict=id` (merge upsert) |
//! | delete | DELETE | `characters?id=eq.ID` |

use crate::domain::error::{Result, TierdexError};
use crate::domain::{Character, Tier};
use crate::repository::backend::Page;
use crate::repository::models::{CharacterPayload, CharacterRecord, TierRecord};
use crate::repository::requests::{RepoOutcome, RepoRequest, RequestId};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

const CHARACTERS: &str = "characters";
const TIERS: &str = "tiers";

const CONTEXT_REQUEST_ID: &str = "request_id";
const CONTEXT_REQUEST: &str = "request";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// A fully prepared HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// Connection settings for one Supabase project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestClient {
    base_url: String,
    api_key: String,
}

impl RestClient {
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Prepares the HTTP call for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if a write payload cannot be serialized.
    pub fn build(&self, request: &RepoRequest) -> Result<HttpRequest> {
        let mut headers = self.base_headers();

        let (method, url, body) = match request {
            RepoRequest::ListCharacters {
                page,
                page_size,
                search,
            } => {
                let mut query = String::from("select=*&order=tier_code.asc");
                if !search.is_empty() {
                    query.push_str("&name=ilike.*");
                    query.push_str(&encode(search));
                    query.push('*');
                }
                add_range(&mut headers, *page, *page_size);
                (HttpMethod::Get, self.url(CHARACTERS, &query), Vec::new())
            }
            RepoRequest::ListCharactersByTier {
                tier_code,
                page,
                page_size,
            } => {
                let query = format!("select=*&tier_code=eq.{}&order=id.asc", encode(tier_code));
                add_range(&mut headers, *page, *page_size);
                (HttpMethod::Get, self.url(CHARACTERS, &query), Vec::new())
            }
            RepoRequest::GetCharacter { id } => (
                HttpMethod::Get,
                self.url(CHARACTERS, &format!("select=*&id=eq.{id}")),
                Vec::new(),
            ),
            RepoRequest::ListTiers => (
                HttpMethod::Get,
                self.url(TIERS, "select=*&order=tier_order.asc"),
                Vec::new(),
            ),
            RepoRequest::GetTierDetails { tier_code } => (
                HttpMethod::Get,
                self.url(TIERS, &format!("select=*&tier_code=eq.{}", encode(tier_code))),
                Vec::new(),
            ),
            RepoRequest::CreateCharacter { draft } => {
                headers.insert("Content-Type".into(), "application/json".into());
                headers.insert("Prefer".into(), "return=representation".into());
                let body = serde_json::to_vec(&CharacterPayload::new(None, draft))?;
                (HttpMethod::Post, format!("{}/rest/v1/{CHARACTERS}", self.base_url), body)
            }
            RepoRequest::UpdateCharacter { id, draft } => {
                headers.insert("Content-Type".into(), "application/json".into());
                headers.insert(
                    "Prefer".into(),
                    "resolution=merge-duplicates,return=representation".into(),
                );
                let body = serde_json::to_vec(&CharacterPayload::new(Some(*id), draft))?;
                (HttpMethod::Post, self.url(CHARACTERS, "on_conflict=id"), body)
            }
            RepoRequest::DeleteCharacter { id } => {
                headers.insert("Prefer".into(), "return=minimal".into());
                (
                    HttpMethod::Delete,
                    self.url(CHARACTERS, &format!("id=eq.{id}")),
                    Vec::new(),
                )
            }
        };

        tracing::debug!(operation = request.kind(), method = ?method, url = %url, "built REST request");
        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    fn base_headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("apikey".to_string(), self.api_key.clone()),
            ("Authorization".to_string(), format!("Bearer {}", self.api_key)),
            ("Accept".to_string(), "application/json".to_string()),
        ])
    }

    fn url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{table}?{query}", self.base_url)
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn add_range(headers: &mut BTreeMap<String, String>, page: u64, page_size: u64) {
    let from = page.saturating_mul(page_size);
    let to = from.saturating_add(page_size.saturating_sub(1));
    headers.insert("Range-Unit".into(), "items".into());
    headers.insert("Range".into(), format!("{from}-{to}"));
    headers.insert("Prefer".into(), "count=exact".into());
}

/// Total row count from a `Content-Range` value such as `0-4/23` or `*/0`.
///
/// Returns `None` when the total is unknown (`0-4/*`) or the value is malformed.
#[must_use]
pub fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.trim().parse().ok()
}

fn header<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Decodes the host's answer to the call built for `request`.
///
/// # Errors
///
/// Returns [`TierdexError::Remote`] for non-success statuses (except `416`
/// on listings, which means the page is past the end) and
/// [`TierdexError::Decode`] when the body is not the expected JSON.
pub fn decode(
    request: &RepoRequest,
    status: u16,
    headers: &BTreeMap<String, String>,
    body: &[u8],
) -> Result<RepoOutcome> {
    let _span = tracing::debug_span!("rest_decode", operation = request.kind(), status).entered();

    let is_listing = matches!(
        request,
        RepoRequest::ListCharacters { .. } | RepoRequest::ListCharactersByTier { .. }
    );

    if status == 416 && is_listing {
        let total_count = header(headers, "content-range")
            .and_then(parse_content_range)
            .unwrap_or(0);
        tracing::debug!(total_count, "range past the end");
        return Ok(RepoOutcome::CharacterPage(Page {
            items: Vec::new(),
            total_count,
        }));
    }

    if !(200..300).contains(&status) {
        return Err(remote_error(status, body));
    }

    let outcome = match request {
        RepoRequest::ListCharacters { .. } | RepoRequest::ListCharactersByTier { .. } => {
            let items = characters_from(body)?;
            let total_count = header(headers, "content-range")
                .and_then(parse_content_range)
                .unwrap_or(items.len() as u64);
            RepoOutcome::CharacterPage(Page { items, total_count })
        }
        RepoRequest::GetCharacter { .. } => {
            RepoOutcome::Character(characters_from(body)?.into_iter().next())
        }
        RepoRequest::ListTiers => RepoOutcome::Tiers(tiers_from(body)?),
        RepoRequest::GetTierDetails { .. } => RepoOutcome::Tier(tiers_from(body)?.into_iter().next()),
        RepoRequest::CreateCharacter { .. } | RepoRequest::UpdateCharacter { .. } => {
            let saved = characters_from(body)?
                .into_iter()
                .next()
                .ok_or_else(|| TierdexError::Decode("write returned no row".to_string()))?;
            RepoOutcome::Saved(saved)
        }
        RepoRequest::DeleteCharacter { id } => RepoOutcome::Deleted { id: *id },
    };
    Ok(outcome)
}

fn characters_from(body: &[u8]) -> Result<Vec<Character>> {
    let records: Vec<CharacterRecord> = serde_json::from_slice(body)?;
    Ok(records.into_iter().map(CharacterRecord::into_character).collect())
}

fn tiers_from(body: &[u8]) -> Result<Vec<Tier>> {
    let records: Vec<TierRecord> = serde_json::from_slice(body)?;
    Ok(records.into_iter().map(Tier::from).collect())
}

fn remote_error(status: u16, body: &[u8]) -> TierdexError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    let message = if message.is_empty() {
        format!("request failed with status {status}")
    } else {
        message
    };
    TierdexError::Remote { status, message }
}

/// Packs the routing tag and the request into a web request context.
///
/// # Errors
///
/// Returns an error if either value cannot be serialized.
pub fn context_for(request_id: RequestId, request: &RepoRequest) -> Result<BTreeMap<String, String>> {
    Ok(BTreeMap::from([
        (CONTEXT_REQUEST_ID.to_string(), serde_json::to_string(&request_id)?),
        (CONTEXT_REQUEST.to_string(), serde_json::to_string(request)?),
    ]))
}

/// Recovers what [`context_for`] packed.
///
/// # Errors
///
/// Returns [`TierdexError::Decode`] when the context did not come from
/// [`context_for`].
pub fn parse_context(context: &BTreeMap<String, String>) -> Result<(RequestId, RepoRequest)> {
    let field = |key: &str| {
        context
            .get(key)
            .ok_or_else(|| TierdexError::Decode(format!("web request context lacks {key}")))
    };
    let request_id = serde_json::from_str(field(CONTEXT_REQUEST_ID)?)?;
    let request = serde_json::from_str(field(CONTEXT_REQUEST)?)?;
    Ok((request_id, request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CharacterDraft, Statistics};
    use crate::repository::requests::RequestTarget;

    fn client() -> RestClient {
        RestClient::new("https://demo.supabase.co/", "anon-key")
    }

    fn draft() -> CharacterDraft {
        CharacterDraft {
            name: "Luffy".into(),
            anime: "One Piece".into(),
            power_level: 33,
            tier_code: "5-A".into(),
            image_url: "https://via.placeholder.com/300".into(),
            abilities: String::new(),
            description: String::new(),
            notable_techniques: String::new(),
            stats: Statistics::default(),
        }
    }

    #[test]
    fn search_listing_request() {
        let request = client()
            .build(&RepoRequest::ListCharacters {
                page: 1,
                page_size: 5,
                search: "Goku Black".into(),
            })
            .unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://demo.supabase.co/rest/v1/characters?select=*&order=tier_code.asc&name=ilike.*Goku%20Black*"
        );
        assert_eq!(request.headers["Range"], "5-9");
        assert_eq!(request.headers["Range-Unit"], "items");
        assert_eq!(request.headers["Prefer"], "count=exact");
        assert_eq!(request.headers["apikey"], "anon-key");
        assert_eq!(request.headers["Authorization"], "Bearer anon-key");
    }

    #[test]
    fn search_is_sent_as_typed() {
        let request = client()
            .build(&RepoRequest::ListCharacters {
                page: 0,
                page_size: 5,
                search: String::new(),
            })
            .unwrap();
        assert!(!request.url.contains("ilike"));
        assert_eq!(request.headers["Range"], "0-4");

        let request = client()
            .build(&RepoRequest::ListCharacters {
                page: 0,
                page_size: 5,
                search: "Go ".into(),
            })
            .unwrap();
        assert!(request.url.ends_with("&name=ilike.*Go%20*"));
    }

    #[test]
    fn tier_filter_is_encoded() {
        let request = client()
            .build(&RepoRequest::ListCharactersByTier {
                tier_code: "High 5-A".into(),
                page: 0,
                page_size: 5,
            })
            .unwrap();
        assert!(request.url.contains("tier_code=eq.High%205%2DA"));
    }

    #[test]
    fn update_is_a_merge_upsert_without_power_level() {
        let request = client()
            .build(&RepoRequest::UpdateCharacter { id: 9, draft: draft() })
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.url.ends_with("/rest/v1/characters?on_conflict=id"));
        assert_eq!(
            request.headers["Prefer"],
            "resolution=merge-duplicates,return=representation"
        );
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["id"], 9);
        assert!(body.get("power_level").is_none());
    }

    #[test]
    fn content_range_totals() {
        assert_eq!(parse_content_range("0-4/23"), Some(23));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("0-4/*"), None);
        assert_eq!(parse_content_range("garbage"), None);
    }

    #[test]
    fn listing_total_comes_from_content_range() {
        let request = RepoRequest::ListCharacters {
            page: 0,
            page_size: 5,
            search: String::new(),
        };
        let headers = BTreeMap::from([("content-range".to_string(), "0-0/23".to_string())]);
        let body = br#"[{"id": 1, "name": "Goku", "tier_code": "2-C"}]"#;

        let RepoOutcome::CharacterPage(page) = decode(&request, 206, &headers, body).unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(page.total_count, 23);
        assert_eq!(page.items[0].name, "Goku");

        let headers = BTreeMap::from([("Content-Range".to_string(), "0-0/*".to_string())]);
        let RepoOutcome::CharacterPage(page) = decode(&request, 200, &headers, body).unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn past_the_end_is_an_empty_page() {
        let request = RepoRequest::ListCharactersByTier {
            tier_code: "9-A".into(),
            page: 4,
            page_size: 5,
        };
        let headers = BTreeMap::from([("Content-Range".to_string(), "*/7".to_string())]);
        let outcome = decode(&request, 416, &headers, b"{}").unwrap();
        assert_eq!(
            outcome,
            RepoOutcome::CharacterPage(Page {
                items: Vec::new(),
                total_count: 7
            })
        );
    }

    #[test]
    fn errors_carry_the_backend_message() {
        let err = decode(
            &RepoRequest::ListTiers,
            401,
            &BTreeMap::new(),
            br#"{"message": "Invalid API key", "hint": null}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Remote error (HTTP 401): Invalid API key");

        let err = decode(&RepoRequest::ListTiers, 502, &BTreeMap::new(), b"").unwrap_err();
        assert!(matches!(err, TierdexError::Remote { status: 502, .. }));
    }

    #[test]
    fn missing_rows_are_none() {
        let outcome = decode(&RepoRequest::GetCharacter { id: 3 }, 200, &BTreeMap::new(), b"[]").unwrap();
        assert_eq!(outcome, RepoOutcome::Character(None));

        let outcome = decode(
            &RepoRequest::GetTierDetails { tier_code: "X".into() },
            200,
            &BTreeMap::new(),
            b"[]",
        )
        .unwrap();
        assert_eq!(outcome, RepoOutcome::Tier(None));
    }

    #[test]
    fn context_round_trip() {
        let id = RequestId::new(RequestTarget::Detail, 42);
        let request = RepoRequest::GetCharacter { id: 5 };
        let context = context_for(id, &request).unwrap();
        assert_eq!(parse_context(&context).unwrap(), (id, request));
        assert!(parse_context(&BTreeMap::new()).is_err());
    }
}
