use crate::config::defaults::API_TIMEOUT;
use crate::utils::{Result, SweepError};
use serde::Deserialize;
use serde_json::Value;

const API_BASE: &str = "https://slack.com/api";

/// Identity reported by `auth.test`, shown before a live run.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthInfo {
    pub user: String,
    pub team: String,
}

/// The subset of `conversations.info` / `conversations.create` responses the
/// tool cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelState {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_archived: bool,
}

/// Seam over the Slack Web API. Single-shot calls only; transport failures
/// and API-level error codes both surface as `SweepError` and are classified
/// by the archiver, not here.
pub trait SlackApi {
    fn auth_test(&self) -> Result<AuthInfo>;
    fn archive_channel(&self, channel_id: &str) -> Result<()>;
    fn channel_info(&self, channel_id: &str) -> Result<ChannelState>;
    fn create_channel(&self, name: &str) -> Result<ChannelState>;
    /// Resolves a channel name via paginated `conversations.list`.
    fn find_channel_id(&self, name: &str) -> Result<Option<String>>;
    /// Posts `text` and returns the message timestamp.
    fn post_message(&self, channel_id: &str, text: &str) -> Result<String>;
}

/// Blocking HTTP client for the Slack Web API.
pub struct SlackClient {
    http: reqwest::blocking::Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(API_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            token: token.to_string(),
            base_url: API_BASE.to_string(),
        })
    }

    /// Posts a form-encoded call to `{base_url}/{method}` and unwraps the
    /// `ok`/`error` envelope every Web API response carries.
    fn call(&self, method: &str, params: &[(&str, &str)]) -> Result<Value> {
        let response: Value = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .bearer_auth(&self.token)
            .form(params)
            .send()?
            .json()?;

        if response.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            Ok(response)
        } else {
            let code = response
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            Err(SweepError::api(code))
        }
    }
}

impl SlackApi for SlackClient {
    fn auth_test(&self) -> Result<AuthInfo> {
        let response = self
            .call("auth.test", &[])
            .map_err(|e| SweepError::auth_failed(e.to_string()))?;
        Ok(serde_json::from_value(response)?)
    }

    fn archive_channel(&self, channel_id: &str) -> Result<()> {
        self.call("conversations.archive", &[("channel", channel_id)])?;
        Ok(())
    }

    fn channel_info(&self, channel_id: &str) -> Result<ChannelState> {
        let response = self.call("conversations.info", &[("channel", channel_id)])?;
        let channel = response
            .get("channel")
            .cloned()
            .ok_or_else(|| SweepError::api("malformed_response"))?;
        Ok(serde_json::from_value(channel)?)
    }

    fn create_channel(&self, name: &str) -> Result<ChannelState> {
        let response = self.call("conversations.create", &[("name", name)])?;
        let channel = response
            .get("channel")
            .cloned()
            .ok_or_else(|| SweepError::api("malformed_response"))?;
        Ok(serde_json::from_value(channel)?)
    }

    fn find_channel_id(&self, name: &str) -> Result<Option<String>> {
        paginate_channel_search(name, |cursor| {
            let mut params = vec![("types", "public_channel"), ("limit", "200")];
            if let Some(c) = cursor {
                params.push(("cursor", c));
            }
            self.call("conversations.list", &params)
        })
    }

    fn post_message(&self, channel_id: &str, text: &str) -> Result<String> {
        let response = self.call(
            "chat.postMessage",
            &[
                ("channel", channel_id),
                ("text", text),
                ("unfurl_links", "false"),
            ],
        )?;
        Ok(response
            .get("ts")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

/// Walks `conversations.list` pages until the name matches or the cursor
/// runs out. `fetch` receives the cursor to request, `None` for the first
/// page.
fn paginate_channel_search<F>(name: &str, mut fetch: F) -> Result<Option<String>>
where
    F: FnMut(Option<&str>) -> Result<Value>,
{
    let mut cursor: Option<String> = None;
    loop {
        let page = fetch(cursor.as_deref())?;
        if let Some(id) = find_in_page(&page, name) {
            return Ok(Some(id));
        }
        match next_cursor(&page) {
            Some(next) => cursor = Some(next),
            None => return Ok(None),
        }
    }
}

/// Scans one `conversations.list` page for a channel with the given name.
fn find_in_page(page: &Value, name: &str) -> Option<String> {
    page.get("channels")?
        .as_array()?
        .iter()
        .find(|channel| {
            channel
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .and_then(|channel| channel.get("id").and_then(Value::as_str))
        .map(str::to_string)
}

/// The pagination cursor to follow, if the page carries a non-empty one.
fn next_cursor(page: &Value) -> Option<String> {
    page.get("response_metadata")
        .and_then(|m| m.get("next_cursor"))
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(channels: &[(&str, &str)], cursor: &str) -> Value {
        let channels: Vec<Value> = channels
            .iter()
            .map(|(name, id)| json!({"name": name, "id": id}))
            .collect();
        json!({
            "ok": true,
            "channels": channels,
            "response_metadata": {"next_cursor": cursor},
        })
    }

    #[test]
    fn test_pagination_follows_cursor_until_match() {
        let pages = [
            page(&[("general", "C0000000001")], "cursor123"),
            page(&[("team-tech", "C0000000002")], ""),
        ];
        let mut cursors_seen = Vec::new();

        let found = paginate_channel_search("team-tech", |cursor| {
            cursors_seen.push(cursor.map(str::to_string));
            Ok(pages[cursors_seen.len() - 1].clone())
        })
        .unwrap();

        assert_eq!(found.as_deref(), Some("C0000000002"));
        assert_eq!(cursors_seen, vec![None, Some("cursor123".to_string())]);
    }

    #[test]
    fn test_pagination_exhausts_all_pages_without_match() {
        let pages = [
            page(&[("general", "C0000000001")], "a"),
            page(&[("random", "C0000000002")], "b"),
            page(&[("dev-null", "C0000000003")], ""),
        ];
        let mut fetched = 0;

        let found = paginate_channel_search("team-tech", |_| {
            fetched += 1;
            Ok(pages[fetched - 1].clone())
        })
        .unwrap();

        assert_eq!(found, None);
        assert_eq!(fetched, 3);
    }

    #[test]
    fn test_pagination_stops_when_metadata_is_absent() {
        let found = paginate_channel_search("team-tech", |_| {
            Ok(json!({"ok": true, "channels": []}))
        })
        .unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_page_match_is_case_insensitive() {
        let page = page(&[("Team-Tech", "C0000000002")], "");
        assert_eq!(
            find_in_page(&page, "team-tech").as_deref(),
            Some("C0000000002")
        );
        assert_eq!(find_in_page(&page, "other"), None);
    }

    #[test]
    fn test_fetch_errors_propagate() {
        let result =
            paginate_channel_search("team-tech", |_| Err(SweepError::api("ratelimited")));
        assert!(matches!(result, Err(SweepError::Api { .. })));
    }
}
