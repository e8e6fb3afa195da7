//! Model of the `data-tralbum` payload embedded in album pages.
//!
//! Only the fields the extractor reads are modelled; the payload carries a
//! lot more (artwork ids, purchase info, lyrics) that serde skips.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct TralbumData {
    pub(crate) trackinfo: Vec<TrackInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackInfo {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) track_num: Option<u32>,
    /// Format key to streaming URL; `null` for tracks without a preview.
    #[serde(default)]
    pub(crate) file: Option<HashMap<String, Value>>,
}

impl TrackInfo {
    /// Returns the non-empty asset URL for `format_key`, if any.
    pub(crate) fn asset_url(&self, format_key: &str) -> Option<&str> {
        self.file
            .as_ref()?
            .get(format_key)?
            .as_str()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Title, or `Track N` when the payload has none.
    pub(crate) fn display_title(&self) -> String {
        match (&self.title, self.track_num) {
            (Some(title), _) if !title.trim().is_empty() => title.clone(),
            (_, Some(number)) => format!("Track {number}"),
            _ => "Untitled".to_string(),
        }
    }
}
