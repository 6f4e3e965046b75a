// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// Character encoding the fetched page is decoded with, once, before parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl PageEncoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            PageEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            // ISO-8859-1 maps every byte to the code point of the same value.
            PageEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageEncoding::Utf8 => "utf-8",
            PageEncoding::Latin1 => "latin-1",
        }
    }
}

impl std::str::FromStr for PageEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(PageEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(PageEncoding::Latin1),
            other => Err(format!("Unknown encoding: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub encoding: PageEncoding,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            encoding: PageEncoding::default(),
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub urls: Vec<String>,
    pub out_dir: PathBuf,
    pub marker: String,
    pub fetch: FetchOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            urls: DEFAULT_URLS.iter().map(|u| s!(*u)).collect(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            marker: s!(DATASET_TITLE_MARKER),
            fetch: FetchOptions::default(),
        }
    }
}
