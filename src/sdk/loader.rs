//! Query-string lookup and vendor script selection.

use super::queue::SdkError;

pub const DEFAULT_VERSION: &str = "default-sdk-version";
const SCRIPT_PREFIX: &str = "poki-sdk";

/// Look up `key` in a `?a=1&b=2` query string.
///
/// `+` decodes to a space and `%XX` escapes are decoded. A malformed value is
/// logged and treated as absent.
pub fn url_param(query: &str, key: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let raw = query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then_some(v)
    })?;

    match percent_decode(&raw.replace('+', " ")) {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("error getting URL parameter '{}': {}", key, e);
            None
        }
    }
}

fn percent_decode(input: &str) -> Result<String, SdkError> {
    let malformed = || SdkError::MalformedParam(input.to_string());
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).ok_or_else(malformed)?;
            let hex = std::str::from_utf8(hex).map_err(|_| malformed())?;
            out.push(u8::from_str_radix(hex, 16).map_err(|_| malformed())?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| malformed())
}

/// Which build of the vendor script to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFlavour {
    Core,
    Kids,
    Playground,
    Hoist,
}

impl ScriptFlavour {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Kids => "kids",
            Self::Playground => "playground",
            Self::Hoist => "hoist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub version: String,
    pub flavour: ScriptFlavour,
}

impl LoaderConfig {
    /// Pick version and flavour. Later rules win: kids, then an ad bridge, then hoist.
    pub fn from_query(query: &str, has_ad_bridge: bool, version_override: Option<&str>) -> Self {
        let version = version_override
            .map(str::to_string)
            .or_else(|| url_param(query, "ab"))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        let mut flavour = ScriptFlavour::Core;
        if url_param(query, "tag").as_deref() == Some("kids") {
            flavour = ScriptFlavour::Kids;
        }
        if has_ad_bridge {
            flavour = ScriptFlavour::Playground;
        }
        if url_param(query, "hoist").as_deref() == Some("yes")
            || url_param(query, "gdhoist").as_deref() == Some("yes")
        {
            flavour = ScriptFlavour::Hoist;
        }

        Self { version, flavour }
    }

    pub fn script_url(&self) -> String {
        format!(
            "scripts/{v}/{p}-{f}-{v}.js",
            v = self.version,
            p = SCRIPT_PREFIX,
            f = self.flavour.as_str()
        )
    }
}
