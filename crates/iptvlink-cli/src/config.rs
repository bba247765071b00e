//! Default locations and credential resolution

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};

/// Search index cached by the tvOS simulator
pub const DEFAULT_SIM_CACHE: &str = "/Users/hardeepsasan/Library/Developer/CoreSimulator/Devices/DEBAD790-AE65-4B0B-ABE2-9A3E87AAD8F0/data/Containers/Data/Application/BE48EAE3-9331-48E5-B1AC-6BB338C8074D/Library/Caches/IPTVLink_Cache/search_index.json";

/// Search index pulled from the Apple TV device container
pub const DEFAULT_DEVICE_CACHE: &str = "/Users/hardeepsasan/Documents/AppleTVEmulator Data/com.hardeepsasan.IPTV-Emulator 2026-02-08 21:52.33.071.xcappdata/AppData/Library/Caches/IPTVLink_Cache/search_index.json";

/// Demo poster artwork
pub const DEFAULT_POSTER_SOURCE_DIR: &str = "/Users/hardeepsasan/Documents/GravityProjects/IPTV_Emulator/IPTV_Emulator";

/// iOS target asset catalog
pub const DEFAULT_ASSETS_DIR: &str = "/Users/hardeepsasan/Documents/GravityProjects/IPTV_Emulator/IPTV Link iOS/Assets.xcassets";

/// An API key and where to get one
pub struct ApiKeySpec {
    pub service: &'static str,
    pub signup_url: &'static str,
}

pub const OMDB_KEY: ApiKeySpec = ApiKeySpec {
    service: "OMDb",
    signup_url: "http://www.omdbapi.com/apikey.aspx",
};

pub const TMDB_KEY: ApiKeySpec = ApiKeySpec {
    service: "TMDB",
    signup_url: "https://www.themoviedb.org/settings/api",
};

/// Use the key from flag/env, otherwise ask on stdin
pub fn resolve_api_key(provided: Option<String>, spec: &ApiKeySpec) -> Result<String> {
    if let Some(key) = provided.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
        return Ok(key);
    }

    let stdin = io::stdin();
    prompt_api_key(spec, &mut stdin.lock(), &mut io::stdout())
}

fn prompt_api_key(spec: &ApiKeySpec, input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    writeln!(output, "\n=== {} API key ===", spec.service)?;
    writeln!(
        output,
        "Please enter your {} API key (get one at {})",
        spec.service, spec.signup_url
    )?;
    write!(output, "API Key: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read API key from stdin")?;

    let key = line.trim();
    if key.is_empty() {
        bail!("no {} API key provided", spec.service);
    }
    Ok(key.to_string())
}
