// ABOUTME: CSS selector compilation with an optional process-wide cache.
// ABOUTME: Turns selector text into dom_query matchers; invalid selectors surface as LeafError::Selector.

//! Selector compilation.
//!
//! Queries compile their selector on every call unless the document was
//! parsed with `Options::selector_cache`, in which case successful
//! compilations are shared through a thread-safe cache keyed by selector
//! text. Both paths return identical matchers.

use std::collections::HashMap;
use std::sync::RwLock;

use dom_query::Matcher;
use once_cell::sync::Lazy;

use crate::error::{LeafError, Result};

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Matcher>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Compiles a CSS selector without touching the cache.
pub fn compile(css: &str) -> Result<Matcher> {
    tracing::debug!(selector = css, "compiling selector");
    Matcher::new(css).map_err(|e| LeafError::selector(css, format!("{:?}", e)))
}

/// Gets or compiles a CSS selector, caching successful compilations.
///
/// Invalid selectors are not cached; each call reports the compiler error again.
pub fn get_or_compile(css: &str) -> Result<Matcher> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(css) {
            tracing::trace!(selector = css, "selector cache hit");
            return Ok(cached.clone());
        }
    }

    let compiled = compile(css)?;
    let mut cache = SELECTOR_CACHE.write().unwrap_or_else(|e| e.into_inner());
    // Another thread may have inserted while we compiled.
    Ok(cache.entry(css.to_string()).or_insert(compiled).clone())
}

/// Precompiles a batch of selectors into the cache, stopping at the first invalid one.
pub fn precompile_selectors<I, S>(selectors: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for css in selectors {
        get_or_compile(css.as_ref())?;
    }
    Ok(())
}

pub(crate) fn matcher(css: &str, cached: bool) -> Result<Matcher> {
    if cached {
        get_or_compile(css)
    } else {
        compile(css)
    }
}
