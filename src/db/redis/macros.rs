/// Read-through caching over [`Cache`](crate::db::Cache).
///
/// Returns the cached value for `$key` when present. Otherwise awaits `$block`,
/// queues the result for a background write with `$ttl` seconds to live, and
/// returns it. Errors from the cache read or from `$block` are propagated with `?`.
///
/// # Example
/// ```rust,ignore
/// cached!(self.cache, CacheKey::Catalog(collection), 3600, async move {
///     self.fetch_all_pages().await
/// })
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        if let Some(cached) = $cache.get_from_cache(&key).await? {
            tracing::debug!(key = %key, "Cache hit");
            Ok(cached)
        } else {
            tracing::debug!(key = %key, "Cache miss");
            let value = $block.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
