/// Read-through caching against Redis.
///
/// Checks the cache for `$key`; on a miss, runs `$block`, stores the result
/// with the given TTL via the background writer, and returns it.
///
/// # Arguments
/// * `$cache`: cache instance exposing `get_from_cache` and `set_in_background`.
/// * `$key`: the `CacheKey` under which the value lives.
/// * `$ttl`: time-to-live in seconds.
/// * `$block`: async block producing the value on a miss.
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
