//! Redis Store Tests
//!
//! These tests require:
//! - Running Redis instance
//! - Environment variable: REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test store_tests

use integration_tests::{check_redis_env, redis_config};
use warden_core::{DocumentStore, DomainError, GuildDocument, Snowflake};
use warden_store::{document_key, RedisDocumentStore, RedisPool, RedisPoolConfig};

const GUILD: Snowflake = Snowflake::new(1);

/// Store over a single-connection pool, so every call reuses the same connection
fn single_connection_store() -> (RedisDocumentStore, RedisPool, String) {
    let config = redis_config().unwrap();
    let pool = RedisPool::new(RedisPoolConfig {
        url: config.redis.url.clone(),
        max_connections: 1,
    })
    .expect("Failed to create pool");

    let key = document_key(&config.store.key_prefix, GUILD);
    let store = RedisDocumentStore::new(pool.clone(), config.store.key_prefix);
    (store, pool, key)
}

#[tokio::test]
async fn test_failed_read_does_not_leave_watch_on_pooled_connection() {
    if !check_redis_env() {
        return;
    }

    let (store, pool, key) = single_connection_store();

    // A list under the document key makes the read after WATCH fail
    let mut conn = pool.get().await.unwrap();
    redis::cmd("RPUSH")
        .arg(&key)
        .arg("not a document")
        .query_async::<()>(&mut conn)
        .await
        .unwrap();
    drop(conn);

    let doc = GuildDocument::new(GUILD, "Test Guild", "+");
    let err = store.put_if_revision(GUILD, &doc, 0).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable(_)));

    // Rewriting the key would abort the next EXEC if the old WATCH survived
    store.delete(GUILD).await.unwrap();
    assert!(store.create_if_absent(GUILD, &doc).await.unwrap());

    let mut next = doc.clone();
    next.revision = 1;
    assert!(store.put_if_revision(GUILD, &next, 0).await.unwrap());
    assert_eq!(store.get(GUILD).await.unwrap().unwrap().revision, 1);

    store.delete(GUILD).await.unwrap();
}

#[tokio::test]
async fn test_document_under_another_key_is_rejected() {
    if !check_redis_env() {
        return;
    }

    let (store, _pool, _key) = single_connection_store();
    let other = Snowflake::new(2);

    store
        .put(other, &GuildDocument::new(GUILD, "Test Guild", "+"))
        .await
        .unwrap();

    let err = store.get(other).await.unwrap_err();
    assert!(err.is_corrupt_document());

    store.delete(other).await.unwrap();
}
