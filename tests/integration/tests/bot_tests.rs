//! Bot Integration Tests
//!
//! Most tests run against the in-memory store. The Redis tests require:
//! - Running Redis instance
//! - Environment variable: REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test bot_tests

use chrono::{TimeZone, Utc};
use integration_tests::{check_redis_env, fixtures::*, lines, redis_config, TestBot};
use warden_bot::dispatch::{split_args, split_command};
use warden_core::{GuildDocument, ModerationKind, Snowflake};

async fn registered_bot() -> TestBot {
    let bot = TestBot::start().await.expect("Failed to start bot");
    bot.send(guild_create()).await;
    bot
}

async fn warnings(bot: &TestBot, member: Snowflake) -> usize {
    bot.document(GUILD)
        .await
        .unwrap()
        .unwrap()
        .member(member)
        .map_or(0, |m| m.history(ModerationKind::Warning).len())
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_guild_create_seeds_document() {
    let bot = registered_bot().await;
    let doc = bot.document(GUILD).await.unwrap().unwrap();

    assert_eq!(doc.name, "Test Guild");
    assert_eq!(doc.prefix, "+");
    assert_eq!(doc.members.len(), 2);
    assert_eq!(doc.member(ALICE).unwrap().nickname.as_deref(), Some("Ali"));
}

#[tokio::test]
async fn test_register_is_idempotent() {
    let bot = registered_bot().await;
    bot.configure(GUILD, |doc| doc.prefix = "!".to_string())
        .await
        .unwrap();
    let before = bot.document(GUILD).await.unwrap().unwrap();

    bot.send(guild_create()).await;

    let after = bot.document(GUILD).await.unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_leave_then_join_yields_fresh_document() {
    let bot = registered_bot().await;
    bot.send(message(OWNER, "+warn <@20> spam")).await;
    assert_eq!(warnings(&bot, ALICE).await, 1);

    bot.send(guild_delete(false)).await;
    assert!(bot.document(GUILD).await.unwrap().is_none());

    bot.send(guild_create()).await;
    assert_eq!(warnings(&bot, ALICE).await, 0);
}

#[tokio::test]
async fn test_unavailable_guild_keeps_document() {
    let bot = registered_bot().await;
    bot.send(guild_delete(true)).await;
    assert!(bot.document(GUILD).await.unwrap().is_some());
}

// ============================================================================
// Moderation Tests
// ============================================================================

#[tokio::test]
async fn test_warn_appends_to_present_member() {
    let bot = registered_bot().await;
    bot.send(message(OWNER, "+warn <@20> spam links")).await;

    let doc = bot.document(GUILD).await.unwrap().unwrap();
    let history = doc.member(ALICE).unwrap().history(ModerationKind::Warning);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].reason, "spam links");
    assert_eq!(history[0].channel, "general / 5");

    // Other members are untouched
    assert!(doc.member(OWNER).unwrap().warnings.is_empty());
    assert_eq!(
        bot.take_replies(),
        vec!["Logged warning for <@20>: spam links".to_string()]
    );
}

#[tokio::test]
async fn test_every_kind_appends_to_its_own_history() {
    let bot = registered_bot().await;
    bot.send(message(OWNER, "+warn <@20>")).await;
    bot.send(message(OWNER, "+kick <@20> flooding")).await;
    bot.send(message(OWNER, "+ban <@20> raid")).await;
    bot.send(message(OWNER, "+mute <@20> 1h30m cool off")).await;

    let doc = bot.document(GUILD).await.unwrap().unwrap();
    let alice = doc.member(ALICE).unwrap();
    for kind in ModerationKind::ALL {
        assert_eq!(alice.history(kind).len(), 1, "{kind}");
    }
    assert_eq!(alice.warnings[0].reason, "No reason provided");
    assert_eq!(alice.mutes[0].duration_secs, Some(5_400));
    assert_eq!(alice.mutes[0].reason, "cool off");
}

#[tokio::test]
async fn test_append_to_absent_member_leaves_document_unchanged() {
    let bot = registered_bot().await;
    let before = bot.document(GUILD).await.unwrap().unwrap();

    for kind in ["warn", "kick", "ban"] {
        bot.send(message(OWNER, &format!("+{kind} <@30> who?"))).await;
    }
    bot.send(message(OWNER, "+mute <@30> 5m who?")).await;

    let after = bot.document(GUILD).await.unwrap().unwrap();
    assert_eq!(before, after);
    assert!(bot
        .take_replies()
        .iter()
        .all(|r| r == "<@30> has no record in this guild."));
}

#[tokio::test]
async fn test_concurrent_appends_all_survive() {
    let bot = registered_bot().await;

    let input = lines((0..50).map(|i| message(OWNER, &format!("+warn <@20> strike {i}"))));
    let forwarded = bot.feed(&input).await.unwrap();

    assert_eq!(forwarded, 50);
    assert_eq!(warnings(&bot, ALICE).await, 50);
    let doc = bot.document(GUILD).await.unwrap().unwrap();
    assert_eq!(doc.revision, 50);
}

#[tokio::test]
async fn test_concurrent_appends_across_bots_sharing_a_store() {
    let first = registered_bot().await;
    let second = TestBot::start_with_store(
        &integration_tests::memory_config().unwrap(),
        first.store.clone(),
    )
    .unwrap();
    second.send(guild_create()).await;

    let input = lines((0..10).map(|i| message(OWNER, &format!("+warn <@20> {i}"))));
    let (a, b) = futures::join!(first.feed(&input), second.feed(&input));
    assert_eq!(a.unwrap() + b.unwrap(), 20);

    assert_eq!(warnings(&first, ALICE).await, 20);
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[test]
fn test_command_name_and_raw_args() {
    let text = "+warn @user spam";
    let (name, rest) = split_command(text.strip_prefix('+').unwrap());

    assert_eq!(name, "warn");
    assert_eq!(split_args(rest, " "), vec!["@user", "spam"]);
}

#[tokio::test]
async fn test_plain_text_invokes_nothing() {
    let bot = registered_bot().await;
    let before = bot.document(GUILD).await.unwrap().unwrap();

    bot.send(message(ALICE, "hello")).await;
    bot.send(message(ALICE, "+")).await;

    assert!(bot.take_replies().is_empty());
    assert_eq!(bot.document(GUILD).await.unwrap().unwrap(), before);
}

#[tokio::test]
async fn test_unresolved_mention_gets_usage() {
    let bot = registered_bot().await;
    bot.send(message(OWNER, "+warn @user spam")).await;

    assert_eq!(bot.take_replies(), vec!["Usage: warn @member [reason]".to_string()]);
    assert_eq!(warnings(&bot, ALICE).await, 0);
}

#[tokio::test]
async fn test_unknown_command_falls_back() {
    let bot = registered_bot().await;
    bot.send(message(ALICE, "+dance")).await;
    assert_eq!(bot.take_replies(), vec!["Unknown command `+dance`".to_string()]);
}

#[tokio::test]
async fn test_aliases_and_case() {
    let bot = registered_bot().await;
    bot.send(message(OWNER, "+WARNING <@20> loud")).await;
    bot.send(message(OWNER, "+Silence <@20> 10m loud")).await;

    let doc = bot.document(GUILD).await.unwrap().unwrap();
    let alice = doc.member(ALICE).unwrap();
    assert_eq!(alice.warnings.len(), 1);
    assert_eq!(alice.mutes.len(), 1);
}

#[tokio::test]
async fn test_prefix_change_applies_to_next_message() {
    let bot = registered_bot().await;
    bot.send(message(OWNER, "+prefix ?")).await;
    assert_eq!(bot.take_replies(), vec!["Prefix changed to `?`".to_string()]);

    bot.send(message(ALICE, "+ping")).await;
    assert!(bot.take_replies().is_empty());

    bot.send(message(ALICE, "?ping")).await;
    assert_eq!(bot.take_replies(), vec!["Pong!".to_string()]);
}

#[tokio::test]
async fn test_guild_restrictions_drop_silently() {
    let bot = registered_bot().await;
    bot.configure(GUILD, |doc| {
        doc.disabled_commands.push("ban".to_string());
        doc.blacklisted_members.push(BOB);
    })
    .await
    .unwrap();

    bot.send(message(OWNER, "+ban <@20> raid")).await;
    bot.send(message(BOB, "+ping")).await;
    assert!(bot.take_replies().is_empty());

    bot.configure(GUILD, |doc| doc.blacklisted_channels.push(GENERAL))
        .await
        .unwrap();
    bot.send(message(OWNER, "+ping")).await;
    assert!(bot.take_replies().is_empty());

    let doc = bot.document(GUILD).await.unwrap().unwrap();
    assert!(doc.member(ALICE).unwrap().bans.is_empty());
}

#[tokio::test]
async fn test_direct_messages_use_default_prefix() {
    let bot = registered_bot().await;
    bot.send(direct_message(ALICE, "+ping")).await;
    bot.send(direct_message(ALICE, "+warn <@20>")).await;

    let output = bot.take_output();
    assert_eq!(output.len(), 1);
    assert_eq!(output[0].channel_id, DM);
    assert_eq!(output[0].content, "Pong!");
}

#[tokio::test]
async fn test_message_in_unknown_guild_is_dropped() {
    let bot = TestBot::start().await.unwrap();
    bot.send(message(OWNER, "+ping")).await;

    assert!(bot.take_replies().is_empty());
    assert!(bot.document(GUILD).await.unwrap().is_none());
}

// ============================================================================
// Member Lifecycle Tests
// ============================================================================

fn with_greetings(doc: &mut GuildDocument) {
    doc.welcome_channel = Some(WELCOME);
    doc.welcome_message = "Welcome {mention} to {guild}!".to_string();
    doc.member_add_channel = Some(GENERAL);
    doc.member_add_message = "{tag} joined".to_string();
    doc.goodbye_channel = Some(WELCOME);
    doc.goodbye_message = "Bye {user}".to_string();
}

#[tokio::test]
async fn test_member_join_registers_and_greets() {
    let bot = registered_bot().await;
    bot.configure(GUILD, with_greetings).await.unwrap();

    let joined_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    bot.send(member_add(BOB, "bob", joined_at)).await;

    let doc = bot.document(GUILD).await.unwrap().unwrap();
    let record = doc.member(BOB).unwrap();
    assert_eq!(record.joined_at, joined_at);
    assert!(record.warnings.is_empty());

    let output = bot.take_output();
    assert_eq!(output.len(), 2);
    assert_eq!(output[0].channel_id, WELCOME);
    assert_eq!(output[0].content, "Welcome <@30> to Test Guild!");
    assert_eq!(output[1].channel_id, GENERAL);
    assert_eq!(output[1].content, "bob#0001 joined");
}

#[tokio::test]
async fn test_duplicate_member_join_keeps_one_record() {
    let bot = registered_bot().await;
    let joined_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    bot.send(member_add(BOB, "bob", joined_at)).await;
    bot.send(member_add(BOB, "bob", joined_at)).await;

    let doc = bot.document(GUILD).await.unwrap().unwrap();
    assert_eq!(doc.members.iter().filter(|m| m.id == BOB).count(), 1);
}

#[tokio::test]
async fn test_greetings_need_channel_and_template() {
    let bot = registered_bot().await;
    bot.configure(GUILD, |doc| {
        with_greetings(doc);
        doc.welcome_message.clear();
        doc.member_add_channel = None;
    })
    .await
    .unwrap();

    let joined_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    bot.send(member_add(BOB, "bob", joined_at)).await;

    assert!(bot.take_replies().is_empty());
    assert!(bot.document(GUILD).await.unwrap().unwrap().has_member(BOB));
}

#[tokio::test]
async fn test_member_leave_keeps_history() {
    let bot = registered_bot().await;
    bot.configure(GUILD, with_greetings).await.unwrap();
    bot.send(message(OWNER, "+warn <@20> spam")).await;
    bot.take_output();

    bot.send(member_remove(ALICE, "alice")).await;

    assert_eq!(bot.take_replies(), vec!["Bye alice".to_string()]);
    assert_eq!(warnings(&bot, ALICE).await, 1);
}

#[tokio::test]
async fn test_member_join_for_unregistered_guild_is_logged_and_dropped() {
    let bot = TestBot::start().await.unwrap();
    let joined_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    bot.send(member_add(BOB, "bob", joined_at)).await;

    assert!(bot.document(GUILD).await.unwrap().is_none());
    assert!(bot.take_replies().is_empty());
}

// ============================================================================
// Store Tests
// ============================================================================

#[tokio::test]
async fn test_stale_revision_write_is_rejected() {
    let bot = registered_bot().await;
    let stale = bot.document(GUILD).await.unwrap().unwrap();

    bot.send(message(OWNER, "+warn <@20> first")).await;

    let mut overwrite = stale.clone();
    overwrite.revision += 1;
    let written = bot
        .store
        .put_if_revision(GUILD, &overwrite, stale.revision)
        .await
        .unwrap();

    assert!(!written);
    assert_eq!(warnings(&bot, ALICE).await, 1);
}

#[tokio::test]
async fn test_redis_store_end_to_end() {
    if !check_redis_env() {
        return;
    }

    let bot = TestBot::start_with_config(redis_config().unwrap())
        .await
        .expect("Failed to start bot");
    bot.send(guild_create()).await;

    let input = lines((0..10).map(|i| message(OWNER, &format!("+warn <@20> {i}"))));
    bot.feed(&input).await.unwrap();
    assert_eq!(warnings(&bot, ALICE).await, 10);

    bot.send(guild_delete(false)).await;
    assert!(!bot.store.exists(GUILD).await.unwrap());
}

#[tokio::test]
async fn test_redis_register_is_idempotent() {
    if !check_redis_env() {
        return;
    }

    let bot = TestBot::start_with_config(redis_config().unwrap())
        .await
        .expect("Failed to start bot");
    bot.send(guild_create()).await;
    let before = bot.document(GUILD).await.unwrap().unwrap();

    bot.send(guild_create()).await;
    assert_eq!(bot.document(GUILD).await.unwrap().unwrap(), before);

    bot.store.delete(GUILD).await.unwrap();
}
