mod common;

use std::{pin::pin, time::Duration};

use common::{address, client, client_with, init_tracing, Ledger, LedgerDraft, MockLedger};
use fandraft_sdk::{
    abi::{encode, Token},
    contract::signatures,
    evm_utils::{keccak256, Bytes, U256},
    ops::{DashboardOps, LeaderboardOps, RegistryOps},
    types::PlayerStats,
    ResolutionAbi,
};
use futures_util::StreamExt;
use rust_decimal_macros::dec;
use serde_json::json;

fn ledger(drafts: Vec<LedgerDraft>) -> MockLedger {
    MockLedger::new(Ledger {
        drafts,
        ..Default::default()
    })
}

#[tokio::test]
async fn active_drafts_skip_resolved_ones() -> eyre::Result<()> {
    init_tracing();
    let ledger = ledger(vec![
        LedgerDraft::open("Champions League Fantasy", 24),
        LedgerDraft::resolved("Old Cup", address(1)),
        LedgerDraft::open("Weekend Warriors", 12),
    ]);
    let client = client(&ledger, None);

    let drafts = client.active_drafts().await?;
    let ids = drafts.iter().map(|d| d.id).collect::<Vec<_>>();
    assert_eq!(ids, [1, 3]);
    assert_eq!(drafts[0].display_name(), "Champions League Fantasy");
    assert_eq!(
        ledger.with(|l| l.call_count(signatures::GET_DRAFT)),
        3,
        "one state lookup per id"
    );
    Ok(())
}

#[tokio::test]
async fn failing_draft_is_left_out() -> eyre::Result<()> {
    let ledger = ledger(vec![
        LedgerDraft::open("A", 1),
        LedgerDraft::open("B", 1),
        LedgerDraft::open("C", 1),
    ]);
    ledger.with(|l| l.failing_drafts.insert(2));
    let client = client(&ledger, None);

    let ids = client
        .active_drafts()
        .await?
        .into_iter()
        .map(|d| d.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, [1, 3]);
    Ok(())
}

#[tokio::test]
async fn empty_registry() -> eyre::Result<()> {
    let ledger = ledger(Vec::new());
    let client = client(&ledger, None);
    assert!(client.active_drafts().await?.is_empty());
    assert!(client.leaderboard().await?.is_empty());
    assert_eq!(client.unique_participant_count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn draft_details_report_participants_and_winner() -> eyre::Result<()> {
    let (alice, bob) = (address(0xa1), address(0xb0));
    let ledger = ledger(vec![
        LedgerDraft::resolved("Final", bob).with_participants(&[alice, bob])
    ]);
    let client = client(&ledger, None);

    let details = client.draft_details(1).await?;
    assert!(!details.draft.is_active);
    assert!(details.has_joined(&alice));
    assert_eq!(details.winners, [bob]);

    let pending = MockLedger::new(Ledger {
        drafts: vec![LedgerDraft::open("Open", 2)],
        ..Default::default()
    });
    let details = client_with(&pending, ResolutionAbi::TopThree, None)
        .draft_details(1)
        .await?;
    assert!(details.winners.is_empty(), "zero addresses are not winners");
    Ok(())
}

#[tokio::test]
async fn leaderboard_excludes_winless_and_keeps_first_seen_order() -> eyre::Result<()> {
    let (a, b, c) = (address(0xaa), address(0xbb), address(0xcc));
    let ledger = ledger(vec![
        LedgerDraft::open("One", 1).with_participants(&[a, b, c]),
        LedgerDraft::open("Two", 1).with_participants(&[b, c]),
    ]);
    ledger.with(|l| {
        l.wins.insert(a, 2);
        l.wins.insert(c, 2);
    });
    let client = client(&ledger, None);

    let board = client.leaderboard().await?;
    let rows = board
        .iter()
        .map(|e| (e.address, e.wins, e.games_played))
        .collect::<Vec<_>>();
    assert_eq!(rows, [(a, 2, 1), (c, 2, 2)]);
    assert_eq!(board[0].approximate_earnings, dec!(20));
    assert_eq!(client.unique_participant_count().await?, 3);
    Ok(())
}

#[tokio::test]
async fn leaderboard_sorts_by_wins_and_skips_failed_lookups() -> eyre::Result<()> {
    let (a, b, c, d, e) = (
        address(0xaa),
        address(0xbb),
        address(0xcc),
        address(0xdd),
        address(0xee),
    );
    let ledger = ledger(vec![
        LedgerDraft::open("One", 1).with_participants(&[a, b]),
        LedgerDraft::open("Broken", 1).with_participants(&[e]),
        LedgerDraft::open("Three", 1).with_participants(&[c, d, a]),
    ]);
    ledger.with(|l| {
        l.wins.insert(a, 1);
        l.wins.insert(b, 3);
        l.wins.insert(c, 3);
        l.wins.insert(d, 5);
        l.wins.insert(e, 9);
        l.failing_drafts.insert(2);
        l.failing_addresses.insert(d);
    });
    let client = client(&ledger, None);

    let rows = client
        .leaderboard()
        .await?
        .into_iter()
        .map(|entry| (entry.address, entry.wins, entry.games_played))
        .collect::<Vec<_>>();
    assert_eq!(rows, [(b, 3, 1), (c, 3, 1), (a, 1, 2)]);
    assert_eq!(client.unique_participant_count().await?, 4);
    Ok(())
}

#[tokio::test]
async fn player_stats_fall_back_to_zeros() -> eyre::Result<()> {
    let (alice, bob) = (address(0xa1), address(0xb0));
    let ledger = ledger(Vec::new());
    let recorded = PlayerStats {
        total_games: 12,
        wins: 4,
        total_winnings: U256::from(100u64),
        win_rate: 33,
    };
    ledger.with(|l| {
        l.stats.insert(alice, recorded.clone());
        l.stats.insert(bob, recorded.clone());
        l.failing_addresses.insert(bob);
    });
    let client = client(&ledger, None);

    assert_eq!(client.player_stats(&alice).await, recorded);
    assert_eq!(client.player_stats(&bob).await, PlayerStats::default());
    assert_eq!(
        client.player_stats(&address(0x01)).await,
        PlayerStats::default()
    );
    Ok(())
}

#[tokio::test]
async fn draft_names_and_player_selection() -> eyre::Result<()> {
    let alice = address(0xa1);
    let ledger = ledger(vec![
        LedgerDraft::open("Champions League Fantasy", 24),
        LedgerDraft::open("", 12),
        LedgerDraft::resolved("Old Cup", alice),
    ]);
    ledger.with(|l| {
        l.selections
            .insert((1, alice), vec![1, 3, 4, 5, 6, 8, 9, 10, 12, 13, 14])
    });
    let client = client(&ledger, None);

    assert_eq!(
        client.all_draft_names().await?,
        ["Champions League Fantasy", "", "Old Cup"]
    );
    assert_eq!(
        client.player_selection(1, &alice).await?,
        [1, 3, 4, 5, 6, 8, 9, 10, 12, 13, 14]
    );
    assert!(client.player_selection(2, &alice).await?.is_empty());
    assert!(client.player_selection(7, &alice).await.is_err());
    Ok(())
}

#[tokio::test]
async fn history_lists_joined_drafts_newest_first() -> eyre::Result<()> {
    let (alice, bob) = (address(0xa1), address(0xb0));
    let ledger = ledger(vec![
        LedgerDraft::resolved("First", alice).with_participants(&[alice, bob]),
        LedgerDraft::open("Second", 4).with_participants(&[bob]),
        LedgerDraft::open("Third", 4).with_participants(&[alice]),
    ]);
    let client = client(&ledger, None);

    let history = client.user_history(&alice).await?;
    let rows = history
        .iter()
        .map(|h| (h.draft_id, h.has_won, h.participant_count))
        .collect::<Vec<_>>();
    assert_eq!(rows, [(3, false, 1), (1, true, 2)]);
    assert_eq!(history[1].name.as_deref(), Some("First"));
    Ok(())
}

#[tokio::test]
async fn dashboard_stats_for_owner() -> eyre::Result<()> {
    let alice = address(0xa1);
    let mut first = LedgerDraft::open("A", 1).with_participants(&[alice]);
    first.total_pool = U256::from(25u64);
    let mut second = LedgerDraft::open("B", 1);
    second.total_pool = U256::from(50u64);
    let ledger = ledger(vec![first, second, LedgerDraft::resolved("C", alice)]);
    ledger.with(|l| {
        l.platform_revenue = U256::from(7u64);
        l.wins.insert(common::owner(), 3);
    });

    let anonymous = client(&ledger, None).dashboard_stats().await?;
    assert_eq!(anonymous.active_drafts, 2);
    assert_eq!(anonymous.total_active_pool, U256::from(75u64));
    assert_eq!(anonymous.user_wins, None);
    assert!(!anonymous.is_owner);

    let stats = client(&ledger, Some(common::owner())).dashboard_stats().await?;
    assert_eq!(stats.user_wins, Some(3));
    assert_eq!(stats.platform_revenue, U256::from(7u64));
    assert_eq!(stats.unique_participants, 1);
    assert!(stats.is_owner);
    Ok(())
}

#[tokio::test]
async fn cache_is_keyed_on_counter() -> eyre::Result<()> {
    let ledger = ledger(vec![LedgerDraft::open("A", 1), LedgerDraft::open("B", 1)]);
    let client = client(&ledger, None);

    assert_eq!(client.active_drafts_cached().await?.len(), 2);
    ledger.with(|l| l.drafts[0].is_active = false);
    assert_eq!(
        client.active_drafts_cached().await?.len(),
        2,
        "resolution elsewhere does not change the counter"
    );
    assert_eq!(ledger.with(|l| l.call_count(signatures::GET_DRAFT)), 2);

    client.cache().invalidate().await;
    assert_eq!(client.active_drafts_cached().await?.len(), 1);

    ledger.with(|l| l.drafts.push(LedgerDraft::open("C", 1)));
    assert_eq!(client.active_drafts_cached().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn resolution_events_are_decoded() -> eyre::Result<()> {
    let winner = address(0x77);
    let ledger = ledger(vec![LedgerDraft::resolved("A", winner)]);
    let mut id_topic = [0u8; 32];
    id_topic[31] = 1;
    ledger.with(|l| {
        l.logs.push(json!({
            "address": format!("0x{}", "dd".repeat(20)),
            "topics": [
                keccak256(signatures::DRAFT_RESOLVED).to_string(),
                format!("0x{}", hex::encode(id_topic)),
            ],
            "data": Bytes::from(encode(&[Token::Address(winner), Token::from(91u64)])).to_string(),
            "blockNumber": "0x2a",
        }))
    });

    let events = client(&ledger, None).resolution_events(0).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].draft_id, 1);
    assert_eq!(events[0].winner, winner);
    assert_eq!(events[0].score, U256::from(91u64));
    assert_eq!(events[0].block_number, Some(42));

    let err = client_with(&ledger, ResolutionAbi::TopThree, None)
        .resolution_events(0)
        .await
        .unwrap_err();
    assert!(err.is_validation());
    Ok(())
}

#[tokio::test]
async fn watch_yields_immediately() -> eyre::Result<()> {
    let ledger = ledger(vec![LedgerDraft::open("A", 1)]);
    let client = client(&ledger, None);

    let mut drafts = pin!(client.watch_active_drafts(Duration::from_secs(30)));
    let first = tokio::time::timeout(Duration::from_secs(1), drafts.next())
        .await?
        .expect("stream is endless")?;
    assert_eq!(first.len(), 1);

    let mut participants = pin!(client.watch_unique_participants(Duration::from_secs(60)));
    let count = tokio::time::timeout(Duration::from_secs(1), participants.next())
        .await?
        .expect("stream is endless")?;
    assert_eq!(count, 0);
    Ok(())
}

#[tokio::test]
async fn watch_rereads_the_ledger_on_every_tick() -> eyre::Result<()> {
    let ledger = ledger(vec![LedgerDraft::open("A", 1), LedgerDraft::open("B", 1)]);
    let client = client(&ledger, None);
    let mut drafts = pin!(client.watch_active_drafts(Duration::from_secs(1)));

    let first = tokio::time::timeout(Duration::from_secs(3), drafts.next())
        .await?
        .expect("stream is endless")?;
    assert_eq!(first.iter().map(|d| d.id).collect::<Vec<_>>(), [1, 2]);

    // Changed by other accounts, the draft counter stays the same.
    ledger.with(|l| {
        l.drafts[0].is_active = false;
        l.drafts[1].total_pool = U256::from(50u64);
    });

    let second = tokio::time::timeout(Duration::from_secs(3), drafts.next())
        .await?
        .expect("stream is endless")?;
    let rows = second
        .iter()
        .map(|d| (d.id, d.total_pool))
        .collect::<Vec<_>>();
    assert_eq!(rows, [(2, U256::from(50u64))]);
    Ok(())
}
