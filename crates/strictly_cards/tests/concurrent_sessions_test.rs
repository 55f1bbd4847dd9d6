//! Many tasks hammering one user's session through a shared dealer.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use strictly_cards::{CardId, Dealer, DeckEngine, InMemoryPool, UserId};

const TASKS: usize = 8;
const ROUNDS: usize = 60;

fn manager_names(count: usize) -> Vec<String> {
    (0..count).map(|n| format!("m{n:03}")).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_operations_on_one_session_stay_consistent() {
    let pool = InMemoryPool::new(["c1", "c2"], manager_names(400));
    let dealer = Dealer::new(DeckEngine::with_seed(5), Arc::new(pool));
    let user = UserId::new(42);
    let discards = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..TASKS)
        .map(|task| {
            let dealer = dealer.clone();
            let discards = Arc::clone(&discards);
            tokio::spawn(async move {
                for round in 0..ROUNDS {
                    match (task + round) % 4 {
                        0 => {
                            let _ = dealer.deal_initial_hand(user).await;
                        }
                        1 | 2 => {
                            if dealer.discard(user, 1).is_ok() {
                                discards.fetch_add(1, Ordering::SeqCst);
                            }
                        }
                        _ => {
                            let _ = dealer.draw_one(user).await;
                        }
                    }
                    let seen = dealer.session(user);
                    assert!(seen.is_consistent(), "Inconsistent session: {seen:?}");
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("Task panicked");
    }

    let session = dealer.session(user);
    assert!(session.is_consistent());

    let held: BTreeSet<&CardId> = session.current_hand().iter().collect();
    assert_eq!(held.len(), session.current_hand().len());
    let all: BTreeSet<&CardId> = held
        .iter()
        .copied()
        .chain(session.used_manager_cards())
        .collect();
    assert_eq!(
        all.len(),
        session.current_hand().len() + session.used_manager_cards().len()
    );

    // Deals never retire cards, so every retired card is one successful discard.
    assert_eq!(
        session.used_manager_cards().len(),
        discards.load(Ordering::SeqCst)
    );
    assert_eq!(dealer.registry().len(), 1);
}
