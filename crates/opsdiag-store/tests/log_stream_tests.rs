use opsdiag_model::{AgentId, MessageKind, Sender};
use opsdiag_store::LogStream;
use proptest::prelude::*;

fn sender() -> Sender {
    Sender::new(AgentId::new(), "worker")
}

proptest! {
    // Observed content values form a chain of prefixes ending in the final
    // content: append-only, monotonically non-decreasing growth.
    #[test]
    fn prop_content_grows_by_prefixes(
        chunks in proptest::collection::vec("[a-z ]{0,12}", 0..20)
    ) {
        let log = LogStream::new();
        let id = log.begin(sender(), None, MessageKind::Report);

        let mut previous = String::new();
        for chunk in &chunks {
            log.append_chunk(id, chunk);
            let current = log.entry(id).unwrap().content;
            prop_assert!(current.starts_with(&previous));
            prop_assert!(current.len() >= previous.len());
            previous = current;
        }

        log.finalize(id);
        prop_assert_eq!(log.entry(id).unwrap().content, chunks.concat());
    }

    // Entry order is begin order, independent of append/finalize
    // interleaving.
    #[test]
    fn prop_entry_order_is_begin_order(count in 1usize..12) {
        let log = LogStream::new();
        let ids: Vec<_> = (0..count)
            .map(|_| log.begin(sender(), None, MessageKind::Report))
            .collect();

        // Touch entries in reverse to prove order is not touch order.
        for id in ids.iter().rev() {
            log.append_chunk(*id, "x");
            log.finalize(*id);
        }

        let recorded: Vec<_> = log.entries().iter().map(|e| e.id).collect();
        prop_assert_eq!(recorded, ids);
    }
}

#[test]
fn finalized_entries_reject_further_growth() {
    let log = LogStream::new();
    let id = log.begin(sender(), Some(AgentId::new()), MessageKind::Report);

    log.append_chunk(id, "all checks passed");
    log.finalize(id);
    log.finalize(id);
    log.append_chunk(id, " -- late chunk");

    let entry = log.entry(id).unwrap();
    assert_eq!(entry.content, "all checks passed");
    assert!(!entry.is_streaming);
}
