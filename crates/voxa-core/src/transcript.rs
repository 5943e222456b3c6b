//! Ordered, serializable conversation transcript.
//!
//! The transcript is a FIFO queue of conversation items under high-churn
//! enqueue/dequeue pressure: a new item roughly every tool call and every
//! streamed token batch. It is plain data end to end so it can be persisted
//! and rehydrated across reloads.
//!
//! Representation: monotonically increasing `head`/`tail` indices and a
//! sparse mapping from index to item. When the queue drains empty both
//! indices reset to zero, which bounds index growth over arbitrarily long
//! sessions at the cost of losing absolute position history.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payload::{
    AgentSwapNotice, LendingMarketCard, NftCollectionCard, ResultPayload, TokenCard,
    TransactionReceipt,
};

/// Who produced a plain message item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Closed set of transcript item contents.
///
/// The `type` tags are the tool payload tags plus the transport-level
/// `simple_message` and `loader_message`. Conversion from a tool payload
/// goes through the exhaustive `From<ResultPayload>` impl below, so adding a
/// tag is a compile-checked change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemContent {
    /// A plain conversational turn.
    SimpleMessage { role: Role, text: String },
    /// Ephemeral placeholder while an async tool call is pending.
    LoaderMessage { label: String },
    TokenData(TokenCard),
    NftCollection(NftCollectionCard),
    LendingMarket(LendingMarketCard),
    TransactionMessage(TransactionReceipt),
    AgentSwap(AgentSwapNotice),
}

impl ItemContent {
    /// The wire string of this content's `type` tag.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ItemContent::SimpleMessage { .. } => "simple_message",
            ItemContent::LoaderMessage { .. } => "loader_message",
            ItemContent::TokenData(_) => "token_data",
            ItemContent::NftCollection(_) => "nft_collection",
            ItemContent::LendingMarket(_) => "lending_market",
            ItemContent::TransactionMessage(_) => "transaction_message",
            ItemContent::AgentSwap(_) => "agent_swap",
        }
    }

    /// Loader items are placeholders, expected to be superseded by a durable
    /// item once the pending operation completes.
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, ItemContent::LoaderMessage { .. })
    }
}

impl From<ResultPayload> for ItemContent {
    fn from(payload: ResultPayload) -> Self {
        match payload {
            ResultPayload::TokenData(card) => ItemContent::TokenData(card),
            ResultPayload::NftCollection(card) => ItemContent::NftCollection(card),
            ResultPayload::LendingMarket(card) => ItemContent::LendingMarket(card),
            ResultPayload::TransactionMessage(receipt) => {
                ItemContent::TransactionMessage(receipt)
            }
            ResultPayload::AgentSwap(notice) => ItemContent::AgentSwap(notice),
        }
    }
}

/// One entry in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptItem {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub content: ItemContent,
}

/// Persisted shape of a [`TranscriptQueue`].
///
/// Every field defaults, so a partially missing snapshot still deserializes
/// and restoration can repair what is left.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSnapshot {
    #[serde(default)]
    pub head: u64,
    #[serde(default)]
    pub tail: u64,
    #[serde(default)]
    pub storage: BTreeMap<u64, TranscriptItem>,
}

/// FIFO queue of transcript items with O(1) amortized enqueue and dequeue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptQueue {
    head: u64,
    tail: u64,
    storage: BTreeMap<u64, TranscriptItem>,
}

/// Transcript handle shared between the dispatcher and tool handlers.
///
/// Mutating operations are each a single synchronous step under the lock, so
/// no torn state is observable between an enqueue and the next await point.
pub type SharedTranscript = Arc<Mutex<TranscriptQueue>>;

/// Lock a shared transcript, recovering from poisoning. The queue is plain
/// data and stays valid even if a holder panicked mid-turn.
pub fn lock_shared(transcript: &SharedTranscript) -> std::sync::MutexGuard<'_, TranscriptQueue> {
    transcript
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TranscriptQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh queue behind the shared handle type.
    pub fn shared() -> SharedTranscript {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Append content as a new item, returning the assigned id.
    ///
    /// Ids are the insertion index; they restart after an empty-reset, which
    /// is the documented loss of absolute position history.
    pub fn enqueue(&mut self, content: ItemContent) -> u64 {
        let id = self.tail;
        self.storage.insert(
            id,
            TranscriptItem {
                id,
                created_at: Utc::now(),
                content,
            },
        );
        self.tail += 1;
        id
    }

    /// Remove and return the oldest present item.
    ///
    /// Indices with no stored item (pruned loaders, snapshot corruption) are
    /// skipped. When the queue drains empty, `head` and `tail` reset to 0.
    pub fn dequeue(&mut self) -> Option<TranscriptItem> {
        while self.head < self.tail {
            let index = self.head;
            self.head += 1;
            let item = self.storage.remove(&index);
            if self.head == self.tail {
                self.head = 0;
                self.tail = 0;
            }
            if item.is_some() {
                return item;
            }
        }
        None
    }

    /// The oldest present item without removing it.
    pub fn peek(&self) -> Option<&TranscriptItem> {
        self.storage.range(self.head..self.tail).map(|(_, v)| v).next()
    }

    /// Index span between head and tail.
    ///
    /// Equal to the number of enqueues minus dequeues; pruned gaps still
    /// count toward the span until dequeued past.
    pub fn len(&self) -> usize {
        (self.tail - self.head) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Materialize all present items from head to tail in order, skipping
    /// any index with no stored item.
    pub fn to_vec(&self) -> Vec<TranscriptItem> {
        self.storage
            .range(self.head..self.tail)
            .map(|(_, item)| item.clone())
            .collect()
    }

    /// Borrowing iterator over present items in order.
    pub fn items(&self) -> impl Iterator<Item = &TranscriptItem> {
        self.storage.range(self.head..self.tail).map(|(_, v)| v)
    }

    /// Remove every ephemeral (loader) item in place.
    ///
    /// Leaves index gaps, which every read path skips. Returns the number of
    /// items removed.
    pub fn prune_ephemeral(&mut self) -> usize {
        let doomed: Vec<u64> = self
            .storage
            .range(self.head..self.tail)
            .filter(|(_, item)| item.content.is_ephemeral())
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            self.storage.remove(id);
        }
        doomed.len()
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.storage.clear();
    }

    /// Plain-data snapshot for persistence.
    pub fn snapshot(&self) -> TranscriptSnapshot {
        TranscriptSnapshot {
            head: self.head,
            tail: self.tail,
            storage: self.storage.clone(),
        }
    }

    /// Snapshot serialized as JSON, `None` if serialization fails.
    pub fn snapshot_json(&self) -> Option<String> {
        serde_json::to_string(&self.snapshot()).ok()
    }

    /// Rebuild a queue from a snapshot, best effort.
    ///
    /// Indices are widened to cover every stored item and an empty storage
    /// resets to a fresh queue, so inconsistent input is repaired (with a
    /// warning) rather than rejected.
    pub fn from_snapshot(snapshot: TranscriptSnapshot) -> Self {
        let TranscriptSnapshot { head, tail, storage } = snapshot;

        // Widening around the stored items guarantees head <= tail, so the
        // repaired indices are always consistent.
        let (repaired_head, repaired_tail) =
            match (storage.keys().next(), storage.keys().next_back()) {
                (Some(min), Some(max)) => (head.min(*min), tail.max(max + 1)),
                _ => (0, 0),
            };
        if (repaired_head, repaired_tail) != (head, tail) {
            tracing::warn!(
                head,
                tail,
                repaired_head,
                repaired_tail,
                "repaired inconsistent transcript snapshot indices"
            );
        }

        Self {
            head: repaired_head,
            tail: repaired_tail,
            storage,
        }
    }

    /// Rebuild from persisted JSON; malformed input degrades to an empty
    /// queue with a warning, never an error.
    pub fn restore_json(raw: &str) -> Self {
        match serde_json::from_str::<TranscriptSnapshot>(raw) {
            Ok(snapshot) => Self::from_snapshot(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "malformed transcript snapshot, starting empty");
                Self::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn message(text: &str) -> ItemContent {
        ItemContent::SimpleMessage {
            role: Role::User,
            text: text.to_string(),
        }
    }

    fn loader(label: &str) -> ItemContent {
        ItemContent::LoaderMessage {
            label: label.to_string(),
        }
    }

    #[test]
    fn fifo_order_is_preserved() {
        let mut queue = TranscriptQueue::new();
        queue.enqueue(message("one"));
        queue.enqueue(message("two"));
        queue.enqueue(message("three"));

        assert_eq!(queue.len(), 3);
        let texts: Vec<_> = queue
            .to_vec()
            .into_iter()
            .map(|item| match item.content {
                ItemContent::SimpleMessage { text, .. } => text,
                other => panic!("unexpected content {other:?}"),
            })
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);

        let first = queue.dequeue().unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn empty_reset_restarts_indices_at_zero() {
        let mut queue = TranscriptQueue::new();
        queue.enqueue(message("a"));
        queue.enqueue(message("b"));
        assert!(queue.dequeue().is_some());
        assert!(queue.dequeue().is_some());
        assert!(queue.is_empty());

        // Next enqueue lands at index 0 again.
        let id = queue.enqueue(message("c"));
        assert_eq!(id, 0);
        assert_eq!(queue.peek().unwrap().id, 0);
    }

    #[test]
    fn dequeue_on_empty_returns_none() {
        let mut queue = TranscriptQueue::new();
        assert!(queue.dequeue().is_none());
        assert!(queue.peek().is_none());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn prune_removes_loaders_and_keeps_order() {
        let mut queue = TranscriptQueue::new();
        queue.enqueue(message("before"));
        queue.enqueue(loader("fetching token data"));
        queue.enqueue(message("after"));

        assert_eq!(queue.prune_ephemeral(), 1);
        // Span still covers the gap; reads skip it.
        assert_eq!(queue.len(), 3);
        let tags: Vec<_> = queue.items().map(|i| i.content.type_tag()).collect();
        assert_eq!(tags, ["simple_message", "simple_message"]);

        // Dequeue walks over the gap without yielding it.
        assert_eq!(queue.dequeue().unwrap().id, 0);
        assert_eq!(queue.dequeue().unwrap().id, 2);
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn snapshot_round_trip_reproduces_items() {
        let mut queue = TranscriptQueue::new();
        queue.enqueue(message("hello"));
        queue.enqueue(loader("working"));
        queue.enqueue(message("world"));
        queue.dequeue();

        let json = queue.snapshot_json().unwrap();
        let restored = TranscriptQueue::restore_json(&json);
        assert_eq!(restored.to_vec(), queue.to_vec());
        assert_eq!(restored.len(), queue.len());
    }

    #[test]
    fn restore_degrades_gracefully() {
        // Malformed JSON: empty queue.
        let queue = TranscriptQueue::restore_json("{not json");
        assert!(queue.is_empty());

        // Partially missing fields: best effort from what is present.
        let queue = TranscriptQueue::restore_json(r#"{"head": 3}"#);
        assert!(queue.is_empty());

        // Indices narrower than storage are widened to cover it.
        let mut source = TranscriptQueue::new();
        source.enqueue(message("kept"));
        let mut snapshot = source.snapshot();
        snapshot.head = 1;
        snapshot.tail = 0;
        let restored = TranscriptQueue::from_snapshot(snapshot);
        assert_eq!(restored.to_vec(), source.to_vec());
    }

    #[test]
    fn clear_resets_everything() {
        let mut queue = TranscriptQueue::new();
        queue.enqueue(message("x"));
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.enqueue(message("y")), 0);
    }

    #[test]
    fn item_content_serializes_with_transport_tags() {
        let value = serde_json::to_value(message("hi")).unwrap();
        assert_eq!(value["type"], "simple_message");
        assert_eq!(value["role"], "user");

        let value = serde_json::to_value(loader("thinking")).unwrap();
        assert_eq!(value["type"], "loader_message");
    }

    proptest! {
        // FIFO law: size always equals enqueues minus dequeues, and to_vec
        // yields present items in insertion order.
        #[test]
        fn queue_fifo_law(ops in proptest::collection::vec(any::<bool>(), 1..200)) {
            let mut queue = TranscriptQueue::new();
            let mut model: std::collections::VecDeque<String> = Default::default();
            let mut counter = 0u64;

            for op in ops {
                if op {
                    let text = format!("item-{counter}");
                    counter += 1;
                    queue.enqueue(message(&text));
                    model.push_back(text);
                } else {
                    let popped = queue.dequeue().map(|item| match item.content {
                        ItemContent::SimpleMessage { text, .. } => text,
                        other => panic!("unexpected content {other:?}"),
                    });
                    prop_assert_eq!(popped, model.pop_front());
                }
                prop_assert_eq!(queue.len(), model.len());
                let texts: Vec<_> = queue
                    .items()
                    .map(|item| match &item.content {
                        ItemContent::SimpleMessage { text, .. } => text.clone(),
                        other => panic!("unexpected content {other:?}"),
                    })
                    .collect();
                let expected: Vec<_> = model.iter().cloned().collect();
                prop_assert_eq!(texts, expected);
            }
        }

        // Round-trip law: restoring a snapshot reproduces to_vec exactly.
        #[test]
        fn queue_round_trip_law(
            ops in proptest::collection::vec(any::<bool>(), 0..100)
        ) {
            let mut queue = TranscriptQueue::new();
            let mut counter = 0u64;
            for op in ops {
                if op {
                    queue.enqueue(message(&format!("item-{counter}")));
                    counter += 1;
                } else {
                    queue.dequeue();
                }
            }
            let restored = TranscriptQueue::from_snapshot(queue.snapshot());
            prop_assert_eq!(restored.to_vec(), queue.to_vec());
        }
    }
}
