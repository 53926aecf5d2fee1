//! Reply-tree assembly for comments.
//!
//! Comments reference their parent by id only. Trees are assembled on
//! demand through an id-to-position index, so a missing parent never
//! leaves a dangling reference: such a comment simply becomes a root.
//!
//! Stored reply chains have no depth limit, but assembled trees do. Replies
//! nested below [`MAX_THREAD_DEPTH`] are attached to their ancestor one
//! level above the cap, so serializing or dropping a tree never recurses
//! deeper than the cap.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Comment;

/// Deepest nesting level of an assembled thread; roots are level 1.
pub const MAX_THREAD_DEPTH: usize = 32;

/// A comment together with its replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    /// The comment itself.
    #[serde(flatten)]
    pub comment: Comment,
    /// Direct replies, in input order.
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    /// Number of comments in this subtree, including the root.
    pub fn len(&self) -> usize {
        1 + self.replies.iter().map(CommentNode::len).sum::<usize>()
    }

    /// Always false; a node holds at least its own comment.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Assemble reply trees from a flat list.
///
/// Sibling order follows the input order, so passing comments sorted by
/// creation time yields chronologically ordered threads. Comments whose
/// parent is absent from `comments` are returned as roots. Replies that
/// would sit below [`MAX_THREAD_DEPTH`] are flattened onto the deepest
/// allowed level, after the reply they answer. Works iteratively.
pub fn build_threads(comments: Vec<Comment>) -> Vec<CommentNode> {
    let index: HashMap<Uuid, usize> = comments
        .iter()
        .enumerate()
        .map(|(pos, c)| (c.id, pos))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut roots = Vec::new();
    for (pos, comment) in comments.iter().enumerate() {
        match comment.parent_id.and_then(|p| index.get(&p)) {
            Some(&parent) if parent != pos => children[parent].push(pos),
            _ => roots.push(pos),
        }
    }

    // Pre-order walk from the roots. Each node records the parent it is
    // attached under and its level; a child of a node at the cap shares
    // that node's parent instead.
    let mut attached: Vec<Option<usize>> = vec![None; comments.len()];
    let mut level = vec![0usize; comments.len()];
    let mut placed: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut order = Vec::with_capacity(comments.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    for &root in &roots {
        level[root] = 1;
    }
    while let Some(pos) = stack.pop() {
        order.push(pos);
        if let Some(parent) = attached[pos] {
            placed[parent].push(pos);
        }
        for &child in children[pos].iter().rev() {
            if level[pos] < MAX_THREAD_DEPTH {
                attached[child] = Some(pos);
                level[child] = level[pos] + 1;
            } else {
                attached[child] = attached[pos];
                level[child] = level[pos];
            }
            stack.push(child);
        }
    }

    // Attached parents precede their replies in `order`, so the reversed
    // walk builds every reply before the node that holds it.
    let mut pending: Vec<Option<Comment>> = comments.into_iter().map(Some).collect();
    let mut built: Vec<Option<CommentNode>> = vec![None; pending.len()];
    for &pos in order.iter().rev() {
        let replies = placed[pos]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        if let Some(comment) = pending[pos].take() {
            built[pos] = Some(CommentNode { comment, replies });
        }
    }

    roots
        .into_iter()
        .filter_map(|pos| built[pos].take())
        .collect()
}
