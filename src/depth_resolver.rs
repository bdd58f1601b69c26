use super::*;

enum WalkEnd {
  Known(usize),
  Terminal,
}

/// Nesting depth of each comment in a snapshot, 0 for top-level.
///
/// A walk up the parent chain stops at the root reference, at a parent that
/// is not in the snapshot, or at a parent already seen during the same walk.
/// Depths are memoized, so resolving every comment of a chain of length N
/// costs O(N) in total. Cycles yield an under-estimated but finite depth.
pub(crate) struct DepthResolver {
  depths: HashMap<u64, usize>,
  parents: HashMap<u64, u64>,
}

impl DepthResolver {
  pub(crate) fn depth(&mut self, id: u64) -> usize {
    if let Some(depth) = self.depths.get(&id) {
      return *depth;
    }

    if !self.parents.contains_key(&id) {
      return 0;
    }

    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = id;

    let end = loop {
      if let Some(depth) = self.depths.get(&current) {
        break WalkEnd::Known(*depth);
      }

      seen.insert(current);
      chain.push(current);

      let parent = self.parents.get(&current).copied().unwrap_or(Comment::ROOT);

      if parent == Comment::ROOT
        || !self.parents.contains_key(&parent)
        || seen.contains(&parent)
      {
        break WalkEnd::Terminal;
      }

      current = parent;
    };

    let mut depth = match end {
      WalkEnd::Known(depth) => depth.saturating_add(1),
      WalkEnd::Terminal => 0,
    };

    for node in chain.into_iter().rev() {
      self.depths.insert(node, depth);
      depth = depth.saturating_add(1);
    }

    self.depths.get(&id).copied().unwrap_or(0)
  }

  pub(crate) fn new(comments: &[Comment]) -> Self {
    Self {
      depths: HashMap::with_capacity(comments.len()),
      parents: comments
        .iter()
        .map(|comment| (comment.id, comment.parent_comment_id))
        .collect(),
    }
  }

  pub(crate) fn resolve(comments: &[Comment]) -> HashMap<u64, usize> {
    let mut resolver = Self::new(comments);

    comments
      .iter()
      .map(|comment| (comment.id, resolver.depth(comment.id)))
      .collect()
  }
}
