use super::*;

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CommentNode {
  pub(crate) children: Vec<CommentNode>,
  pub(crate) depth: usize,
  pub(crate) index: usize,
}

/// Parent-grouped view over a flat comment snapshot.
///
/// Nodes refer to comments by their index in the snapshot; nothing owns
/// another node's comment. Siblings keep snapshot order. Comments whose
/// parent is missing from the snapshot are never reached.
pub(crate) struct CommentTree<'a> {
  comments: &'a [Comment],
  groups: HashMap<u64, Vec<usize>>,
}

/// Lazy pre-order walk yielding `(index, depth)` pairs.
pub(crate) struct Rows<'t, 'a> {
  stack: Vec<(usize, usize)>,
  tree: &'t CommentTree<'a>,
  visited: HashSet<usize>,
}

impl CommentNode {
  pub(crate) fn count(&self) -> usize {
    let mut total = 0usize;
    let mut pending = vec![self];

    while let Some(node) = pending.pop() {
      total = total.saturating_add(1);
      pending.extend(&node.children);
    }

    total
  }
}

/// Unlinks descendants one at a time so a long reply chain is not dropped
/// through nested destructor calls.
impl Drop for CommentNode {
  fn drop(&mut self) {
    let mut pending = mem::take(&mut self.children);

    while let Some(mut node) = pending.pop() {
      pending.append(&mut node.children);
    }
  }
}

impl<'a> CommentTree<'a> {
  pub(crate) fn children_of(&self, parent: u64) -> &[usize] {
    self
      .groups
      .get(&parent)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  pub(crate) fn comment(&self, index: usize) -> Option<&'a Comment> {
    self.comments.get(index)
  }

  pub(crate) fn new(comments: &'a [Comment]) -> Self {
    let mut groups: HashMap<u64, Vec<usize>> = HashMap::new();

    for (index, comment) in comments.iter().enumerate() {
      groups
        .entry(comment.parent_comment_id)
        .or_default()
        .push(index);
    }

    Self { comments, groups }
  }

  /// Nests the pre-order rows. `open` holds the current ancestor chain, so
  /// its length always equals the depth of the next node's parent level.
  pub(crate) fn render(&self, parent: u64) -> Vec<CommentNode> {
    fn close(open: &mut Vec<CommentNode>, roots: &mut Vec<CommentNode>) {
      if let Some(node) = open.pop() {
        match open.last_mut() {
          Some(parent) => parent.children.push(node),
          None => roots.push(node),
        }
      }
    }

    let mut roots = Vec::new();
    let mut open: Vec<CommentNode> = Vec::new();

    for (index, depth) in self.rows(parent) {
      while open.len() > depth {
        close(&mut open, &mut roots);
      }

      open.push(CommentNode {
        children: Vec::new(),
        depth,
        index,
      });
    }

    while !open.is_empty() {
      close(&mut open, &mut roots);
    }

    roots
  }

  pub(crate) fn rows(&self, parent: u64) -> Rows<'_, 'a> {
    let stack = self
      .children_of(parent)
      .iter()
      .rev()
      .map(|&index| (index, 0))
      .collect();

    Rows {
      stack,
      tree: self,
      visited: self.start_visited(parent),
    }
  }

  fn start_visited(&self, parent: u64) -> HashSet<usize> {
    if parent == Comment::ROOT {
      return HashSet::new();
    }

    self
      .comments
      .iter()
      .enumerate()
      .filter(|(_, comment)| comment.id == parent)
      .map(|(index, _)| index)
      .collect()
  }
}

impl Iterator for Rows<'_, '_> {
  type Item = (usize, usize);

  fn next(&mut self) -> Option<Self::Item> {
    while let Some((index, depth)) = self.stack.pop() {
      if !self.visited.insert(index) {
        continue;
      }

      let id = self.tree.comments[index].id;

      self.stack.extend(
        self
          .tree
          .children_of(id)
          .iter()
          .rev()
          .map(|&child| (child, depth.saturating_add(1))),
      );

      return Some((index, depth));
    }

    None
  }
}
