use crate::{Board, Square};
use std::fmt;

/// Outcome of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    #[default]
    Unknown,
    RedWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(GameResult::Unknown),
            1 => Some(GameResult::RedWins),
            2 => Some(GameResult::BlackWins),
            3 => Some(GameResult::Draw),
            _ => None,
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            GameResult::Unknown => 0,
            GameResult::RedWins => 1,
            GameResult::BlackWins => 2,
            GameResult::Draw => 3,
        }
    }
}

/// What part of a game the record covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordType {
    #[default]
    FullGame,
    Opening,
    MiddleGame,
    EndGame,
}

impl RecordType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(RecordType::FullGame),
            1 => Some(RecordType::Opening),
            2 => Some(RecordType::MiddleGame),
            3 => Some(RecordType::EndGame),
            _ => None,
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            RecordType::FullGame => 0,
            RecordType::Opening => 1,
            RecordType::MiddleGame => 2,
            RecordType::EndGame => 3,
        }
    }

    /// Full games and openings start from the standard position, so their
    /// stored placement is never consulted
    pub fn uses_initial_position(&self) -> bool {
        matches!(self, RecordType::FullGame | RecordType::Opening)
    }
}

/// The text fields of the header, each stored at a fixed offset in a fixed
/// width slot: one length byte followed by up to `width - 1` bytes of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Event,
    Date,
    Place,
    RedPlayer,
    BlackPlayer,
    TimeControl,
    RedTime,
    BlackTime,
    Commentator,
    Author,
}

impl TextField {
    pub const ALL: [TextField; 11] = [
        TextField::Title,
        TextField::Event,
        TextField::Date,
        TextField::Place,
        TextField::RedPlayer,
        TextField::BlackPlayer,
        TextField::TimeControl,
        TextField::RedTime,
        TextField::BlackTime,
        TextField::Commentator,
        TextField::Author,
    ];

    /// Offset of the length byte within the file
    pub const fn offset(self) -> usize {
        match self {
            TextField::Title => 0x50,
            TextField::Event => 0xd0,
            TextField::Date => 0x110,
            TextField::Place => 0x120,
            TextField::RedPlayer => 0x130,
            TextField::BlackPlayer => 0x140,
            TextField::TimeControl => 0x150,
            TextField::RedTime => 0x190,
            TextField::BlackTime => 0x1a0,
            TextField::Commentator => 0x1d0,
            TextField::Author => 0x1e0,
        }
    }

    /// Size of the slot including the length byte
    pub const fn width(self) -> usize {
        match self {
            TextField::Title | TextField::Event | TextField::TimeControl => 0x40,
            _ => 0x10,
        }
    }

    /// Most bytes of text the slot holds
    pub const fn capacity(self) -> usize {
        self.width() - 1
    }

    pub const fn name(self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::Event => "event",
            TextField::Date => "date",
            TextField::Place => "place",
            TextField::RedPlayer => "red player",
            TextField::BlackPlayer => "black player",
            TextField::TimeControl => "time control",
            TextField::RedTime => "red time",
            TextField::BlackTime => "black time",
            TextField::Commentator => "commentator",
            TextField::Author => "author",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptive header text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    pub title: String,
    pub event: String,
    pub date: String,
    pub place: String,
    pub red_player: String,
    pub black_player: String,
    pub time_control: String,
    pub red_time: String,
    pub black_time: String,
    pub commentator: String,
    pub author: String,
}

impl Metadata {
    pub fn get(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::Event => &self.event,
            TextField::Date => &self.date,
            TextField::Place => &self.place,
            TextField::RedPlayer => &self.red_player,
            TextField::BlackPlayer => &self.black_player,
            TextField::TimeControl => &self.time_control,
            TextField::RedTime => &self.red_time,
            TextField::BlackTime => &self.black_time,
            TextField::Commentator => &self.commentator,
            TextField::Author => &self.author,
        }
    }

    pub fn get_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Title => &mut self.title,
            TextField::Event => &mut self.event,
            TextField::Date => &mut self.date,
            TextField::Place => &mut self.place,
            TextField::RedPlayer => &mut self.red_player,
            TextField::BlackPlayer => &mut self.black_player,
            TextField::TimeControl => &mut self.time_control,
            TextField::RedTime => &mut self.red_time,
            TextField::BlackTime => &mut self.black_time,
            TextField::Commentator => &mut self.commentator,
            TextField::Author => &mut self.author,
        }
    }
}

/// A single ply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

/// A node in the move tree
///
/// The root node carries no move, only the comment that precedes the first
/// move. Every other node is a ply whose first child is the main line
/// continuation and whose remaining children are variations.
///
/// ```
/// use xqf::{Move, MoveNode, Square};
///
/// let mut root = MoveNode::root();
/// let mv = Move::new(Square::from_native(17), Square::from_native(47));
/// let tip = root.push_child(MoveNode::new(mv));
/// tip.comment = String::from("central cannon");
///
/// assert!(root.is_root());
/// assert_eq!(root.mainline().count(), 1);
/// ```
///
/// Cloning, comparing, formatting, and dropping walk the tree with an
/// explicit stack, so chains of any depth are safe. With the `serde` feature
/// a tree is (de)serialized as a flat post-order list of nodes, each giving
/// its number of children.
#[derive(Default)]
pub struct MoveNode {
    pub mv: Option<Move>,
    pub comment: String,
    pub children: Vec<MoveNode>,
}

impl MoveNode {
    /// Creates the synthetic root node
    pub fn root() -> Self {
        MoveNode::default()
    }

    pub fn new(mv: Move) -> Self {
        MoveNode {
            mv: Some(mv),
            comment: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn is_root(&self) -> bool {
        self.mv.is_none()
    }

    /// Appends a child and returns a reference to it
    pub fn push_child(&mut self, node: MoveNode) -> &mut MoveNode {
        let index = self.children.len();
        self.children.push(node);
        &mut self.children[index]
    }

    /// Follows the first child of each node, starting below this one
    pub fn mainline(&self) -> Mainline<'_> {
        Mainline {
            node: self.children.first(),
        }
    }
}

impl Drop for MoveNode {
    fn drop(&mut self) {
        // Unlink the descendants so that a long chain is freed iteratively
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl MoveNode {
    /// Visits every node below and including this one, children before
    /// their parent
    fn postorder(&self) -> PostOrder<'_> {
        PostOrder {
            pending: vec![(self, false)],
        }
    }

    /// Rebuilds a tree from `(move, comment, child count)` entries in
    /// post-order
    fn from_postorder<I>(entries: I) -> Result<MoveNode, &'static str>
    where
        I: IntoIterator<Item = (Option<Move>, String, usize)>,
    {
        let mut built: Vec<MoveNode> = Vec::new();
        for (mv, comment, children) in entries {
            let start = built
                .len()
                .checked_sub(children)
                .ok_or("node claims more children than precede it")?;
            let children = built.split_off(start);
            built.push(MoveNode {
                mv,
                comment,
                children,
            });
        }

        match (built.pop(), built.is_empty()) {
            (Some(root), true) => Ok(root),
            _ => Err("nodes do not form a single tree"),
        }
    }
}

struct PostOrder<'a> {
    pending: Vec<(&'a MoveNode, bool)>,
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = &'a MoveNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.pending.pop()?;
            if expanded || node.children.is_empty() {
                return Some(node);
            }

            self.pending.push((node, true));
            self.pending
                .extend(node.children.iter().rev().map(|x| (x, false)));
        }
    }
}

impl Clone for MoveNode {
    fn clone(&self) -> Self {
        let entries = self
            .postorder()
            .map(|x| (x.mv, x.comment.clone(), x.children.len()));

        // a post-order walk always describes a single tree
        MoveNode::from_postorder(entries).unwrap_or_default()
    }
}

impl PartialEq for MoveNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.mv != b.mv || a.comment != b.comment || a.children.len() != b.children.len() {
                return false;
            }
            pending.extend(a.children.iter().zip(b.children.iter()));
        }
        true
    }
}

impl Eq for MoveNode {}

/// One line of a [MoveNode]'s debug output
#[derive(Debug)]
#[allow(dead_code)]
struct NodeLine<'a> {
    depth: usize,
    mv: Option<Move>,
    comment: &'a str,
}

impl fmt::Debug for MoveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut pending = vec![(0usize, self)];
        while let Some((depth, node)) = pending.pop() {
            list.entry(&NodeLine {
                depth,
                mv: node.mv,
                comment: &node.comment,
            });
            pending.extend(node.children.iter().rev().map(|x| (depth + 1, x)));
        }
        list.finish()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct NodeEntry<'a> {
    mv: Option<Move>,
    comment: std::borrow::Cow<'a, str>,
    children: usize,
}

#[cfg(feature = "serde")]
impl serde::Serialize for MoveNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.postorder().map(|x| NodeEntry {
            mv: x.mv,
            comment: std::borrow::Cow::Borrowed(&x.comment),
            children: x.children.len(),
        }))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MoveNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<NodeEntry<'static>>::deserialize(deserializer)?;
        let entries = entries
            .into_iter()
            .map(|x| (x.mv, x.comment.into_owned(), x.children));
        MoveNode::from_postorder(entries).map_err(serde::de::Error::custom)
    }
}

/// Iterator over the main line of a [MoveNode]
#[derive(Debug, Clone)]
pub struct Mainline<'a> {
    node: Option<&'a MoveNode>,
}

impl<'a> Iterator for Mainline<'a> {
    type Item = &'a MoveNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.children.first();
        Some(node)
    }
}

/// A game record: header text, outcome, starting position, and moves
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRecord {
    pub metadata: Metadata,
    pub result: GameResult,
    pub record_type: RecordType,
    pub board: Board,
    pub root: MoveNode,
}

impl GameRecord {
    pub fn new() -> Self {
        GameRecord::default()
    }
}
