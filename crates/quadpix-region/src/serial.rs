//! Preorder text serialization for quadtrees
//!
//! One line per node, parents before children, children in TL, TR, BL, BR
//! order with absent slots skipped:
//!
//! ```text
//! N 127 0 4 0 4 1111
//! L 0 0 2 0 2
//! L 255 0 2 2 2
//! L 0 2 2 0 2
//! L 255 2 2 2 2
//! ```
//!
//! Fields are `tag intensity row height col width`. `L` marks a leaf and
//! `N` a node with children.
//!
//! # Formats
//!
//! - [`PreorderFormat::Masked`] appends the child-presence mask to `N`
//!   lines as four binary digits in TL, TR, BL, BR order. The reader
//!   consumes exactly the masked children, so slots survive a round trip
//!   and truncated input is detected.
//! - [`PreorderFormat::Plain`] writes six fields only. The reader then
//!   collects children until their areas cover the parent and derives
//!   each child's slot from its offset inside the parent.
//!
//! Both forms may be mixed in one input; the field count of each `N`
//! line decides how its children are read.

use crate::error::{RegionError, RegionResult};
use crate::quadtree::{QuadNode, QuadTree, SplitPolicy, child_regions};
use quadpix_core::{Quadrant, Region};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Maximum input size in bytes
const MAX_INPUT_SIZE: u64 = 1 << 30;

/// Maximum nesting depth accepted by the reader
const MAX_DEPTH: usize = 64;

/// Line layout used when writing preorder text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreorderFormat {
    /// `N` lines carry a four-digit child mask
    #[default]
    Masked,
    /// Six fields on every line
    Plain,
}

impl QuadTree {
    /// Write the tree as preorder text.
    pub fn write_preorder(
        &self,
        writer: &mut impl Write,
        format: PreorderFormat,
    ) -> RegionResult<()> {
        for node in self.preorder() {
            let tag = if node.is_leaf() { 'L' } else { 'N' };
            write!(
                writer,
                "{} {} {} {} {} {}",
                tag,
                node.intensity(),
                node.row(),
                node.height(),
                node.col(),
                node.width()
            )?;
            if format == PreorderFormat::Masked && !node.is_leaf() {
                let mask: String = Quadrant::ALL
                    .iter()
                    .map(|&q| if node.child(q).is_some() { '1' } else { '0' })
                    .collect();
                write!(writer, " {mask}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the tree as preorder text into a byte vector.
    pub fn write_preorder_to_bytes(&self, format: PreorderFormat) -> RegionResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_preorder(&mut buf, format)?;
        Ok(buf)
    }

    /// Write the tree as preorder text to a file.
    pub fn write_preorder_to_file(
        &self,
        path: impl AsRef<Path>,
        format: PreorderFormat,
    ) -> RegionResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_preorder(&mut writer, format)
    }

    /// Read a tree from preorder text.
    pub fn read_preorder(reader: &mut impl Read) -> RegionResult<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE).read_to_end(&mut buf)?;
        Self::read_preorder_from_bytes(&buf)
    }

    /// Read a tree from preorder text in memory.
    pub fn read_preorder_from_bytes(data: &[u8]) -> RegionResult<Self> {
        let text = String::from_utf8_lossy(data);
        let mut parser = Parser::new(&text);
        let root = parser.parse_root()?;
        parser.finish()?;
        Ok(QuadTree::from_root(root))
    }

    /// Read a tree from a preorder text file.
    pub fn read_preorder_from_file(path: impl AsRef<Path>) -> RegionResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        Self::read_preorder(&mut reader)
    }
}

/// Dump `tree` in masked preorder form to the file at `path`.
pub fn dump_preorder(tree: &QuadTree, path: impl AsRef<Path>) -> RegionResult<()> {
    let path = path.as_ref();
    log::info!(
        "dumping quadtree ({} nodes) to {}",
        tree.node_count(),
        path.display()
    );
    tree.write_preorder_to_file(path, PreorderFormat::Masked)
}

/// Load a quadtree from the preorder text file at `path`.
pub fn load_preorder(path: impl AsRef<Path>) -> RegionResult<QuadTree> {
    let path = path.as_ref();
    let tree = QuadTree::read_preorder_from_file(path)?;
    log::info!(
        "loaded {}x{} quadtree ({} nodes) from {}",
        tree.width(),
        tree.height(),
        tree.node_count(),
        path.display()
    );
    Ok(tree)
}

/// One parsed line
#[derive(Debug, Clone, Copy)]
struct Entry {
    line: usize,
    internal: bool,
    intensity: u8,
    region: Region,
    mask: Option<[bool; 4]>,
}

struct Parser<'a> {
    lines: Vec<(usize, &'a str)>,
    pos: usize,
    last_line: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l))
            .filter(|(_, l)| !l.trim().is_empty())
            .collect();
        let last_line = text.lines().count();
        Self {
            lines,
            pos: 0,
            last_line,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    fn next_entry(&mut self) -> RegionResult<Entry> {
        let &(line, text) = self
            .lines
            .get(self.pos)
            .ok_or_else(|| RegionError::format(self.last_line + 1, "unexpected end of input"))?;
        self.pos += 1;
        parse_line(line, text)
    }

    fn parse_root(&mut self) -> RegionResult<QuadNode> {
        if self.at_end() {
            return Err(RegionError::format(1, "no nodes in input"));
        }
        let entry = self.next_entry()?;
        self.build(entry, 1)
    }

    fn finish(&self) -> RegionResult<()> {
        match self.lines.get(self.pos) {
            Some(&(line, _)) => Err(RegionError::format(
                line,
                "trailing content after the root subtree",
            )),
            None => Ok(()),
        }
    }

    fn build(&mut self, entry: Entry, depth: usize) -> RegionResult<QuadNode> {
        if depth > MAX_DEPTH {
            return Err(RegionError::format(
                entry.line,
                format!("tree deeper than {MAX_DEPTH} levels"),
            ));
        }
        if !entry.internal {
            return Ok(QuadNode::leaf(entry.region, entry.intensity));
        }

        let children = match entry.mask {
            Some(mask) => self.read_masked_children(&entry, mask, depth)?,
            None => self.read_covering_children(&entry, depth)?,
        };
        Ok(QuadNode::with_children(
            entry.region,
            entry.intensity,
            children,
        ))
    }

    fn read_masked_children(
        &mut self,
        parent: &Entry,
        mask: [bool; 4],
        depth: usize,
    ) -> RegionResult<[Option<QuadNode>; 4]> {
        if !mask.iter().any(|&b| b) {
            return Err(RegionError::format(
                parent.line,
                "internal node with empty child mask",
            ));
        }

        let mut children: [Option<QuadNode>; 4] = [None, None, None, None];
        let mut covered = 0u64;
        for quadrant in Quadrant::ALL {
            if !mask[quadrant.index()] {
                continue;
            }
            let entry = self.next_entry()?;
            check_child(parent, &entry, &children)?;
            check_slot(parent, &entry, quadrant)?;
            covered += entry.region.area();
            children[quadrant.index()] = Some(self.build(entry, depth + 1)?);
        }

        if covered != parent.region.area() {
            return Err(RegionError::format(
                parent.line,
                format!(
                    "children cover {covered} of {} pixels",
                    parent.region.area()
                ),
            ));
        }
        Ok(children)
    }

    fn read_covering_children(
        &mut self,
        parent: &Entry,
        depth: usize,
    ) -> RegionResult<[Option<QuadNode>; 4]> {
        let region = parent.region;
        let target = region.area();
        let mut children: [Option<QuadNode>; 4] = [None, None, None, None];
        let mut covered = 0u64;
        let mut count = 0usize;

        while covered < target {
            if self.at_end() {
                if count == 0 {
                    return Err(RegionError::format(
                        parent.line,
                        "internal node without children",
                    ));
                }
                log::warn!(
                    "preorder input ended inside node at line {}: {count} children cover {covered} of {target} pixels",
                    parent.line
                );
                break;
            }

            let entry = self.next_entry()?;
            check_child(parent, &entry, &children)?;

            let slot = region.quadrant_of(entry.region.row, entry.region.col).index();
            if children[slot].is_some() {
                return Err(RegionError::format(
                    entry.line,
                    format!("child slot {slot} of node at line {} already used", parent.line),
                ));
            }

            covered += entry.region.area();
            count += 1;
            children[slot] = Some(self.build(entry, depth + 1)?);
        }
        Ok(children)
    }
}

/// Validate a child against its parent and already-read siblings.
fn check_child(
    parent: &Entry,
    child: &Entry,
    siblings: &[Option<QuadNode>; 4],
) -> RegionResult<()> {
    if !parent.region.contains(&child.region) || parent.region == child.region {
        return Err(RegionError::format(
            child.line,
            format!(
                "child {} does not lie strictly inside parent {}",
                child.region, parent.region
            ),
        ));
    }
    if siblings
        .iter()
        .flatten()
        .any(|s| s.region().overlaps(&child.region))
    {
        return Err(RegionError::format(
            child.line,
            format!("child {} overlaps a sibling", child.region),
        ));
    }
    Ok(())
}

/// A masked child must occupy the rectangle its slot names under one of
/// the split policies.
fn check_slot(parent: &Entry, child: &Entry, quadrant: Quadrant) -> RegionResult<()> {
    let slot = quadrant.index();
    let fits = [SplitPolicy::Quadrants, SplitPolicy::LinearPairs]
        .into_iter()
        .any(|split| child_regions(&parent.region, split)[slot] == Some(child.region));
    if !fits {
        return Err(RegionError::format(
            child.line,
            format!(
                "child {} does not fit slot {quadrant:?} of parent {}",
                child.region, parent.region
            ),
        ));
    }
    Ok(())
}

fn parse_line(line: usize, text: &str) -> RegionResult<Entry> {
    let fields: Vec<&str> = text.split_whitespace().collect();

    let internal = match fields.first().copied() {
        Some("L") => false,
        Some("N") => true,
        Some(tag) => {
            return Err(RegionError::format(line, format!("unknown tag '{tag}'")));
        }
        None => return Err(RegionError::format(line, "empty line")),
    };

    let expected: &[usize] = if internal { &[6, 7] } else { &[6] };
    if !expected.contains(&fields.len()) {
        return Err(RegionError::format(
            line,
            format!("expected {:?} fields, found {}", expected, fields.len()),
        ));
    }

    let number = |idx: usize, name: &str| -> RegionResult<u32> {
        fields[idx].parse::<u32>().map_err(|_| {
            RegionError::format(line, format!("invalid {name} '{}'", fields[idx]))
        })
    };

    let intensity = number(1, "intensity")?;
    let intensity = u8::try_from(intensity).map_err(|_| {
        RegionError::format(line, format!("intensity {intensity} exceeds 255"))
    })?;
    let region = Region::new(
        number(2, "row")?,
        number(4, "col")?,
        number(3, "height")?,
        number(5, "width")?,
    );
    if region.is_empty() {
        return Err(RegionError::format(line, "zero height or width"));
    }
    if region.row.checked_add(region.height).is_none()
        || region.col.checked_add(region.width).is_none()
    {
        return Err(RegionError::format(line, "region exceeds coordinate range"));
    }

    let mask = match fields.get(6) {
        Some(digits) => Some(parse_mask(line, digits)?),
        None => None,
    };

    Ok(Entry {
        line,
        internal,
        intensity,
        region,
        mask,
    })
}

fn parse_mask(line: usize, digits: &str) -> RegionResult<[bool; 4]> {
    let bits: Vec<bool> = digits
        .chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(()),
        })
        .collect::<Result<_, ()>>()
        .map_err(|_| RegionError::format(line, format!("invalid child mask '{digits}'")))?;
    <[bool; 4]>::try_from(bits)
        .map_err(|_| RegionError::format(line, format!("child mask '{digits}' must have 4 digits")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadtree::build_quadtree;
    use quadpix_core::RasterImage;

    const HALVES: &str = "N 127 0 4 0 4 1111\n\
                          L 0 0 2 0 2\n\
                          L 255 0 2 2 2\n\
                          L 0 2 2 0 2\n\
                          L 255 2 2 2 2\n";

    fn halves_tree() -> QuadTree {
        let data = [
            0, 0, 255, 255, //
            0, 0, 255, 255, //
            0, 0, 255, 255, //
            0, 0, 255, 255,
        ];
        let image = RasterImage::from_data(4, 4, data.to_vec()).unwrap();
        build_quadtree(&image, 10.0).unwrap()
    }

    #[test]
    fn test_write_masked() {
        let bytes = halves_tree()
            .write_preorder_to_bytes(PreorderFormat::Masked)
            .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), HALVES);
    }

    #[test]
    fn test_write_plain() {
        let bytes = halves_tree()
            .write_preorder_to_bytes(PreorderFormat::Plain)
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("N 127 0 4 0 4\nL 0 0 2 0 2\n"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_read_masked() {
        let tree = QuadTree::read_preorder_from_bytes(HALVES.as_bytes()).unwrap();
        assert_eq!(tree, halves_tree());
    }

    #[test]
    fn test_read_plain_recovers_slots() {
        let plain = "N 0 0 1 0 3\nL 0 0 1 0 1\nL 0 0 1 1 2\n";
        let tree = QuadTree::read_preorder_from_bytes(plain.as_bytes()).unwrap();
        let root = tree.root();
        assert_eq!(root.child_mask(), 0b1100);
        assert_eq!(
            root.child(Quadrant::BottomRight).unwrap().region(),
            Region::new(0, 1, 1, 2)
        );
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let text = "\nL 5 0 1 0 1\n\n";
        let tree = QuadTree::read_preorder_from_bytes(text.as_bytes()).unwrap();
        assert_eq!(tree.root().intensity(), 5);
    }

    #[test]
    fn test_read_truncated_masked_is_error() {
        let truncated = "N 127 0 4 0 4 1111\nL 0 0 2 0 2\nL 255 0 2 2 2\n";
        let err = QuadTree::read_preorder_from_bytes(truncated.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unexpected end"));
    }

    #[test]
    fn test_read_truncated_plain_is_lenient() {
        let truncated = "N 127 0 4 0 4\nL 0 0 2 0 2\nL 255 0 2 2 2\n";
        let tree = QuadTree::read_preorder_from_bytes(truncated.as_bytes()).unwrap();
        assert_eq!(tree.root().child_count(), 2);
    }

    #[test]
    fn test_read_childless_internal_is_error() {
        assert!(QuadTree::read_preorder_from_bytes(b"N 1 0 2 0 2\n").is_err());
        assert!(QuadTree::read_preorder_from_bytes(b"N 1 0 2 0 2 0000\n").is_err());
    }

    #[test]
    fn test_read_rejects_bad_lines() {
        let cases: &[&[u8]] = &[
            b"X 1 0 1 0 1\n",
            b"L 1 0 1 0\n",
            b"L 1 0 1 0 1 1111\n",
            b"L abc 0 1 0 1\n",
            b"L 256 0 1 0 1\n",
            b"L 1 0 0 0 1\n",
            b"L 1 0 1 0 -1\n",
            b"N 1 0 2 0 2 11x1\n",
            b"N 1 0 2 0 2 111\n",
            b"",
        ];
        for case in cases {
            let err = QuadTree::read_preorder_from_bytes(case).unwrap_err();
            assert!(
                matches!(err, RegionError::Format { .. }),
                "unexpected error {err:?} for {:?}",
                String::from_utf8_lossy(case)
            );
        }
    }

    #[test]
    fn test_read_rejects_escaping_child() {
        let text = "N 0 0 2 0 2 1000\nL 0 1 2 0 1\n";
        let err = QuadTree::read_preorder_from_bytes(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("strictly inside"));
    }

    #[test]
    fn test_read_rejects_overlapping_siblings() {
        let text = "N 0 0 2 0 2\nL 0 0 2 0 1\nL 0 0 1 0 2\n";
        let err = QuadTree::read_preorder_from_bytes(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("overlaps"));
    }

    #[test]
    fn test_read_rejects_misplaced_slot() {
        // Top and bottom rows filed under BL and BR
        let text = "N 0 0 2 0 2 0011\nL 1 0 1 0 2\nL 2 1 1 0 2\n";
        let err = QuadTree::read_preorder_from_bytes(text.as_bytes()).unwrap_err();
        assert!(matches!(err, RegionError::Format { line: 2, .. }));
        assert!(err.to_string().contains("does not fit slot"));
    }

    #[test]
    fn test_read_accepts_linear_pair_slots() {
        let text = "N 0 0 1 0 2 1100\nL 0 0 1 0 1\nL 9 0 1 1 1\n";
        let tree = QuadTree::read_preorder_from_bytes(text.as_bytes()).unwrap();
        let root = tree.root();
        assert_eq!(root.child_mask(), 0b0011);
        assert_eq!(
            root.child(Quadrant::TopRight).unwrap().region(),
            Region::new(0, 1, 1, 1)
        );
    }

    #[test]
    fn test_read_rejects_incomplete_mask_coverage() {
        let text = "N 0 0 2 0 2 1000\nL 0 0 1 0 1\n";
        let err = QuadTree::read_preorder_from_bytes(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("cover 1 of 4"));
    }

    #[test]
    fn test_read_rejects_trailing_content() {
        let text = "L 0 0 1 0 1\nL 0 0 1 0 1\n";
        let err = QuadTree::read_preorder_from_bytes(text.as_bytes()).unwrap_err();
        assert!(matches!(err, RegionError::Format { line: 2, .. }));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = QuadTree::read_preorder_from_file("/nonexistent/quadpix/tree.qt").unwrap_err();
        assert!(matches!(err, RegionError::Io(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("halves.qt");
        let tree = halves_tree();
        dump_preorder(&tree, &path).unwrap();
        assert_eq!(load_preorder(&path).unwrap(), tree);
    }
}
