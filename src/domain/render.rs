//! Text renderings of an organisation chart.
//!
//! Two styles are supported: the indented outline (one line per person,
//! `depth * indent` spaces, a marker, the name) and a `termtree` box drawing.

use std::collections::HashMap;
use std::io::{self, Write};

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::{instrument, warn};

use crate::domain::arena::PersonArena;
use crate::domain::error::{DomainError, DomainResult};

/// Widest indentation unit the outline honours; larger values are clamped.
pub const MAX_INDENT: usize = 16;

/// Most levels a termtree rendering may have.
///
/// `termtree::Tree` displays and drops itself recursively, one frame per level.
pub const MAX_TREE_LEVELS: usize = 256;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Indented outline, one line per person
    #[default]
    Indent,
    /// Box-drawing tree via termtree
    Tree,
}

/// How a chart is turned into text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderOptions {
    /// Spaces per level of depth
    pub indent: usize,
    /// Written between the indentation and the name
    pub marker: String,
    pub style: RenderStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 1,
            marker: "- ".into(),
            style: RenderStyle::Indent,
        }
    }
}

/// Writes the subtree at `start` as an indented outline, `start` itself at `depth`.
///
/// `opts.indent` is clamped to [`MAX_INDENT`].
#[instrument(level = "trace", skip(arena, opts, out))]
pub(crate) fn write_outline<W: Write + ?Sized>(
    arena: &PersonArena,
    start: Index,
    depth: usize,
    opts: &RenderOptions,
    out: &mut W,
) -> io::Result<()> {
    let indent = opts.indent.min(MAX_INDENT);
    let mut stack = Vec::new();
    if arena.contains(start) {
        stack.push((start, depth));
    }

    while let Some((current_idx, depth)) = stack.pop() {
        if let Some(node) = arena.get(current_idx) {
            writeln!(
                out,
                "{:width$}{}{}",
                "",
                opts.marker,
                node.name(),
                width = depth.saturating_mul(indent)
            )?;
            for &child in node.children().iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
    Ok(())
}

/// Converts the subtree at `start` into a termtree.
///
/// Built bottom-up from a post-order walk. Subtrees with more than
/// [`MAX_TREE_LEVELS`] levels are refused with [`DomainError::TooDeep`].
#[instrument(level = "trace", skip(arena))]
pub(crate) fn to_termtree(arena: &PersonArena, start: Index) -> DomainResult<Tree<String>> {
    let levels = arena.subtree_height(start) + 1;
    if levels > MAX_TREE_LEVELS {
        return Err(DomainError::TooDeep {
            levels,
            limit: MAX_TREE_LEVELS,
        });
    }

    let mut built: HashMap<Index, Tree<String>> = HashMap::new();

    for (idx, node) in arena.iter_postorder_from(start) {
        let leaves: Vec<Tree<String>> = node
            .children()
            .iter()
            .filter_map(|child| built.remove(child))
            .collect();
        built.insert(idx, Tree::new(node.name().to_string()).with_leaves(leaves));
    }

    Ok(built
        .remove(&start)
        .unwrap_or_else(|| Tree::new("Empty chart".to_string())))
}

fn outline(arena: &PersonArena, start: Index, opts: &RenderOptions) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_outline(arena, start, 0, opts, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Renders the subtree at `start` in the style chosen by `opts`.
///
/// Tree style falls back to the outline when the subtree is too tall for termtree.
pub(crate) fn render(arena: &PersonArena, start: Index, opts: &RenderOptions) -> String {
    match opts.style {
        RenderStyle::Indent => outline(arena, start, opts),
        RenderStyle::Tree => match to_termtree(arena, start) {
            Ok(tree) => tree.to_string(),
            Err(e) => {
                warn!("{e}, falling back to outline");
                outline(arena, start, opts)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> PersonArena {
        let mut arena = PersonArena::with_root("boss".into());
        let root = arena.root();
        let a = arena.insert_child(root, "a".into()).unwrap();
        arena.insert_child(a, "a1".into()).unwrap();
        arena.insert_child(root, "b".into()).unwrap();
        arena
    }

    #[test]
    fn given_default_options_when_rendering_outline_then_uses_one_space_and_dash() {
        let arena = arena();
        let text = render(&arena, arena.root(), &RenderOptions::default());
        assert_eq!(text, "- boss\n - a\n  - a1\n - b\n");
    }

    #[test]
    fn given_custom_indent_and_marker_when_rendering_then_applies_both() {
        let arena = arena();
        let opts = RenderOptions {
            indent: 4,
            marker: "* ".into(),
            style: RenderStyle::Indent,
        };
        let text = render(&arena, arena.root(), &opts);
        assert_eq!(text, "* boss\n    * a\n        * a1\n    * b\n");
    }

    #[test]
    fn given_start_depth_when_writing_outline_then_offsets_every_line() {
        let arena = arena();
        let mut buf = Vec::new();
        write_outline(&arena, arena.root(), 2, &RenderOptions::default(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("  - boss\n"));
        assert!(text.contains("    - a1\n"));
    }

    #[test]
    fn given_oversized_indent_when_writing_outline_then_clamps_without_overflow() {
        let arena = arena();
        let opts = RenderOptions {
            indent: usize::MAX,
            ..RenderOptions::default()
        };
        let mut buf = Vec::new();
        write_outline(&arena, arena.root(), 2, &opts, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first, format!("{}- boss", " ".repeat(2 * MAX_INDENT)));
    }

    #[test]
    fn given_chain_taller_than_limit_when_rendering_tree_style_then_falls_back_to_outline() {
        let mut arena = PersonArena::with_root("p0".into());
        let mut current = arena.root();
        for i in 1..=MAX_TREE_LEVELS {
            current = arena.insert_child(current, format!("p{i}")).unwrap();
        }
        assert_eq!(
            to_termtree(&arena, arena.root()).err(),
            Some(DomainError::TooDeep {
                levels: MAX_TREE_LEVELS + 1,
                limit: MAX_TREE_LEVELS
            })
        );

        let opts = RenderOptions {
            style: RenderStyle::Tree,
            ..RenderOptions::default()
        };
        let text = render(&arena, arena.root(), &opts);
        assert!(text.starts_with("- p0\n - p1\n"));
        assert_eq!(text.lines().count(), MAX_TREE_LEVELS + 1);
    }

    #[test]
    fn given_tree_style_when_rendering_then_contains_every_name_in_order() {
        let arena = arena();
        let opts = RenderOptions {
            style: RenderStyle::Tree,
            ..RenderOptions::default()
        };
        let text = render(&arena, arena.root(), &opts);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "boss");
        assert!(lines[1].ends_with("a"));
        assert!(lines[2].ends_with("a1"));
        assert!(lines[3].ends_with("b"));
    }
}
