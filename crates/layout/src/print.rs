//! Text dump of a computed tree.

use trellis_core::{NodeId, TreeResult};

use crate::tree::LayoutTree;

impl LayoutTree {
    /// Render the subtree under `root` one node per line, children indented under
    /// their parent, with each node's display type and final geometry.
    pub fn print_tree(&self, root: NodeId) -> TreeResult<String> {
        let mut lines = Vec::new();
        let mut stack = vec![(root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let display = self.arena.style(node)?.display;
            let layout = self.arena.final_layout(node)?;
            let overflow = if layout.content_size == layout.size {
                String::new()
            } else {
                format!(
                    " content: {}x{}",
                    layout.content_size.width, layout.content_size.height
                )
            };
            lines.push(format!(
                "{indent}{display:?} [x: {x} y: {y} w: {width} h: {height}{overflow}] ({node:?})",
                indent = "  ".repeat(depth),
                x = layout.location.x,
                y = layout.location.y,
                width = layout.size.width,
                height = layout.size.height,
            ));
            let children = self.arena.children(node)?;
            stack.extend(children.iter().rev().map(|child| (*child, depth + 1)));
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use trellis_style::{Dimension, Display, Size, Style};

    use super::*;

    #[test]
    /// # Panics
    /// Panics if the dump does not list children in order under their parent.
    fn dump_lists_children_in_order() -> TreeResult<()> {
        let mut tree = LayoutTree::new();
        let fixed = Style {
            size: Size::new(Dimension::length(10.0), Dimension::length(20.0)),
            ..Style::default()
        };
        let first = tree.new_leaf(fixed.clone());
        let second = tree.new_leaf(Style {
            display: Display::Grid,
            ..fixed
        });
        let root = tree.new_with_children(Style::default(), &[first, second])?;
        tree.compute_layout(root, Size::MAX_CONTENT)?;

        let dump = tree.print_tree(root)?;
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Flex [x: 0 y: 0 w: 20 h: 20]"));
        assert!(lines[1].starts_with("  Flex [x: 0 y: 0 w: 10 h: 20]"));
        assert!(lines[2].starts_with("  Grid [x: 10 y: 0 w: 10 h: 20]"));
        Ok(())
    }
}
